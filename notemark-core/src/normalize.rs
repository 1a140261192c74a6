//! Style normalization
//!
//! Canonicalizes fonts and colors so that every paragraph has exactly one tier, every run
//! of that paragraph carries the tier's font, and every run is painted in the configured
//! text color.
//!
//! The tier of a paragraph is read from the nominal size of its first run, compared with
//! the base size the document was laid out against ([`Document::base`]). The parser lays
//! out against [`DEFAULT_BASE_FONT_SIZE`]; after normalization the base is the configured
//! one. This is what lets a document be re-normalized under a new base size: existing
//! sizes are classified against the old base and rescaled to the new one.
//!
//! Normalizing a normalized document with the same options is a no-op.

use crate::model::{
    Color, Document, Font, FontFamily, Paragraph, Style, Tier, TypingState,
    DEFAULT_BASE_FONT_SIZE,
};
use serde::{Deserialize, Serialize};

/// Host preferences the normalizer enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleOptions {
    pub base_font_size: f64,
    pub font_family: FontFamily,
    pub text_color: Color,
}

impl StyleOptions {
    pub fn new(base_font_size: f64, font_family: FontFamily) -> Self {
        StyleOptions {
            base_font_size,
            font_family,
            text_color: Color::Foreground,
        }
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// The body font, falling back to the default size for unusable sizes.
    pub fn base_font(&self) -> Font {
        let size = if self.base_font_size.is_finite() && self.base_font_size > 0.0 {
            self.base_font_size
        } else {
            DEFAULT_BASE_FONT_SIZE
        };
        Font::new(self.font_family, size)
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions::new(DEFAULT_BASE_FONT_SIZE, FontFamily::System)
    }
}

/// Returns a normalized copy of `document`.
pub fn normalize(document: &Document, options: &StyleOptions) -> Document {
    let previous = document.base;
    let base = options.base_font();
    let paragraphs = document
        .paragraphs
        .iter()
        .map(|paragraph| normalize_paragraph(paragraph, &previous, &base, options.text_color))
        .collect();
    Document::new(paragraphs, base)
}

/// Applies the same mapping to a pending typing style.
pub fn normalize_typing_state(
    typing: &TypingState,
    previous: &Font,
    options: &StyleOptions,
) -> TypingState {
    let base = options.base_font();
    let tier = Tier::classify(typing.style.font.size, previous.size);
    let list = typing.style.list;
    TypingState::new(normalize_style(
        &typing.style,
        tier,
        list,
        &base,
        options.text_color,
    ))
}

fn normalize_paragraph(
    paragraph: &Paragraph,
    previous: &Font,
    base: &Font,
    color: Color,
) -> Paragraph {
    let Some(lead) = paragraph.lead_style() else {
        return Paragraph::default();
    };
    let tier = Tier::classify(lead.font.size, previous.size);
    let list = lead.list;
    let runs = paragraph
        .runs
        .iter()
        .map(|run| {
            let mut run = run.clone();
            run.style = normalize_style(&run.style, tier, list, base, color);
            run
        })
        .collect();
    Paragraph::new(runs)
}

fn normalize_style(style: &Style, tier: Tier, list: bool, base: &Font, color: Color) -> Style {
    let mut style = style.clone();
    style.tier = tier;
    style.font = base.for_tier(tier);
    style.color = color;
    if tier.is_heading() {
        style.bold = true;
        style.list = false;
    } else {
        style.list = list;
    }
    style
}
