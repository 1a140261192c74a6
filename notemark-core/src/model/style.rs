//! Style sets carried by runs and by the typing state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body font size used when nothing else is configured, and by the parser.
pub const DEFAULT_BASE_FONT_SIZE: f64 = 14.0;

/// Heading/body classification of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Body,
    H1,
    H2,
    H3,
}

impl Tier {
    const H1_THRESHOLD: f64 = 1.64;
    const H2_THRESHOLD: f64 = 1.36;
    const H3_THRESHOLD: f64 = 1.07;

    /// Classifies a nominal font size laid out against `base`.
    pub fn classify(size: f64, base: f64) -> Tier {
        let ratio = size / base;
        if !ratio.is_finite() {
            return Tier::Body;
        }
        if ratio >= Self::H1_THRESHOLD {
            Tier::H1
        } else if ratio >= Self::H2_THRESHOLD {
            Tier::H2
        } else if ratio >= Self::H3_THRESHOLD {
            Tier::H3
        } else {
            Tier::Body
        }
    }

    /// Size multiplier applied to the base size for this tier.
    ///
    /// Each scale sits above its own classification threshold and below the next one, so
    /// classifying a normalized size gives the same tier back.
    pub fn scale(self) -> f64 {
        match self {
            Tier::Body => 1.0,
            Tier::H1 => 1.7,
            Tier::H2 => 1.4,
            Tier::H3 => 1.15,
        }
    }

    /// Heading tier for a Markdown heading level, clamped to 1..=3.
    pub fn heading(level: u8) -> Tier {
        match level {
            0 | 1 => Tier::H1,
            2 => Tier::H2,
            _ => Tier::H3,
        }
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            Tier::Body => None,
            Tier::H1 => Some(1),
            Tier::H2 => Some(2),
            Tier::H3 => Some(3),
        }
    }

    pub fn is_heading(self) -> bool {
        self != Tier::Body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    System,
    Serif,
    #[serde(alias = "monospaced")]
    Monospace,
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontFamily::System => "system",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
        };
        f.write_str(name)
    }
}

/// Font family and nominal point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: FontFamily,
    pub size: f64,
}

impl Font {
    pub fn new(family: FontFamily, size: f64) -> Self {
        Font { family, size }
    }

    /// The font a run of `tier` uses when `self` is the body font.
    pub fn for_tier(&self, tier: Tier) -> Font {
        Font {
            family: self.family,
            size: self.size * tier.scale(),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(FontFamily::System, DEFAULT_BASE_FONT_SIZE)
    }
}

/// Foreground text color.
///
/// `Foreground` defers to the host's semantic text color, which follows light/dark
/// appearance. Explicit colors are written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    #[default]
    Foreground,
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color '{}': expected 'foreground' or '#rrggbb'",
            self.0
        )
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("foreground") {
            return Ok(Color::Foreground);
        }
        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        let channel = |at: usize| {
            u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Foreground => f.write_str("foreground"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// The complete style set of a run.
///
/// `tier` and `list` are paragraph-level attributes; only the first run of a paragraph is
/// authoritative for them (see [`crate::model::Paragraph::block_kind`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub font: Font,
    #[serde(default)]
    pub color: Color,
}

impl Style {
    /// Unstyled body text in `base`.
    pub fn body(base: &Font) -> Self {
        Style {
            font: *base,
            ..Style::default()
        }
    }

    /// Moves the style to `tier`, resizing against the body font `base`.
    ///
    /// Headings are bold and never list items. Leaving a heading drops the bold it implied.
    pub fn set_tier(&mut self, tier: Tier, base: &Font) {
        let was_heading = self.tier.is_heading();
        self.tier = tier;
        self.font = base.for_tier(tier);
        if tier.is_heading() {
            self.bold = true;
            self.list = false;
        } else if was_heading {
            self.bold = false;
        }
    }

    /// Copies the paragraph-level attributes of `paragraph` onto this style.
    pub fn adopt_block(&mut self, paragraph: &Style) {
        self.tier = paragraph.tier;
        self.list = paragraph.list;
        self.font = paragraph.font;
        if paragraph.tier.is_heading() {
            self.bold = true;
        }
    }
}

/// The character-level attributes that formatting commands toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineAttribute {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl InlineAttribute {
    pub fn get(self, style: &Style) -> bool {
        match self {
            InlineAttribute::Bold => style.bold,
            InlineAttribute::Italic => style.italic,
            InlineAttribute::Underline => style.underline,
            InlineAttribute::Strikethrough => style.strikethrough,
        }
    }

    /// Sets the attribute. Heading text stays bold.
    pub fn set(self, style: &mut Style, value: bool) {
        match self {
            InlineAttribute::Bold => style.bold = value || style.tier.is_heading(),
            InlineAttribute::Italic => style.italic = value,
            InlineAttribute::Underline => style.underline = value,
            InlineAttribute::Strikethrough => style.strikethrough = value,
        }
    }
}
