//! Styled-text document model
//!
//!     A [`Document`] is an ordered, non-empty list of [`Paragraph`]s. A paragraph is an
//!     ordered list of [`Run`]s, each carrying literal text and a complete [`Style`].
//!
//!     Offsets are counted in `char`s over the document text. Every paragraph except the
//!     last owns one trailing line break, so a document of paragraphs "ab" and "c" spans
//!     offsets 0..4 with the break at offset 2.
//!
//!     Paragraph structure (heading tier, list membership) is not stored on the paragraph.
//!     It is read from the first run, see [`Paragraph::block_kind`]. Runs are kept minimal:
//!     after every mutation no two adjacent runs share a style set.

mod edit;
mod style;

pub use style::{
    Color, Font, FontFamily, InlineAttribute, ParseColorError, Style, Tier,
    DEFAULT_BASE_FONT_SIZE,
};

use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};

/// Invisible character that keeps an empty list item bulleted in a live view.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Text of the placeholder run inserted into empty list items.
pub const PLACEHOLDER: &str = "\u{200B}";

/// A span of text with one uniform style set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub style: Style,
}

impl Run {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Run {
            text: text.into(),
            style,
        }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the run holds only placeholder characters.
    pub fn is_placeholder(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c == ZERO_WIDTH_SPACE)
    }
}

/// Structural role of a paragraph, derived from its first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Body,
    Heading(u8),
    ListItem,
}

/// One line of the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Builds a paragraph, merging adjacent runs that share a style.
    pub fn new(runs: Vec<Run>) -> Self {
        let mut paragraph = Paragraph { runs };
        paragraph.merge_runs();
        paragraph
    }

    /// The style that decides the paragraph's block attributes.
    pub fn lead_style(&self) -> Option<&Style> {
        self.runs.first().map(|run| &run.style)
    }

    pub fn block_kind(&self) -> BlockKind {
        match self.lead_style() {
            Some(style) => match style.tier.heading_level() {
                Some(level) => BlockKind::Heading(level),
                None if style.list => BlockKind::ListItem,
                None => BlockKind::Body,
            },
            None => BlockKind::Body,
        }
    }

    pub fn tier(&self) -> Tier {
        self.lead_style().map(|style| style.tier).unwrap_or_default()
    }

    pub fn is_list(&self) -> bool {
        self.block_kind() == BlockKind::ListItem
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Length in chars, excluding the trailing line break.
    pub fn len(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }

    /// True when the paragraph shows nothing but a placeholder.
    pub fn is_placeholder_only(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(Run::is_placeholder)
    }

    /// Style of the char at `offset`, if there is one.
    pub fn style_of_char(&self, offset: usize) -> Option<&Style> {
        let mut start = 0;
        for run in &self.runs {
            let end = start + run.len();
            if offset < end {
                return Some(&run.style);
            }
            start = end;
        }
        None
    }

    /// `(text, style)` pairs with adjacent equal styles merged and empty runs dropped.
    pub fn spans(&self) -> Vec<(String, &Style)> {
        let mut spans: Vec<(String, &Style)> = Vec::new();
        for run in self.runs.iter().filter(|run| !run.is_empty()) {
            match spans.last_mut() {
                Some((text, style)) if *style == &run.style => text.push_str(&run.text),
                _ => spans.push((run.text.clone(), &run.style)),
            }
        }
        spans
    }
}

/// A whole note: paragraphs plus the body font their sizes are laid out against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub base: Font,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(Vec::new(), Font::default())
    }
}

impl Document {
    /// Builds a document. An empty paragraph list becomes one empty paragraph.
    pub fn new(mut paragraphs: Vec<Paragraph>, base: Font) -> Self {
        if paragraphs.is_empty() {
            paragraphs.push(Paragraph::default());
        }
        Document { paragraphs, base }
    }

    /// The plain text, paragraphs joined by line breaks.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Length in chars, line breaks included.
    pub fn len(&self) -> usize {
        let breaks = self.paragraphs.len().saturating_sub(1);
        self.paragraphs.iter().map(Paragraph::len).sum::<usize>() + breaks
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for a document made of a single paragraph without runs.
    pub fn is_blank(&self) -> bool {
        self.paragraphs.len() == 1 && self.paragraphs[0].runs.is_empty()
    }

    /// Offset of the first char of paragraph `index`.
    pub fn paragraph_start(&self, index: usize) -> usize {
        self.paragraphs[..index.min(self.paragraphs.len())]
            .iter()
            .map(|paragraph| paragraph.len() + 1)
            .sum()
    }

    /// Maps a document offset to `(paragraph index, offset inside the paragraph)`.
    ///
    /// The offset of a line break belongs to the paragraph it terminates. Offsets past the
    /// end land at the end of the last paragraph.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let mut start = 0;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            let len = paragraph.len();
            if offset <= start + len {
                return (index, offset - start);
            }
            start += len + 1;
        }
        let last = self.paragraphs.len() - 1;
        (last, self.paragraphs[last].len())
    }

    /// Orders and clamps a selection to `[0, len]`.
    pub fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        let (start, end) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        start.min(len)..end.min(len)
    }

    /// Indices of the paragraphs a (clamped) selection touches.
    ///
    /// A caret touches the paragraph it sits in. A range touches every paragraph holding
    /// one of its chars, line breaks included.
    pub fn touched_paragraphs(&self, range: &Range<usize>) -> RangeInclusive<usize> {
        let first = self.locate(range.start).0;
        let last = if range.end > range.start {
            self.locate(range.end - 1).0
        } else {
            first
        };
        first..=last
    }

    /// Per-paragraph local ranges covered by `range`, skipping empty intersections.
    pub fn segments(&self, range: &Range<usize>) -> Vec<(usize, Range<usize>)> {
        let mut segments = Vec::new();
        let mut start = 0;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            let end = start + paragraph.len();
            let from = range.start.max(start);
            let to = range.end.min(end);
            if from < to {
                segments.push((index, from - start..to - start));
            }
            if end >= range.end {
                break;
            }
            start = end + 1;
        }
        segments
    }

    /// Styles of every run overlapping `range`.
    pub fn styles_in(&self, range: &Range<usize>) -> Vec<&Style> {
        self.segments(range)
            .into_iter()
            .flat_map(|(index, local)| self.paragraphs[index].styles_in(local))
            .collect()
    }

    /// Style of the char at `offset`; `None` on a line break or past the end.
    pub fn char_style(&self, offset: usize) -> Option<&Style> {
        let (index, local) = self.locate(offset);
        self.paragraphs[index].style_of_char(local)
    }

    /// Style a caret at `offset` picks up: the char before it in the same paragraph, else
    /// the paragraph's first run.
    pub fn caret_style(&self, offset: usize) -> Option<&Style> {
        let (index, local) = self.locate(offset);
        let paragraph = &self.paragraphs[index];
        if local > 0 {
            paragraph.style_of_char(local - 1)
        } else {
            paragraph.lead_style()
        }
    }

    /// Equality up to run splitting, ignoring the base font bookkeeping.
    pub fn same_content(&self, other: &Document) -> bool {
        self.paragraphs.len() == other.paragraphs.len()
            && self
                .paragraphs
                .iter()
                .zip(&other.paragraphs)
                .all(|(a, b)| a.spans() == b.spans())
    }
}

/// The style applied to the next inserted text when the selection is a caret.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypingState {
    pub style: Style,
}

impl TypingState {
    pub fn new(style: Style) -> Self {
        TypingState { style }
    }

    /// The typing state for a selection: the first selected char's style for a range,
    /// the caret style otherwise, plain body text in an empty paragraph.
    pub fn at(document: &Document, selection: Range<usize>) -> Self {
        let selection = document.clamp(selection);
        let style = if selection.start < selection.end {
            document
                .char_style(selection.start)
                .or_else(|| document.caret_style(selection.start))
        } else {
            document.caret_style(selection.start)
        };
        let style = style
            .cloned()
            .unwrap_or_else(|| Style::body(&document.base));
        TypingState { style }
    }
}
