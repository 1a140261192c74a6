//! Formatting commands
//!
//! A command is applied to a `(Document, selection, TypingState)` triple and yields a new
//! triple; the input document is never touched. Inline toggles act on the selected text, or
//! on the typing state when the selection is a caret. Heading and list commands act on
//! every paragraph the selection touches.
//!
//! Selections are clamped to the document before anything else happens, so commands never
//! fail.

use crate::error::FormatError;
use crate::model::{Document, InlineAttribute, Run, Tier, TypingState, PLACEHOLDER};
use std::ops::Range;
use std::str::FromStr;

/// Text inserted by [`FormatCommand::InsertLink`] at a caret.
pub const PLACEHOLDER_LINK_TEXT: &str = "link";

/// Link target used when the host supplies none.
pub const PLACEHOLDER_LINK_URL: &str = "https://";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrikethrough,
    ToggleList,
    InsertLink { url: Option<String> },
    /// Heading level 1-3; other levels are clamped.
    SetHeading(u8),
    ClearHeading,
}

impl FormatCommand {
    /// Command name as accepted by [`FormatCommand::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            FormatCommand::ToggleBold => "bold",
            FormatCommand::ToggleItalic => "italic",
            FormatCommand::ToggleUnderline => "underline",
            FormatCommand::ToggleStrikethrough => "strikethrough",
            FormatCommand::ToggleList => "list",
            FormatCommand::InsertLink { .. } => "link",
            FormatCommand::SetHeading(level) => match Tier::heading(*level) {
                Tier::H1 => "h1",
                Tier::H2 => "h2",
                _ => "h3",
            },
            FormatCommand::ClearHeading => "body",
        }
    }

    fn inline_attribute(&self) -> Option<InlineAttribute> {
        match self {
            FormatCommand::ToggleBold => Some(InlineAttribute::Bold),
            FormatCommand::ToggleItalic => Some(InlineAttribute::Italic),
            FormatCommand::ToggleUnderline => Some(InlineAttribute::Underline),
            FormatCommand::ToggleStrikethrough => Some(InlineAttribute::Strikethrough),
            _ => None,
        }
    }
}

impl FromStr for FormatCommand {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_ascii_lowercase().as_str() {
            "bold" => FormatCommand::ToggleBold,
            "italic" => FormatCommand::ToggleItalic,
            "underline" => FormatCommand::ToggleUnderline,
            "strikethrough" | "strike" => FormatCommand::ToggleStrikethrough,
            "list" => FormatCommand::ToggleList,
            "link" => FormatCommand::InsertLink { url: None },
            "h1" => FormatCommand::SetHeading(1),
            "h2" => FormatCommand::SetHeading(2),
            "h3" => FormatCommand::SetHeading(3),
            "body" => FormatCommand::ClearHeading,
            _ => return Err(FormatError::UnknownCommand(s.to_string())),
        };
        Ok(command)
    }
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub document: Document,
    pub typing: TypingState,
    pub selection: Range<usize>,
}

/// Applies `command` to `selection` in `document`.
pub fn apply_command(
    command: &FormatCommand,
    document: &Document,
    selection: Range<usize>,
    typing: &TypingState,
) -> CommandOutcome {
    let selection = document.clamp(selection);
    log::debug!("applying '{}' to {:?}", command.name(), selection);

    let mut transition = Transition {
        document: document.clone(),
        selection,
        typing: typing.clone(),
    };
    match command {
        FormatCommand::ToggleList => transition.toggle_list(),
        FormatCommand::InsertLink { url } => transition.insert_link(url.as_deref()),
        FormatCommand::SetHeading(level) => transition.set_tier(Tier::heading(*level)),
        FormatCommand::ClearHeading => transition.set_tier(Tier::Body),
        toggle => {
            if let Some(attribute) = toggle.inline_attribute() {
                transition.toggle(attribute);
            }
        }
    }

    CommandOutcome {
        document: transition.document,
        typing: transition.typing,
        selection: transition.selection,
    }
}

/// Working copy of the triple a command rewrites.
struct Transition {
    document: Document,
    selection: Range<usize>,
    typing: TypingState,
}

impl Transition {
    fn is_caret(&self) -> bool {
        self.selection.is_empty()
    }

    fn reset_typing(&mut self) {
        self.typing = TypingState::at(&self.document, self.selection.clone());
    }

    /// Keeps the selection on the same text after `len` chars were inserted at `at`.
    fn shift_for_insertion(&mut self, at: usize, len: usize) {
        let caret = self.is_caret();
        if self.selection.start > at || (caret && self.selection.start == at) {
            self.selection.start += len;
        }
        if self.selection.end >= at {
            self.selection.end += len;
        }
    }

    /// Keeps the selection on the same text after the char at `at` was removed.
    fn shift_for_removal(&mut self, at: usize) {
        if self.selection.start > at {
            self.selection.start -= 1;
        }
        if self.selection.end > at {
            self.selection.end -= 1;
        }
    }

    /// Turns an attribute on over the selection unless every selected run already has it.
    fn toggle(&mut self, attribute: InlineAttribute) {
        if self.is_caret() {
            let value = !attribute.get(&self.typing.style);
            attribute.set(&mut self.typing.style, value);
            return;
        }

        let all_on = self
            .document
            .styles_in(&self.selection)
            .into_iter()
            .all(|style| attribute.get(style));
        self.document
            .restyle(&self.selection, |style| attribute.set(style, !all_on));
        self.reset_typing();
    }

    fn set_tier(&mut self, tier: Tier) {
        let base = self.document.base;
        let touched = self.document.touched_paragraphs(&self.selection);
        for index in touched.rev() {
            let start = self.document.paragraph_start(index);
            let paragraph = &mut self.document.paragraphs[index];
            paragraph.restyle_all(|style| style.set_tier(tier, &base));
            if tier.is_heading() {
                for local in paragraph.strip_placeholders().into_iter().rev() {
                    self.shift_for_removal(start + local);
                }
            }
        }

        if self.is_caret() {
            self.typing.style.set_tier(tier, &base);
        } else {
            self.reset_typing();
        }
    }

    fn toggle_list(&mut self) {
        let base = self.document.base;
        let touched = self.document.touched_paragraphs(&self.selection);
        let all_lists = touched
            .clone()
            .all(|index| self.document.paragraphs[index].is_list());
        let value = !all_lists;

        for index in touched.rev() {
            let start = self.document.paragraph_start(index);
            let paragraph = &mut self.document.paragraphs[index];
            if !value {
                paragraph.restyle_all(|style| style.list = false);
                for local in paragraph.strip_placeholders().into_iter().rev() {
                    self.shift_for_removal(start + local);
                }
            } else if paragraph.runs.is_empty() {
                let mut style = self.typing.style.clone();
                style.set_tier(Tier::Body, &base);
                style.list = true;
                paragraph.runs.push(Run::new(PLACEHOLDER, style));
                self.shift_for_insertion(start, PLACEHOLDER.chars().count());
            } else {
                paragraph.restyle_all(|style| {
                    if style.tier.is_heading() {
                        style.set_tier(Tier::Body, &base);
                    }
                    style.list = true;
                });
            }
        }

        if self.is_caret() {
            if value && self.typing.style.tier.is_heading() {
                self.typing.style.set_tier(Tier::Body, &base);
            }
            self.typing.style.list = value;
        } else {
            self.reset_typing();
        }
    }

    fn insert_link(&mut self, url: Option<&str>) {
        let url = url.unwrap_or(PLACEHOLDER_LINK_URL).to_string();
        if self.is_caret() {
            let mut style = self.typing.style.clone();
            style.link = Some(url);
            let end = self
                .document
                .insert_text(self.selection.start, PLACEHOLDER_LINK_TEXT, &style);
            self.selection = end - PLACEHOLDER_LINK_TEXT.chars().count()..end;
        } else {
            self.document
                .restyle(&self.selection, |style| style.link = Some(url.clone()));
        }
        self.reset_typing();
    }
}
