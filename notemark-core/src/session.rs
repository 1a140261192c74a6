//! Editor session
//!
//! [`EditorSession`] is what a host embeds: it owns the current document, the Markdown it
//! was last published as, the selection and the typing state. Every edit goes through the
//! session, which re-serializes the document and hands the new Markdown to the host's
//! [`MarkdownSink`] whenever it changed.

use crate::commands::{apply_command, FormatCommand};
use crate::formats::markdown::{parser, serializer};
use crate::model::{Document, TypingState};
use crate::normalize::{normalize, normalize_typing_state, StyleOptions};
use std::fmt;
use std::ops::Range;

/// Receives the Markdown form of the document after each change.
pub trait MarkdownSink {
    fn markdown_changed(&mut self, markdown: &str);
}

impl<F: FnMut(&str)> MarkdownSink for F {
    fn markdown_changed(&mut self, markdown: &str) {
        self(markdown)
    }
}

pub struct EditorSession {
    document: Document,
    markdown: String,
    selection: Range<usize>,
    typing: TypingState,
    options: StyleOptions,
    sink: Option<Box<dyn MarkdownSink>>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("markdown", &self.markdown)
            .field("selection", &self.selection)
            .field("typing", &self.typing)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Opens `markdown` with the caret at the start.
    pub fn new(markdown: &str, options: StyleOptions) -> Self {
        let document = normalize(&parser::parse_from_markdown(markdown), &options);
        let mut session = EditorSession {
            document,
            markdown: markdown.to_string(),
            selection: 0..0,
            typing: TypingState::default(),
            options,
            sink: None,
        };
        session.reset_typing();
        session
    }

    pub fn with_sink(mut self, sink: impl MarkdownSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The Markdown last loaded or published.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn typing_state(&self) -> &TypingState {
        &self.typing
    }

    pub fn style_options(&self) -> &StyleOptions {
        &self.options
    }

    /// Replaces the content after an external change.
    ///
    /// Markdown equal to what the session last published is its own echo and is ignored,
    /// so the selection and typing state survive the round trip through the host.
    pub fn load(&mut self, markdown: &str) {
        if markdown == self.markdown {
            return;
        }
        log::debug!("loading {} bytes of external markdown", markdown.len());
        self.document = normalize(&parser::parse_from_markdown(markdown), &self.options);
        self.markdown = markdown.to_string();
        self.selection = self.document.clamp(self.selection.clone());
        self.reset_typing();
    }

    /// Re-normalizes the document and the typing state under new preferences.
    pub fn set_style_options(&mut self, options: StyleOptions) {
        let previous = self.document.base;
        self.document = normalize(&self.document, &options);
        self.typing = normalize_typing_state(&self.typing, &previous, &options);
        self.options = options;
        self.commit();
    }

    /// Moves the selection, picking up the style under it.
    pub fn select(&mut self, selection: Range<usize>) {
        self.selection = self.document.clamp(selection);
        self.reset_typing();
    }

    pub fn apply(&mut self, command: &FormatCommand) {
        let outcome = apply_command(command, &self.document, self.selection.clone(), &self.typing);
        self.document = outcome.document;
        self.selection = outcome.selection;
        self.typing = outcome.typing;
        self.commit();
    }

    /// Replaces the selection with `text` typed in the current typing style.
    pub fn insert_text(&mut self, text: &str) {
        let start = self.document.delete(self.selection.clone());
        let style = self.typing.style.clone();
        let caret = self.document.insert_text(start, text, &style);
        self.selection = caret..caret;
        if text.is_empty() {
            self.reset_typing();
        } else {
            // Typing continues in the pending style, inside the block it landed in.
            let (index, _) = self.document.locate(caret);
            if let Some(block) = self.document.paragraphs[index].lead_style().cloned() {
                self.typing.style.adopt_block(&block);
            }
        }
        self.commit();
    }

    /// Deletes the selection, or the char before the caret.
    pub fn delete_backward(&mut self) {
        let range = if self.selection.is_empty() {
            self.selection.start.saturating_sub(1)..self.selection.start
        } else {
            self.selection.clone()
        };
        let caret = self.document.delete(range);
        self.selection = caret..caret;
        self.reset_typing();
        self.commit();
    }

    /// Picks up the style under the selection; an empty paragraph types in the text color.
    fn reset_typing(&mut self) {
        self.typing = TypingState::at(&self.document, self.selection.clone());
        self.typing.style.color = self.options.text_color;
    }

    fn commit(&mut self) {
        let markdown = serializer::serialize_to_markdown(&self.document);
        if markdown == self.markdown {
            return;
        }
        self.markdown = markdown;
        if let Some(sink) = self.sink.as_mut() {
            sink.markdown_changed(&self.markdown);
        }
    }
}
