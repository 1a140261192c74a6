//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the note document model and
//! the line-oriented Markdown dialect notes are stored in.
//!
//! # Library Choice
//!
//! Inline syntax is parsed with the `comrak` crate (strikethrough extension enabled). The
//! block level is handled here, since one line is always one paragraph. Serialization is
//! local: the dialect is small enough that writing it directly keeps the output exact.
//!
//! # Element Mapping Table
//!
//! | Model                    | Markdown                 | Notes                                  |
//! |--------------------------|--------------------------|----------------------------------------|
//! | Paragraph (Body)         | one line                 | every line is a paragraph              |
//! | Paragraph (Heading 1-3)  | `# `, `## `, `### `      | deeper headings stay plain text        |
//! | Paragraph (ListItem)     | `* ` (`- ` on import)    | empty item keeps a zero-width run      |
//! | bold                     | `**x**` or `<b>x</b>`    | implied inside headings, never written |
//! | italic                   | `*x*` or `<i>x</i>`      | `_x_` and `<em>` accepted on import    |
//! | strikethrough            | `~~x~~` or `<s>x</s>`    | `<del>`, `<strike>` accepted on import |
//! | underline                | `<u>x</u>`               | other inline HTML is literal text      |
//! | link                     | `[x](url)`               | `<url>` when the url has blanks        |
//!
//! The tag forms are written wherever a delimiter would not flank its text, for example
//! `a<b>(b)</b>` or a styled run that starts or ends with a blank. `<strong>` is read as bold.
//!
//! # Lossy Conversions
//!
//! - Fonts and colors are not stored; they come back from the normalizer.
//! - Lines outside the dialect (code spans, images, ordered lists, quotes) import as plain
//!   text and export unchanged.
//! - Markdown punctuation inside text is not escaped on export.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Line-oriented note Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
