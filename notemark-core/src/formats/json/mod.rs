//! JSON format
//!
//! Dumps the document model as it is held in memory, fonts and colors included. Unlike
//! Markdown this keeps every attribute, so it is useful for inspecting normalization and
//! for exchanging documents with tools that do not speak the note dialect.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Document, Paragraph};

/// Format implementation for JSON
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document model as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let doc: Document =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        let paragraphs = doc
            .paragraphs
            .into_iter()
            .map(|paragraph| Paragraph::new(paragraph.runs))
            .collect();
        Ok(Document::new(paragraphs, doc.base))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
