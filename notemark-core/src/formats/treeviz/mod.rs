//! Treeviz formatter for documents
//!
//! Treeviz is a visual representation of the document, one line per node: the document,
//! its paragraphs, and the runs of each paragraph. It is serialize-only and meant for
//! inspecting how Markdown was read and how commands split runs.
//!
//! The format is:
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//! ⧉ Document (2 paragraphs, base system 14pt)
//! ├─ § Heading 1
//! │ └─ ◦ "Title" {bold}
//! └─ • List item
//!   ├─ ◦ "see " {}
//!   └─ ◦ "docs" {link=https://example.com}
//!
//! Icons
//!     Document: ⧉
//!     Body paragraph: ¶
//!     Heading: §
//!     List item: •
//!     Run: ◦

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{BlockKind, Document, Paragraph, Run};

const MAX_RUN_CHARS: usize = 30;

fn get_icon(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Body => "¶",
        BlockKind::Heading(_) => "§",
        BlockKind::ListItem => "•",
    }
}

fn paragraph_label(paragraph: &Paragraph) -> String {
    match paragraph.block_kind() {
        BlockKind::Body if paragraph.runs.is_empty() => "Body (empty)".to_string(),
        BlockKind::Body => "Body".to_string(),
        BlockKind::Heading(level) => format!("Heading {level}"),
        BlockKind::ListItem => "List item".to_string(),
    }
}

fn run_label(run: &Run) -> String {
    let mut text: String = run.text.chars().take(MAX_RUN_CHARS).collect();
    if run.len() > MAX_RUN_CHARS {
        text.push('…');
    }

    let style = &run.style;
    let mut flags = Vec::new();
    if style.bold {
        flags.push("bold".to_string());
    }
    if style.italic {
        flags.push("italic".to_string());
    }
    if style.underline {
        flags.push("underline".to_string());
    }
    if style.strikethrough {
        flags.push("strikethrough".to_string());
    }
    if let Some(url) = &style.link {
        flags.push(format!("link={url}"));
    }
    format!("{text:?} {{{}}}", flags.join(", "))
}

fn format_paragraph(paragraph: &Paragraph, is_last: bool) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{} {} {}\n",
        connector,
        get_icon(paragraph.block_kind()),
        paragraph_label(paragraph)
    );

    let child_prefix = if is_last { "  " } else { "│ " };
    let count = paragraph.runs.len();
    for (i, run) in paragraph.runs.iter().enumerate() {
        let connector = if i == count - 1 { "└─" } else { "├─" };
        output.push_str(&format!("{child_prefix}{connector} ◦ {}\n", run_label(run)));
    }
    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!(
        "⧉ Document ({} paragraphs, base {} {}pt)\n",
        doc.paragraphs.len(),
        doc.base.family,
        doc.base.size
    );
    let count = doc.paragraphs.len();
    for (i, paragraph) in doc.paragraphs.iter().enumerate() {
        output.push_str(&format_paragraph(paragraph, i == count - 1));
    }
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of paragraphs and runs with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}
