//! Markdown parsing (Markdown → Document import)
//!
//! The note grammar is line-oriented: every line is one paragraph. Block prefixes are read
//! here; the inline content of each line is handed to comrak and the resulting inline tree
//! is flattened into runs.
//!
//! Pipeline per line: block prefix → Comrak AST → runs
//!
//! A line comrak does not reduce to a single supported paragraph keeps its block prefix and
//! becomes one unstyled run holding the raw content. Parsing never fails.

use crate::error::FormatError;
use crate::model::{Document, Font, Paragraph, Run, Style, Tier, PLACEHOLDER};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a Markdown string into a document laid out against the default base font.
pub fn parse_from_markdown(source: &str) -> Document {
    let base = Font::default();
    let source = source.strip_suffix('\n').unwrap_or(source);
    if source.chars().all(|c| matches!(c, ' ' | '\t' | '\r')) {
        return Document::new(Vec::new(), base);
    }

    let options = default_comrak_options();
    let paragraphs = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| parse_line(line, &base, &options))
        .collect();
    Document::new(paragraphs, base)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options
}

/// Block-level reading of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineBlock {
    Body,
    Heading(u8),
    ListItem,
}

/// Splits the block prefix off `line`.
fn split_block_prefix(line: &str) -> (LineBlock, &str) {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(content) = line.strip_prefix(prefix) {
            return (LineBlock::Heading(level), content);
        }
    }
    for prefix in ["* ", "- "] {
        if let Some(content) = line.strip_prefix(prefix) {
            return (LineBlock::ListItem, content);
        }
    }
    if line == "*" || line == "-" {
        return (LineBlock::ListItem, "");
    }
    (LineBlock::Body, line)
}

fn block_style(block: LineBlock, base: &Font) -> Style {
    let mut style = Style::body(base);
    match block {
        LineBlock::Body => {}
        LineBlock::Heading(level) => style.set_tier(Tier::heading(level), base),
        LineBlock::ListItem => style.list = true,
    }
    style
}

fn parse_line(line: &str, base: &Font, options: &ComrakOptions) -> Paragraph {
    let (block, content) = split_block_prefix(line);
    let style = block_style(block, base);

    if content.is_empty() {
        return match block {
            LineBlock::ListItem => Paragraph::new(vec![Run::new(PLACEHOLDER, style)]),
            _ => Paragraph::default(),
        };
    }

    match parse_inline(content, &style, options) {
        Ok(runs) => Paragraph::new(runs),
        Err(err) => {
            log::debug!("{err}; keeping line as plain text");
            Paragraph::new(vec![Run::new(content, style)])
        }
    }
}

/// Parses the inline content of one line into runs.
///
/// Comrak drops leading and trailing blanks of a paragraph, so they are kept aside and
/// re-attached as unstyled runs.
fn parse_inline(
    content: &str,
    style: &Style,
    options: &ComrakOptions,
) -> Result<Vec<Run>, FormatError> {
    let core = content.trim_start_matches([' ', '\t']);
    let leading = &content[..content.len() - core.len()];
    let core = core.trim_end_matches([' ', '\t']);
    let trailing = &content[leading.len() + core.len()..];

    let mut runs = vec![Run::new(leading, style.clone())];
    if !core.is_empty() {
        let arena = Arena::new();
        let root = parse_document(&arena, core, options);
        let mut children = root.children();
        let paragraph = match (children.next(), children.next()) {
            (Some(node), None) if matches!(node.data.borrow().value, NodeValue::Paragraph) => {
                node
            }
            _ => {
                return Err(FormatError::MalformedInput(format!(
                    "'{core}' is not a single paragraph"
                )))
            }
        };

        let mut collector = InlineCollector::new(style);
        for child in paragraph.children() {
            collector.collect(child)?;
        }
        runs.extend(collector.runs);
    }
    runs.push(Run::new(trailing, style.clone()));
    Ok(runs)
}

/// Flattens a comrak inline tree into runs, tracking the attributes of the enclosing nodes.
struct InlineCollector {
    block: Style,
    bold: usize,
    italic: usize,
    strikethrough: usize,
    underline: usize,
    links: Vec<String>,
    runs: Vec<Run>,
}

impl InlineCollector {
    fn new(block: &Style) -> Self {
        InlineCollector {
            block: block.clone(),
            bold: 0,
            italic: 0,
            strikethrough: 0,
            underline: 0,
            links: Vec::new(),
            runs: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        let mut style = self.block.clone();
        style.bold |= self.bold > 0;
        style.italic = self.italic > 0;
        style.strikethrough = self.strikethrough > 0;
        style.underline = self.underline > 0;
        style.link = self.links.last().cloned();
        style
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        self.runs.push(Run::new(text, style));
    }

    fn collect_children<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), FormatError> {
        for child in node.children() {
            self.collect(child)?;
        }
        Ok(())
    }

    fn collect<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), FormatError> {
        let value = node.data.borrow().value.clone();
        match value {
            NodeValue::Text(text) => self.push_text(&text),
            NodeValue::SoftBreak | NodeValue::LineBreak => self.push_text(" "),
            NodeValue::Strong => {
                self.bold += 1;
                self.collect_children(node)?;
                self.bold -= 1;
            }
            NodeValue::Emph => {
                self.italic += 1;
                self.collect_children(node)?;
                self.italic -= 1;
            }
            NodeValue::Strikethrough => {
                self.strikethrough += 1;
                self.collect_children(node)?;
                self.strikethrough -= 1;
            }
            NodeValue::Link(link) => {
                self.links.push(link.url);
                self.collect_children(node)?;
                self.links.pop();
            }
            NodeValue::HtmlInline(html) => {
                let tag = html.trim().to_ascii_lowercase();
                let (name, closing) = match tag.strip_prefix("</") {
                    Some(rest) => (rest.strip_suffix('>'), true),
                    None => (tag.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')), false),
                };
                let depth = match name {
                    Some("b" | "strong") => &mut self.bold,
                    Some("i" | "em") => &mut self.italic,
                    Some("s" | "del" | "strike") => &mut self.strikethrough,
                    Some("u") => &mut self.underline,
                    _ => {
                        self.push_text(&html);
                        return Ok(());
                    }
                };
                if closing {
                    *depth = depth.saturating_sub(1);
                } else {
                    *depth += 1;
                }
            }
            other => {
                return Err(FormatError::MalformedInput(format!(
                    "unsupported inline element {other:?}"
                )))
            }
        }
        Ok(())
    }
}
