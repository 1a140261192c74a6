//! Import tests for Markdown format (Markdown → Document)

use insta::assert_snapshot;
use notemark_core::formats::treeviz::to_treeviz_str;
use notemark_core::{
    normalize, parse, serialize, BlockKind, Color, Document, Font, FontFamily, StyleOptions, Tier,
};

fn load(markdown: &str) -> Document {
    normalize(&parse(markdown), &StyleOptions::default())
}

#[test]
fn test_inline_styles_become_runs() {
    let doc = load("**bold** and *italic*\n");

    assert_eq!(doc.paragraphs.len(), 1);
    let paragraph = &doc.paragraphs[0];
    assert_eq!(paragraph.block_kind(), BlockKind::Body);
    let runs: Vec<(&str, bool, bool)> = paragraph
        .runs
        .iter()
        .map(|run| (run.text.as_str(), run.style.bold, run.style.italic))
        .collect();
    assert_eq!(
        runs,
        vec![
            ("bold", true, false),
            (" and ", false, false),
            ("italic", false, true)
        ]
    );
    assert_eq!(serialize(&doc), "**bold** and *italic*\n");
}

#[test]
fn test_heading_and_body_lines() {
    let doc = load("# Title\nBody text\n");

    assert_eq!(doc.paragraphs.len(), 2);
    assert_eq!(doc.paragraphs[0].block_kind(), BlockKind::Heading(1));
    assert_eq!(doc.paragraphs[0].text(), "Title");
    assert_eq!(doc.paragraphs[1].block_kind(), BlockKind::Body);
    assert_eq!(doc.paragraphs[1].text(), "Body text");
    assert_eq!(serialize(&doc), "# Title\nBody text\n");
}

#[test]
fn test_every_inline_marker() {
    let doc = load("~~gone~~ <u>under</u> [site](https://example.com) __strong__ _em_\n");
    assert_snapshot!(to_treeviz_str(&doc), @r###"
    ⧉ Document (1 paragraphs, base system 14pt)
    └─ ¶ Body
      ├─ ◦ "gone" {strikethrough}
      ├─ ◦ " " {}
      ├─ ◦ "under" {underline}
      ├─ ◦ " " {}
      ├─ ◦ "site" {link=https://example.com}
      ├─ ◦ " " {}
      ├─ ◦ "strong" {bold}
      ├─ ◦ " " {}
      └─ ◦ "em" {italic}
    "###);
}

#[test]
fn test_heading_levels_and_lists() {
    let doc = load("# One\n## Two\n### Three\n#### Four\n* star\n- dash\n*\n");
    let kinds: Vec<BlockKind> = doc.paragraphs.iter().map(|p| p.block_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading(1),
            BlockKind::Heading(2),
            BlockKind::Heading(3),
            BlockKind::Body,
            BlockKind::ListItem,
            BlockKind::ListItem,
            BlockKind::ListItem,
        ]
    );
    assert_eq!(doc.paragraphs[3].text(), "#### Four");
    assert!(doc.paragraphs[6].is_placeholder_only());
}

#[test]
fn test_malformed_lines_fall_back_to_plain_text() {
    let doc = load("Some `code` here\n> quoted\n![img](a.png)\n## **fine**\n");

    for paragraph in &doc.paragraphs[..3] {
        assert_eq!(paragraph.runs.len(), 1);
        assert!(!paragraph.runs[0].style.italic);
        assert!(!paragraph.runs[0].style.bold);
    }
    assert_eq!(doc.paragraphs[0].text(), "Some `code` here");
    assert_eq!(doc.paragraphs[1].text(), "> quoted");
    assert_eq!(doc.paragraphs[2].text(), "![img](a.png)");
    assert_eq!(doc.paragraphs[3].block_kind(), BlockKind::Heading(2));
    assert_eq!(doc.paragraphs[3].text(), "fine");
    assert_eq!(
        serialize(&doc),
        "Some `code` here\n> quoted\n![img](a.png)\n## fine\n"
    );
}

#[test]
fn test_empty_input_is_one_empty_paragraph() {
    for input in ["", "\n", "   ", "\t\r\n"] {
        let doc = load(input);
        assert!(doc.is_blank(), "{input:?}");
        assert_eq!(doc.paragraphs[0].block_kind(), BlockKind::Body);
        assert_eq!(serialize(&doc), "");
    }
}

#[test]
fn test_blank_lines_are_kept() {
    let doc = load("a\n\n\nb\n");
    assert_eq!(doc.paragraphs.len(), 4);
    assert_eq!(serialize(&doc), "a\n\n\nb\n");
}

#[test]
fn test_normalize_applies_preferences() {
    let options = StyleOptions::new(18.0, FontFamily::Serif).with_text_color(Color::Rgb(0, 0, 0));
    let doc = normalize(&parse("## Sub\ntext\n"), &options);

    let heading = &doc.paragraphs[0].runs[0].style;
    assert_eq!(heading.tier, Tier::H2);
    assert!(heading.bold);
    assert_eq!(heading.font, Font::new(FontFamily::Serif, 18.0).for_tier(Tier::H2));
    assert_eq!(heading.color, Color::Rgb(0, 0, 0));

    let body = &doc.paragraphs[1].runs[0].style;
    assert_eq!(body.font, Font::new(FontFamily::Serif, 18.0));
    assert_eq!(doc.base, Font::new(FontFamily::Serif, 18.0));
}
