//! Formatting command tests

use notemark_core::model::PLACEHOLDER;
use notemark_core::{
    apply_command, normalize, parse, serialize, BlockKind, CommandOutcome, Document,
    FormatCommand, StyleOptions, Tier, TypingState, PLACEHOLDER_LINK_URL,
};
use std::ops::Range;

fn load(markdown: &str) -> Document {
    normalize(&parse(markdown), &StyleOptions::default())
}

/// Applies a command with the typing state the selection would have.
fn run(command: FormatCommand, doc: &Document, selection: Range<usize>) -> CommandOutcome {
    let typing = TypingState::at(doc, selection.clone());
    apply_command(&command, doc, selection, &typing)
}

#[test]
fn test_toggle_at_caret_changes_typing_state_only() {
    let doc = Document::default();
    let typing = TypingState::at(&doc, 0..0);
    assert!(!typing.style.bold);

    let outcome = apply_command(&FormatCommand::ToggleBold, &doc, 0..0, &typing);
    assert!(outcome.typing.style.bold);
    assert_eq!(outcome.document, doc);

    let mut doc = outcome.document;
    doc.insert_text(0, "hi", &outcome.typing.style);
    let paragraph = &doc.paragraphs[0];
    assert_eq!(paragraph.block_kind(), BlockKind::Body);
    assert_eq!(paragraph.runs.len(), 1);
    assert_eq!(paragraph.runs[0].text, "hi");
    assert!(paragraph.runs[0].style.bold);
}

#[test]
fn test_toggle_turns_on_unless_all_on() {
    let doc = load("**a**bc\n");
    let outcome = run(FormatCommand::ToggleBold, &doc, 0..3);

    let paragraph = &outcome.document.paragraphs[0];
    assert_eq!(paragraph.runs.len(), 1);
    assert_eq!(paragraph.runs[0].text, "abc");
    assert!(paragraph.runs[0].style.bold);
    assert_eq!(serialize(&outcome.document), "**abc**\n");
}

#[test]
fn test_toggle_fully_covered_turns_off_and_back() {
    let doc = load("*abc* def\n");
    let off = run(FormatCommand::ToggleItalic, &doc, 0..3);
    assert_eq!(serialize(&off.document), "abc def\n");

    let on = run(FormatCommand::ToggleItalic, &off.document, 0..3);
    assert_eq!(serialize(&on.document), "*abc* def\n");
    assert!(on.document.same_content(&doc));
}

#[test]
fn test_toggle_splits_runs_at_selection() {
    let doc = load("plain words\n");
    let outcome = run(FormatCommand::ToggleUnderline, &doc, 2..8);
    assert_eq!(serialize(&outcome.document), "pl<u>ain wo</u>rds\n");
    assert!(outcome.typing.style.underline);
    assert_eq!(outcome.selection, 2..8);
}

#[test]
fn test_toggle_across_paragraphs() {
    let doc = load("ab\ncd\n");
    let outcome = run(FormatCommand::ToggleStrikethrough, &doc, 1..4);
    assert_eq!(serialize(&outcome.document), "a~~b~~\n~~c~~d\n");
}

#[test]
fn test_heading_text_stays_bold() {
    let doc = load("# Title\n");
    let outcome = run(FormatCommand::ToggleBold, &doc, 0..5);
    assert!(outcome.document.paragraphs[0].runs[0].style.bold);
    assert_eq!(serialize(&outcome.document), "# Title\n");
}

#[test]
fn test_out_of_range_selection_is_clamped() {
    let doc = load("abc\n");
    let outcome = run(FormatCommand::ToggleItalic, &doc, 2..99);
    assert_eq!(outcome.selection, 2..3);
    assert_eq!(serialize(&outcome.document), "ab*c*\n");

    let outcome = run(FormatCommand::ToggleList, &doc, 40..50);
    assert_eq!(serialize(&outcome.document), "* abc\n");
}

#[test]
fn test_command_leaves_input_untouched() {
    let doc = load("* item\n");
    let before = doc.clone();
    let _ = run(FormatCommand::SetHeading(1), &doc, 0..4);
    assert_eq!(doc, before);
}

#[test]
fn test_set_heading_clears_list_and_placeholder() {
    let doc = load("* \nafter\n");
    let typing = TypingState::at(&doc, 1..1);
    let outcome = apply_command(&FormatCommand::SetHeading(2), &doc, 1..1, &typing);

    assert_eq!(outcome.selection, 0..0);
    assert!(outcome.document.paragraphs[0].runs.is_empty());
    assert_eq!(outcome.typing.style.tier, Tier::H2);
    assert!(!outcome.typing.style.list);
    assert!(outcome.typing.style.bold);
    assert_eq!(serialize(&outcome.document), "\nafter\n");

    let mut doc = outcome.document;
    doc.insert_text(0, "Hi", &outcome.typing.style);
    assert_eq!(serialize(&doc), "## Hi\nafter\n");
}

#[test]
fn test_set_heading_on_list_items() {
    let doc = load("* one\n* two\nthree\n");
    let outcome = run(FormatCommand::SetHeading(3), &doc, 2..6);
    assert_eq!(serialize(&outcome.document), "### one\n### two\nthree\n");
    for paragraph in &outcome.document.paragraphs[..2] {
        assert!(!paragraph.is_list());
        assert_eq!(paragraph.block_kind(), BlockKind::Heading(3));
    }
}

#[test]
fn test_set_heading_clamps_level() {
    let doc = load("deep\n");
    let outcome = run(FormatCommand::SetHeading(9), &doc, 0..0);
    assert_eq!(serialize(&outcome.document), "### deep\n");
    let outcome = run(FormatCommand::SetHeading(0), &doc, 0..0);
    assert_eq!(serialize(&outcome.document), "# deep\n");
}

#[test]
fn test_clear_heading_drops_implied_bold() {
    let doc = load("## Sub **x**\n");
    let outcome = run(FormatCommand::ClearHeading, &doc, 1..1);
    let paragraph = &outcome.document.paragraphs[0];
    assert_eq!(paragraph.block_kind(), BlockKind::Body);
    assert!(paragraph.runs.iter().all(|run| !run.style.bold));
    assert_eq!(serialize(&outcome.document), "Sub x\n");
    assert_eq!(outcome.typing.style.tier, Tier::Body);
}

#[test]
fn test_toggle_list_on_empty_paragraph_inserts_placeholder() {
    let doc = Document::default();
    let outcome = run(FormatCommand::ToggleList, &doc, 0..0);

    let paragraph = &outcome.document.paragraphs[0];
    assert_eq!(paragraph.runs.len(), 1);
    assert_eq!(paragraph.runs[0].text, PLACEHOLDER);
    assert!(paragraph.runs[0].style.list);
    assert_eq!(paragraph.block_kind(), BlockKind::ListItem);
    assert_eq!(outcome.selection, 1..1);
    assert!(outcome.typing.style.list);
    assert_eq!(serialize(&outcome.document), "* \n");

    let mut doc = outcome.document;
    let caret = doc.insert_text(1, "x", &outcome.typing.style);
    assert_eq!(caret, 1);
    assert_eq!(serialize(&doc), "* x\n");
}

#[test]
fn test_toggle_list_forces_body_tier() {
    let doc = load("# Title\n");
    let outcome = run(FormatCommand::ToggleList, &doc, 0..0);
    let style = &outcome.document.paragraphs[0].runs[0].style;
    assert_eq!(style.tier, Tier::Body);
    assert!(style.list);
    assert!(!style.bold);
    assert_eq!(serialize(&outcome.document), "* Title\n");
    assert_eq!(outcome.typing.style.tier, Tier::Body);
    assert!(outcome.typing.style.list);
}

#[test]
fn test_toggle_list_mixed_selection_turns_all_on() {
    let doc = load("* a\nb\n");
    let outcome = run(FormatCommand::ToggleList, &doc, 0..3);
    assert_eq!(serialize(&outcome.document), "* a\n* b\n");
}

#[test]
fn test_toggle_list_off_removes_placeholders() {
    let doc = load("* a\n* \n");
    let outcome = run(FormatCommand::ToggleList, &doc, 0..3);
    assert_eq!(outcome.selection, 0..2);
    assert_eq!(serialize(&outcome.document), "a\n\n");
    assert!(outcome.document.paragraphs[1].runs.is_empty());
    assert!(!outcome.typing.style.list);
}

#[test]
fn test_insert_link_at_caret_selects_placeholder_text() {
    let doc = load("see \n");
    let outcome = run(FormatCommand::InsertLink { url: None }, &doc, 4..4);
    assert_eq!(outcome.selection, 4..8);
    assert_eq!(serialize(&outcome.document), "see [link](https://)\n");
    assert_eq!(
        outcome.typing.style.link.as_deref(),
        Some(PLACEHOLDER_LINK_URL)
    );
}

#[test]
fn test_insert_link_over_selection() {
    let doc = load("click here\n");
    let url = Some("https://example.com".to_string());
    let outcome = run(FormatCommand::InsertLink { url }, &doc, 6..10);
    assert_eq!(
        serialize(&outcome.document),
        "click [here](https://example.com)\n"
    );
    assert_eq!(outcome.selection, 6..10);
}

#[test]
fn test_insert_link_into_empty_list_item() {
    let doc = load("* \n");
    let outcome = run(FormatCommand::InsertLink { url: None }, &doc, 1..1);
    assert_eq!(outcome.selection, 0..4);
    assert_eq!(serialize(&outcome.document), "* [link](https://)\n");
}
