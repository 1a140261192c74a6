//! Editor session tests

use notemark_core::{
    Color, EditorSession, FontFamily, FormatCommand, StyleOptions, Tier, PLACEHOLDER_LINK_TEXT,
};
use std::cell::RefCell;
use std::rc::Rc;

/// A session publishing into a shared log.
fn recorded(markdown: &str) -> (EditorSession, Rc<RefCell<Vec<String>>>) {
    let published = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&published);
    let session = EditorSession::new(markdown, StyleOptions::default())
        .with_sink(move |markdown: &str| log.borrow_mut().push(markdown.to_string()));
    (session, published)
}

#[test]
fn test_typing_after_caret_toggle() {
    let (mut session, published) = recorded("");

    session.apply(&FormatCommand::ToggleBold);
    assert!(session.typing_state().style.bold);
    assert!(published.borrow().is_empty());

    session.insert_text("hi");
    let paragraph = &session.document().paragraphs[0];
    assert_eq!(paragraph.runs.len(), 1);
    assert_eq!(paragraph.runs[0].text, "hi");
    assert!(paragraph.runs[0].style.bold);
    assert_eq!(paragraph.runs[0].style.tier, Tier::Body);
    assert_eq!(session.selection(), 2..2);
    assert_eq!(*published.borrow(), vec!["**hi**\n".to_string()]);
}

#[test]
fn test_commands_publish_markdown() {
    let (mut session, published) = recorded("one two\n");
    session.select(4..7);
    session.apply(&FormatCommand::ToggleItalic);
    session.apply(&FormatCommand::SetHeading(2));

    assert_eq!(
        *published.borrow(),
        vec!["one *two*\n".to_string(), "## one *two*\n".to_string()]
    );
    assert_eq!(session.markdown(), "## one *two*\n");
}

#[test]
fn test_select_resets_typing_state() {
    let (mut session, _) = recorded("**a**b\n");
    session.select(1..1);
    assert!(session.typing_state().style.bold);
    session.select(2..2);
    assert!(!session.typing_state().style.bold);
    session.select(9..3);
    assert_eq!(session.selection(), 2..2);
}

#[test]
fn test_load_ignores_own_echo() {
    let (mut session, _) = recorded("abc\n");
    session.select(1..2);
    session.apply(&FormatCommand::ToggleBold);
    let echo = session.markdown().to_string();

    session.load(&echo);
    assert_eq!(session.selection(), 1..2);

    session.load("x\n");
    assert_eq!(session.document().text(), "x");
    assert_eq!(session.selection(), 1..1);
    assert_eq!(session.markdown(), "x\n");
}

#[test]
fn test_insert_replaces_selection_and_splits_lines() {
    let (mut session, _) = recorded("hello world\n");
    session.select(5..11);
    session.insert_text("\nthere");
    assert_eq!(session.markdown(), "hello\nthere\n");
    assert_eq!(session.selection(), 11..11);
}

#[test]
fn test_typing_inside_heading_keeps_heading() {
    let (mut session, _) = recorded("# T\n");
    session.select(1..1);
    session.insert_text("op");
    assert_eq!(session.markdown(), "# Top\n");
    assert_eq!(session.typing_state().style.tier, Tier::H1);
}

#[test]
fn test_delete_backward_joins_paragraphs() {
    let (mut session, _) = recorded("# a\nb\n");
    session.select(2..2);
    session.delete_backward();
    assert_eq!(session.markdown(), "# ab\n");
    assert_eq!(session.selection(), 1..1);

    session.select(0..2);
    session.delete_backward();
    assert_eq!(session.markdown(), "");
}

#[test]
fn test_delete_backward_at_start_is_a_no_op() {
    let (mut session, published) = recorded("a\n");
    session.delete_backward();
    assert_eq!(session.document().text(), "a");
    assert!(published.borrow().is_empty());
}

#[test]
fn test_insert_link_then_type_over_it() {
    let (mut session, _) = recorded("go \n");
    session.select(3..3);
    session.apply(&FormatCommand::InsertLink { url: None });
    assert_eq!(session.selection(), 3..3 + PLACEHOLDER_LINK_TEXT.len());

    session.insert_text("docs");
    assert_eq!(session.markdown(), "go [docs](https://)\n");
}

#[test]
fn test_style_options_renormalize_document_and_typing() {
    let (mut session, published) = recorded("## Sub\n");
    session.select(1..1);
    let options =
        StyleOptions::new(20.0, FontFamily::Monospace).with_text_color(Color::Rgb(1, 2, 3));
    session.set_style_options(options);

    let style = &session.document().paragraphs[0].runs[0].style;
    assert_eq!(style.tier, Tier::H2);
    assert_eq!(style.font.family, FontFamily::Monospace);
    assert_eq!(style.font.size, 20.0 * 1.4);
    assert_eq!(style.color, Color::Rgb(1, 2, 3));

    let typing = &session.typing_state().style;
    assert_eq!(typing.font, style.font);
    assert_eq!(typing.color, Color::Rgb(1, 2, 3));
    assert_eq!(session.style_options(), &options);
    assert!(published.borrow().is_empty());
}
