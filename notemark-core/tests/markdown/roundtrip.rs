//! Round-trip properties of the Markdown dialect
//!
//! Documents are generated from words (letters, digits and a little punctuation) with
//! arbitrary inline styles, in arbitrary block kinds. Words are separated by blanks that
//! carry their own inline style, or touch directly. The generated structure goes through Markdown once so
//! that the property starts from a parsed and normalized document, as edited notes do.

use notemark_core::model::PLACEHOLDER;
use notemark_core::{
    apply_command, normalize, parse, serialize, Document, Font, FontFamily, FormatCommand,
    Paragraph, Run, Style, StyleOptions, Tier, TypingState,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Block {
    Body,
    Heading(u8),
    List,
}

fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        3 => Just(Block::Body),
        1 => (1u8..=3).prop_map(Block::Heading),
        2 => Just(Block::List),
    ]
}

fn inline_style() -> impl Strategy<Value = Style> {
    let link = prop::option::of(prop_oneof![
        Just("https://example.com".to_string()),
        Just("https://".to_string()),
    ]);
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), link).prop_map(
        |(bold, italic, underline, strikethrough, link)| Style {
            bold,
            italic,
            underline,
            strikethrough,
            link,
            ..Style::default()
        },
    )
}

fn separator() -> impl Strategy<Value = Option<(String, Style)>> {
    prop::option::weighted(0.8, (" {1,2}", inline_style()))
}

fn paragraph() -> impl Strategy<Value = Paragraph> {
    (
        block(),
        prop::collection::vec(
            ("[a-zA-Z0-9(),.]{1,8}", inline_style(), separator()),
            0..5,
        ),
    )
        .prop_map(|(block, words)| {
            let base = Font::default();
            let apply_block = |style: &mut Style| {
                style.font = base;
                match block {
                    Block::Body => {}
                    Block::Heading(level) => style.set_tier(Tier::heading(level), &base),
                    Block::List => style.list = true,
                }
            };

            if words.is_empty() {
                let mut empty = Style::body(&base);
                apply_block(&mut empty);
                return match block {
                    Block::List => Paragraph::new(vec![Run::new(PLACEHOLDER, empty)]),
                    _ => Paragraph::default(),
                };
            }

            let mut runs = Vec::new();
            for (index, (word, mut style, separator)) in words.into_iter().enumerate() {
                if let Some((blank, mut blank_style)) = separator.filter(|_| index > 0) {
                    apply_block(&mut blank_style);
                    runs.push(Run::new(blank, blank_style));
                }
                apply_block(&mut style);
                runs.push(Run::new(word, style));
            }
            Paragraph::new(runs)
        })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(paragraph(), 1..6)
        .prop_map(|paragraphs| Document::new(paragraphs, Font::default()))
}

fn options() -> impl Strategy<Value = StyleOptions> {
    (
        8.0f64..40.0,
        prop_oneof![
            Just(FontFamily::System),
            Just(FontFamily::Serif),
            Just(FontFamily::Monospace),
        ],
    )
        .prop_map(|(size, family)| StyleOptions::new(size, family))
}

proptest! {
    #[test]
    fn serialize_then_parse_is_stable(structure in document(), options in options()) {
        let doc = normalize(&parse(&serialize(&structure)), &options);
        let again = normalize(&parse(&serialize(&doc)), &options);
        prop_assert!(again.same_content(&doc), "{:?}\n{:?}", serialize(&doc), serialize(&again));
    }

    #[test]
    fn normalize_is_idempotent(structure in document(), first in options(), second in options()) {
        let once = normalize(&structure, &first);
        prop_assert_eq!(normalize(&once, &first), once.clone());

        let moved = normalize(&once, &second);
        prop_assert_eq!(normalize(&moved, &second), moved);
    }

    #[test]
    fn placeholders_never_persist(structure in document()) {
        let placeholder = '\u{200B}';
        prop_assert!(!serialize(&structure).contains(placeholder));
    }

    #[test]
    fn italic_toggle_is_an_involution(structure in document()) {
        let doc = normalize(&parse(&serialize(&structure)), &StyleOptions::default());
        let all = 0..doc.len();
        let typing = TypingState::default();
        let toggle = FormatCommand::ToggleItalic;

        let mut on = apply_command(&toggle, &doc, all.clone(), &typing).document;
        if !on.styles_in(&all).iter().all(|style| style.italic) {
            on = apply_command(&toggle, &on, all.clone(), &typing).document;
        }
        prop_assert!(on.styles_in(&all).iter().all(|style| style.italic));

        let off = apply_command(&toggle, &on, all.clone(), &typing).document;
        prop_assert!(off.styles_in(&all).iter().all(|style| !style.italic));

        let back = apply_command(&toggle, &off, all.clone(), &typing).document;
        prop_assert!(back.same_content(&on));
    }
}

/// Parses `markdown` and checks that the normalized result survives another round trip.
fn assert_stable(markdown: &str) -> String {
    let options = StyleOptions::default();
    let doc = normalize(&parse(markdown), &options);
    let written = serialize(&doc);
    let again = normalize(&parse(&written), &options);
    assert!(again.same_content(&doc), "{markdown:?} came back as {written:?}");
    written
}

#[test]
fn styled_blanks_round_trip() {
    for markdown in [
        "a<u>b </u>c\n",
        "a<u> </u>b\n",
        "[a ](https://x)b\n",
        "~~a~~<u> </u>~~b~~\n",
    ] {
        assert_eq!(assert_stable(markdown), markdown);
    }
}

#[test]
fn styled_blanks_keep_their_own_attributes() {
    let doc = normalize(&parse("~~a~~<u> </u>~~b~~\n"), &StyleOptions::default());
    let blank = doc.char_style(1).unwrap();
    assert!(blank.underline);
    assert!(!blank.strikethrough);
}

#[test]
fn bold_punctuation_after_word_round_trips() {
    let options = StyleOptions::default();
    let doc = normalize(&parse("a(b)\n"), &options);
    let typing = TypingState::default();
    let bold = apply_command(&FormatCommand::ToggleBold, &doc, 1..4, &typing).document;

    let written = serialize(&bold);
    assert_eq!(written, "a<b>(b)</b>\n");
    let again = normalize(&parse(&written), &options);
    assert!(again.same_content(&bold));
    assert!(again.styles_in(&(1..4)).iter().all(|style| style.bold));
    assert!(!again.char_style(0).unwrap().bold);
}

#[test]
fn edited_blanks_round_trip() {
    assert_stable("**a<i> b</i>**<i> c</i>\n");
    assert_stable("* <b>x </b>y <s> z</s>\n");
    assert_stable("## a <i>b </i>c\n");
}
