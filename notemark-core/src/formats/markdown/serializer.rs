//! Markdown serialization (Document → Markdown export)
//!
//! Each paragraph becomes one line: a block prefix followed by its runs, with inline
//! markers opened and closed as the style changes from run to run.
//!
//! Markers nest in a fixed canonical order (bold, italic, strikethrough, underline, link).
//! Before a run is written, every open marker from the first one the run no longer wants
//! upward is closed, so closing always happens in reverse opening order and the output is
//! well nested whatever the attribute combination. Bold is implied by heading prefixes and
//! never written inside a heading.
//!
//! Text is always written in place, blanks included. Bold, italic and strikethrough prefer
//! the delimiter forms (`**`, `*`, `~~`), but CommonMark only reads a delimiter run as
//! emphasis when it flanks its text the right way. A line is therefore laid out first and
//! then settled: any delimiter that would not read back as the marker it stands for is
//! switched to the tag form (`<b>`, `<i>`, `<s>`) and the line is checked again.

use std::borrow::Cow;

use crate::model::{Document, Paragraph, Style, ZERO_WIDTH_SPACE};

/// Serialize a document to the note Markdown dialect.
pub fn serialize_to_markdown(doc: &Document) -> String {
    if doc.is_blank() {
        return String::new();
    }
    let mut output = String::new();
    for paragraph in &doc.paragraphs {
        write_paragraph(paragraph, &mut output);
        output.push('\n');
    }
    output
}

fn write_paragraph(paragraph: &Paragraph, output: &mut String) {
    let tier = paragraph.tier();
    let visible = paragraph
        .runs
        .iter()
        .any(|run| run.text.chars().any(|c| c != ZERO_WIDTH_SPACE));

    match tier.heading_level() {
        Some(level) if visible => {
            output.push_str(&"#".repeat(level as usize));
            output.push(' ');
        }
        _ if paragraph.is_list() => output.push_str("* "),
        _ => {}
    }

    let mut line = InlineLine::layout(paragraph, tier.is_heading());
    line.settle();
    output.push_str(&line.render());
}

/// An inline marker, in canonical opening order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Link(String),
}

impl Marker {
    /// Markers a run wants open, in canonical order.
    fn wanted(style: &Style, in_heading: bool) -> Vec<Marker> {
        let mut markers = Vec::new();
        if style.bold && !in_heading {
            markers.push(Marker::Bold);
        }
        if style.italic {
            markers.push(Marker::Italic);
        }
        if style.strikethrough {
            markers.push(Marker::Strikethrough);
        }
        if style.underline {
            markers.push(Marker::Underline);
        }
        if let Some(url) = &style.link {
            markers.push(Marker::Link(url.clone()));
        }
        markers
    }

    /// The CommonMark delimiter for markers that have one.
    fn delimiter(&self) -> Option<&'static str> {
        match self {
            Marker::Bold => Some("**"),
            Marker::Italic => Some("*"),
            Marker::Strikethrough => Some("~~"),
            Marker::Underline | Marker::Link(_) => None,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Marker::Bold => "b",
            Marker::Italic => "i",
            Marker::Strikethrough => "s",
            Marker::Underline => "u",
            Marker::Link(_) => "a",
        }
    }
}

fn link_destination(url: &str) -> String {
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{url}>")
    } else {
        url.to_string()
    }
}

/// One marker opened somewhere on the line, with the form it is written in.
#[derive(Debug, Clone)]
struct Span {
    marker: Marker,
    tagged: bool,
    /// Spans already open when this one opened, outermost first.
    enclosing: Vec<usize>,
}

impl Span {
    fn delimiter(&self) -> Option<&'static str> {
        if self.tagged {
            None
        } else {
            self.marker.delimiter()
        }
    }

    fn open(&self) -> Cow<'static, str> {
        if let Some(delimiter) = self.delimiter() {
            return Cow::Borrowed(delimiter);
        }
        match &self.marker {
            Marker::Link(_) => Cow::Borrowed("["),
            marker => Cow::Owned(format!("<{}>", marker.tag())),
        }
    }

    fn close(&self) -> Cow<'static, str> {
        if let Some(delimiter) = self.delimiter() {
            return Cow::Borrowed(delimiter);
        }
        match &self.marker {
            Marker::Link(url) => Cow::Owned(format!("]({})", link_destination(url))),
            marker => Cow::Owned(format!("</{}>", marker.tag())),
        }
    }
}

#[derive(Debug, Clone)]
enum Token {
    Text(String),
    Open(usize),
    Close(usize),
}

/// How a character next to a delimiter run counts for CommonMark flanking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flank {
    Space,
    Punctuation,
    Word,
    /// Symbols whose class differs between CommonMark versions.
    Unsure,
}

impl Flank {
    fn of(c: Option<char>) -> Flank {
        match c {
            None => Flank::Space,
            Some(c) if c.is_whitespace() => Flank::Space,
            Some(c) if c.is_ascii_punctuation() => Flank::Punctuation,
            Some(c) if c.is_alphanumeric() => Flank::Word,
            Some(_) => Flank::Unsure,
        }
    }
}

fn left_flanking(before: Flank, after: Flank) -> bool {
    after != Flank::Space
        && (after != Flank::Punctuation || matches!(before, Flank::Space | Flank::Punctuation))
}

fn right_flanking(before: Flank, after: Flank) -> bool {
    before != Flank::Space
        && (before != Flank::Punctuation || matches!(after, Flank::Space | Flank::Punctuation))
}

/// The inline content of one paragraph as a token stream.
#[derive(Debug, Default)]
struct InlineLine {
    tokens: Vec<Token>,
    spans: Vec<Span>,
}

impl InlineLine {
    fn layout(paragraph: &Paragraph, in_heading: bool) -> Self {
        let mut line = InlineLine::default();
        let mut open: Vec<usize> = Vec::new();

        for run in &paragraph.runs {
            let text: String = run.text.chars().filter(|&c| c != ZERO_WIDTH_SPACE).collect();
            if text.is_empty() {
                continue;
            }
            let wanted = Marker::wanted(&run.style, in_heading);
            let keep = open
                .iter()
                .zip(&wanted)
                .take_while(|&(&id, wanted)| line.spans[id].marker == *wanted)
                .count();
            while open.len() > keep {
                if let Some(id) = open.pop() {
                    line.tokens.push(Token::Close(id));
                }
            }
            for marker in &wanted[keep..] {
                let id = line.spans.len();
                line.spans.push(Span {
                    marker: marker.clone(),
                    tagged: false,
                    enclosing: open.clone(),
                });
                line.tokens.push(Token::Open(id));
                open.push(id);
            }
            line.tokens.push(Token::Text(text));
        }
        while let Some(id) = open.pop() {
            line.tokens.push(Token::Close(id));
        }
        line
    }

    fn piece<'a>(&'a self, token: &'a Token) -> Cow<'a, str> {
        match token {
            Token::Text(text) => Cow::Borrowed(text.as_str()),
            Token::Open(id) => self.spans[*id].open(),
            Token::Close(id) => self.spans[*id].close(),
        }
    }

    fn render(&self) -> String {
        self.tokens.iter().map(|token| self.piece(token)).collect()
    }

    /// Moves spans to their tag form until every remaining delimiter reads back correctly.
    ///
    /// One span changes per pass, so a fallback that fixes its neighbours spares them.
    fn settle(&mut self) {
        while let Some(id) = self.first_misread() {
            self.spans[id].tagged = true;
        }
    }

    /// The span to fall back next, if any delimiter is misread.
    ///
    /// A span whose own text starts or ends with a blank goes first: its delimiters can
    /// never flank, and tagging it often frees the delimiters it was touching.
    fn first_misread(&self) -> Option<usize> {
        let mut chars: Vec<(char, usize)> = Vec::new();
        let mut bounds = Vec::with_capacity(self.tokens.len());
        for (index, token) in self.tokens.iter().enumerate() {
            let start = chars.len();
            chars.extend(self.piece(token).chars().map(|c| (c, index)));
            bounds.push((start, chars.len()));
        }

        let mut misread = self
            .tokens
            .iter()
            .enumerate()
            .filter_map(|(index, token)| {
                let (id, inner) = match token {
                    Token::Open(id) => (*id, chars.get(bounds[index].1)),
                    Token::Close(id) => (*id, bounds[index].0.checked_sub(1).map(|i| &chars[i])),
                    Token::Text(_) => return None,
                };
                let (start, _) = bounds[index];
                (self.spans[id].delimiter().is_some()
                    && !self.delimiter_holds(&chars, start, index))
                .then_some((id, inner.is_some_and(|&(c, _)| c.is_whitespace())))
            })
            .peekable();

        let first = misread.peek().map(|&(id, _)| id);
        misread
            .find(|&(_, blank_inside)| blank_inside)
            .map(|(id, _)| id)
            .or(first)
    }

    /// Whether the delimiter token at `index`, starting at `at` in `chars`, is read back as
    /// the opener or closer of its own span.
    fn delimiter_holds(&self, chars: &[(char, usize)], at: usize, index: usize) -> bool {
        let (id, opening) = match self.tokens[index] {
            Token::Open(id) => (id, true),
            Token::Close(id) => (id, false),
            Token::Text(_) => return true,
        };
        let c = chars[at].0;

        let mut start = at;
        while start > 0 && chars[start - 1].0 == c {
            start -= 1;
        }
        let mut end = at;
        while end < chars.len() && chars[end].0 == c {
            end += 1;
        }

        // The whole delimiter run has to be made of markers going the same way.
        let pure = chars[start..end]
            .iter()
            .all(|&(_, owner)| match self.tokens[owner] {
                Token::Open(other) => opening && self.spans[other].delimiter().is_some(),
                Token::Close(other) => !opening && self.spans[other].delimiter().is_some(),
                Token::Text(_) => false,
            });
        if !pure {
            return false;
        }

        let before = Flank::of(start.checked_sub(1).map(|i| chars[i].0));
        let after = Flank::of(chars.get(end).map(|&(c, _)| c));
        if before == Flank::Unsure || after == Flank::Unsure {
            return false;
        }
        let left = left_flanking(before, after);
        let right = right_flanking(before, after);
        if (opening && !left) || (!opening && !right) {
            return false;
        }
        if left && right {
            // A run that can both open and close may pair with an enclosing run of the
            // same character instead of its own partner.
            return !self.spans[id].enclosing.iter().any(|&other| {
                self.spans[other]
                    .delimiter()
                    .is_some_and(|delimiter| delimiter.starts_with(c))
            });
        }
        true
    }
}
