//! Rich-text note engine
//!
//!     This crate keeps a styled-text document in memory, converts it to and from the
//!     line-oriented Markdown notes are stored in, and applies formatting commands (bold,
//!     italic, underline, strikethrough, links, headings, lists) to a selection or to the
//!     pending typing style.
//!
//!     This is a pure lib: it powers notemark-cli but no code here supposes a shell
//!     environment, be it std print, env vars or files. Every operation is a synchronous
//!     transformation on the caller's thread.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── model                   # Document, Paragraph, Run, Style, TypingState
//!     │   ├── style.rs            # Style sets, tiers, fonts, colors
//!     │   └── edit.rs             # Run splitting, restyling, insertion, deletion
//!     ├── normalize.rs            # Canonical fonts, tiers and colors
//!     ├── commands.rs             # Formatting commands
//!     ├── session.rs              # Editor session for hosts
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats
//!         ├── markdown            # parser.rs + serializer.rs
//!         ├── json
//!         └── treeviz
//!
//! Data Flow
//!
//!     host Markdown → parse → normalize → commands → serialize → host Markdown
//!
//!     Parsed documents carry raw font metadata laid out against the default base font;
//!     [`normalize`] maps them onto the host's font preferences. Commands take a document
//!     and return a new one, so the host diffs its view instead of sharing a mutable text
//!     buffer with the engine.
//!
//! Errors
//!
//!     None of the editing operations fail. Markdown outside the supported dialect falls
//!     back to plain text line by line, and out-of-range selections are clamped.
//!     [`FormatError`] only surfaces from the format registry and from parsing command
//!     names.
//!
//! Testing
//!     tests
//!     ├── markdown                # import, export, round trip
//!     └── editing                 # commands, session
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to
//!     include these in the mod.

pub mod commands;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod session;

pub use commands::{
    apply_command, CommandOutcome, FormatCommand, PLACEHOLDER_LINK_TEXT, PLACEHOLDER_LINK_URL,
};
pub use error::FormatError;
pub use format::Format;
pub use model::{
    BlockKind, Color, Document, Font, FontFamily, Paragraph, Run, Style, Tier, TypingState,
};
pub use normalize::{normalize, normalize_typing_state, StyleOptions};
pub use registry::FormatRegistry;
pub use session::{EditorSession, MarkdownSink};

/// Parse note Markdown into a document with raw font metadata.
pub fn parse(markdown: &str) -> Document {
    formats::markdown::parser::parse_from_markdown(markdown)
}

/// Serialize a document to note Markdown.
pub fn serialize(document: &Document) -> String {
    formats::markdown::serializer::serialize_to_markdown(document)
}
