//! Error types for format and command operations

use std::fmt;

/// Errors that can occur during format operations
///
/// None of these reach the host through the editing API: Markdown parsing recovers from
/// [`FormatError::MalformedInput`] locally. They surface from the [`crate::FormatRegistry`]
/// and from parsing user-provided command names.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation
    NotSupported(String),
    /// Markdown outside the supported subset
    MalformedInput(String),
    /// Unknown formatting command name
    UnknownCommand(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::MalformedInput(msg) => write!(f, "Malformed input: {msg}"),
            FormatError::UnknownCommand(name) => write!(f, "Unknown command '{name}'"),
        }
    }
}

impl std::error::Error for FormatError {}
