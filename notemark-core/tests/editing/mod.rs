//! Editing tests
//!
//! Formatting commands on documents, and the session hosts drive them through.

mod commands;
mod session;
