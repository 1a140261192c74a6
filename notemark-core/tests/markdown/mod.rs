//! Markdown format tests
//!
//! Tests for Markdown ↔ Document conversion.

mod import;
mod roundtrip;
