//! Common utilities for the sapling crates.
//!
//! This crate provides shared infrastructure used by the tokenizer and the
//! tree builder:
//! - **Spans** - byte ranges into the parsed source
//! - **Diagnostics** - an explicit, deduplicating sink for parse errors

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use span::Span;
