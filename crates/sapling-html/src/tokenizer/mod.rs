//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 - § 13.2.5.80.
mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Tokenizer parse error codes.
pub mod error;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Comment, DOCTYPE, and CDATA section states.
mod markup_declaration;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Script data states, escaped and double-escaped.
mod script;
/// The consumer side of the tokenizer.
pub mod sink;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{HTMLTokenizer, TokenizerState};
pub use error::TokenizerError;
pub use sink::{TokenCollector, TokenSink, TokenSinkResult, tokenize};
pub use token::{Attribute, Token};
