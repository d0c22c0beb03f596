//! HTML tokenizer and tree builder for sapling.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data, and PLAINTEXT states
//!   - DOCTYPE, comment, and CDATA section handling
//!   - Named and numeric character references
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes, including tables, select, template, and frameset
//!   - Stack of open elements with every scope variant
//!   - Active formatting elements, reconstruction, and the adoption agency algorithm
//!   - Foster parenting
//!   - SVG and MathML foreign content
//!   - DOCTYPE quirks sniffing
//!   - Fragment parsing
//!
//! # Not Implemented
//!
//! - Script execution and `document.write`
//! - Custom elements
//! - Speculative parsing
//!
//! ```
//! use sapling_common::Diagnostics;
//! use sapling_dom::{NodeId, dump};
//! use sapling_html::{ParserOptions, parse_document};
//!
//! let mut diagnostics = Diagnostics::new();
//! let tree = parse_document("<!DOCTYPE html><title>Hi</title>", ParserOptions::default(), &mut diagnostics);
//! assert!(dump(&tree, NodeId::ROOT).contains("<title>"));
//! assert!(diagnostics.is_empty());
//! ```

/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, InsertionMode, ParseError, ParserOptions, parse_document, parse_fragment};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState, tokenize};
