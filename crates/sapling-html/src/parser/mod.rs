//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree builder consumes tokens from the tokenizer and builds a
//! [`sapling_dom::DomTree`].

/// The adoption agency algorithm for mis-nested formatting end tags.
mod adoption;
/// Tree builder state and the insertion mode dispatcher.
pub mod core;
/// Document and fragment parsing entry points.
mod driver;
/// Tree construction parse errors.
pub mod error;
/// Token handling for SVG and MathML content.
pub mod foreign_content;
/// The list of active formatting elements.
pub mod formatting;
/// Node insertion, implied end tags, and other shared tree operations.
mod insertion;
/// One handler per insertion mode.
mod modes;
/// The stack of open elements.
pub mod open_elements;
/// Parser settings.
pub mod options;
/// DOCTYPE sniffing for quirks mode.
pub mod quirks;
/// Element categories and scope boundaries.
pub mod tags;

pub use self::core::{HTMLParser, InsertionMode};
pub use driver::{parse_document, parse_fragment};
pub use error::ParseError;
pub use options::ParserOptions;
