use std::fmt;

pub use sapling_dom::Attribute;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
///
/// Tokens are immutable once emitted. The tree builder receives each one
/// together with its source [`Span`](sapling_common::Span).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing
    /// (which is a distinct state from the empty string), and the force-quirks
    /// flag must be set to off (its other state is on)."
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_identifier: Option<String>,
        /// "a system identifier"
        system_identifier: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    ///
    /// Duplicate attribute names were already dropped by the tokenizer, so
    /// `attributes` keeps the first occurrence of each name in source order.
    StartTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// An end tag. Attributes on end tags are a parse error and are dropped
    /// by the tokenizer.
    EndTag {
        /// "a tag name"
        name: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
    },

    /// "Comment and character tokens have data."
    Character {
        /// "data"
        data: char,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Build a start tag token.
    #[must_use]
    pub fn start_tag(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self::StartTag {
            name: name.into(),
            self_closing: false,
            attributes,
        }
    }

    /// Build an end tag token.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag { name: name.into() }
    }

    /// Create a character token with the given character.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Whether this is a start tag named `tag`.
    #[must_use]
    pub fn is_start_tag(&self, tag: &str) -> bool {
        matches!(self, Self::StartTag { name, .. } if name == tag)
    }

    /// Whether this is an end tag named `tag`.
    #[must_use]
    pub fn is_end_tag(&self, tag: &str) -> bool {
        matches!(self, Self::EndTag { name } if name == tag)
    }

    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }

    /// The attributes of a start tag; empty for every other token.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::StartTag { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Value of the start tag attribute `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// "A character token that is one of U+0009 CHARACTER TABULATION,
    /// U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN
    /// (CR), or U+0020 SPACE"
    #[must_use]
    pub const fn is_whitespace_character(&self) -> bool {
        matches!(
            self,
            Self::Character {
                data: '\t' | '\n' | '\x0C' | '\r' | ' '
            }
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name, .. } => {
                write!(f, "<!DOCTYPE {}>", name.as_deref().unwrap_or(""))
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => write!(f, "{data:?}"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
