//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! One file per group of related insertion modes. Every handler takes the
//! token by reference and returns a [`Step`](super::core::Step).

mod after_body;
mod body;
mod frameset;
mod head;
mod initial;
mod select;
mod table;
mod template;
mod text;

use super::core::HTMLParser;
use super::error::ParseError;
use crate::tokenizer::Token;

impl HTMLParser {
    /// Report `token` as out of place in the current insertion mode. Callers
    /// then ignore it or handle it as "anything else".
    pub(crate) fn unexpected(&mut self, token: &Token) {
        let error = match token {
            Token::Doctype { .. } => ParseError::UnexpectedDoctype,
            Token::StartTag { name, .. } => ParseError::UnexpectedStartTag(name.clone()),
            Token::EndTag { name } => ParseError::UnexpectedEndTag(name.clone()),
            Token::Character { data: '\0' } => ParseError::UnexpectedNull,
            Token::Character { data } => ParseError::UnexpectedCharacter(*data),
            Token::Comment { .. } | Token::EndOfFile => return,
        };
        self.parse_error(error);
    }
}
