//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Attribute helpers for duplicate detection
//! - Parse error reporting

use sapling_common::Span;

use super::core::{HTMLTokenizer, TagKind, TokenizerState};
use super::error::TokenizerError;
use super::token::{Attribute, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Reconsume in the saved return state.
    ///
    /// # Panics
    /// Panics if no return state was saved, which means a character reference
    /// state was entered without going through a state that sets one.
    pub(super) fn reconsume_in_return_state(&mut self) {
        let state = self
            .return_state
            .take()
            .expect("character reference state entered without a return state");
        self.reconsume_in(state);
    }

    /// Switch to the saved return state.
    ///
    /// # Panics
    /// Panics if no return state was saved.
    pub(super) fn switch_to_return_state(&mut self) {
        let state = self
            .return_state
            .take()
            .expect("character reference state entered without a return state");
        self.switch_to(state);
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
    ///
    /// "Consume the next input character"
    ///
    /// "normalize newlines": a CR LF pair and a lone CR both come out as a
    /// single LF. Positions still index the original input, so spans point at
    /// the source the caller holds.
    pub(super) fn consume(&mut self) -> Option<char> {
        self.char_start = self.current_pos;
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        if c == '\r' {
            if self.input[self.current_pos..].starts_with('\n') {
                self.current_pos += 1;
            }
            return Some('\n');
        }
        Some(c)
    }

    /// Peek at the codepoint `offset` characters past the current position
    /// without consuming it.
    #[must_use]
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    ///
    /// The main loop has already consumed one character when a state runs,
    /// so the match starts at the current input character rather than after it.
    #[must_use]
    pub(super) fn current_characters_match(&self, target: &str, ignore_case: bool) -> bool {
        self.input
            .get(self.char_start..self.char_start + target.len())
            .is_some_and(|slice| {
                if ignore_case {
                    slice.eq_ignore_ascii_case(target)
                } else {
                    slice == target
                }
            })
    }

    /// "Consume those characters": `len` bytes starting at the current input
    /// character. Only used with ASCII keywords such as `DOCTYPE` and `[CDATA[`.
    pub(super) const fn consume_from_current(&mut self, len: usize) {
        self.current_pos = self.char_start + len;
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// The tokenizer never sees CR, which preprocessing normalized away.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    pub(super) fn emit(&mut self, token: Token, span: Span) {
        self.emitted.push((token, span));
    }

    /// "Emit the current tag token."
    ///
    /// Commits the pending attribute, reports end-tag-only errors, and records
    /// the name of start tags for later appropriate-end-tag checks.
    pub(super) fn emit_current_tag(&mut self) {
        self.commit_attribute();
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        let span = Span::new(self.token_start, self.current_pos);

        let token = match tag.kind {
            TagKind::Start => {
                self.last_start_tag_name = Some(tag.name.clone());
                Token::StartTag {
                    name: tag.name,
                    self_closing: tag.self_closing,
                    attributes: tag.attributes,
                }
            }
            TagKind::End => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !tag.attributes.is_empty() {
                    self.parse_error(TokenizerError::EndTagWithAttributes);
                }
                // "When an end tag token is emitted with its self-closing flag set,
                // that is an end-tag-with-trailing-solidus parse error."
                if tag.self_closing {
                    self.parse_error(TokenizerError::EndTagWithTrailingSolidus);
                }
                Token::EndTag { name: tag.name }
            }
        };
        self.emit(token, span);
    }

    /// "Emit the current comment token."
    pub(super) fn emit_current_comment(&mut self) {
        let data = std::mem::take(&mut self.current_comment);
        let span = Span::new(self.token_start, self.current_pos);
        self.emit(Token::Comment { data }, span);
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_current_doctype(&mut self) {
        if let Some(doctype) = self.current_doctype.take() {
            let span = Span::new(self.token_start, self.current_pos);
            self.emit(doctype, span);
        }
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        let span = Span::new(self.char_start, self.current_pos);
        self.emit(Token::new_character(c), span);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.emit(Token::EndOfFile, Span::at(self.input.len()));
        self.at_eof = true;
    }

    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// ... state."
    ///
    /// The "anything else" branch of every end tag name state in raw text.
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.current_tag = None;
        self.reconsume_in(text_state);
    }

    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_tag) {
            (Some(last), Some(tag)) => tag.kind == TagKind::End && &tag.name == last,
            _ => false,
        }
    }

    /// "Append the current input character to the current tag token's tag name."
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(tag) = self.current_tag.as_mut() {
            tag.name.push(c);
        }
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self, name: &str) {
        self.commit_attribute();
        self.current_attribute = Some(Attribute::new(name, ""));
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.name.push(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    fn commit_attribute(&mut self) {
        let Some(attr) = self.current_attribute.take() else {
            return;
        };
        let Some(tag) = self.current_tag.as_mut() else {
            return;
        };
        if tag.attributes.iter().any(|existing| existing.name == attr.name) {
            self.parse_error(TokenizerError::DuplicateAttribute);
        } else {
            tag.attributes.push(attr);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Queues a parse error at the current input character. The run loop hands
    /// it to the diagnostics context. Parse errors are never fatal.
    pub(super) fn parse_error(&mut self, error: TokenizerError) {
        let span = Span::new(self.char_start, self.current_pos);
        self.errors.push((error, span));
    }
}
