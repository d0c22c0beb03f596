//! Comment, DOCTYPE, and CDATA section states.
//!
//! [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state).

use super::core::{DoctypeId, HTMLTokenizer, TokenizerState};
use super::error::TokenizerError;
use super::token::Token;

// =============================================================================
// Comments
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_comment();
                self.emit_eof_token();
            }
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.current_comment.push('\u{FFFD}');
            }
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// This state looks ahead instead of consuming. The main loop already
    /// consumed one character, so matching starts at that character.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-)"
        // "Consume those two characters, create a comment token whose data is the
        // empty string, and switch to the comment start state."
        if self.current_characters_match("--", false) {
            self.consume_from_current(2);
            self.current_comment.clear();
            self.switch_to(TokenizerState::CommentStart);
            return;
        }

        // "ASCII case-insensitive match for the word "DOCTYPE""
        // "Consume those characters and switch to the DOCTYPE state."
        if self.current_characters_match("DOCTYPE", true) {
            self.consume_from_current(7);
            self.switch_to(TokenizerState::DOCTYPE);
            return;
        }

        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a U+005B
        // LEFT SQUARE BRACKET character before and after)"
        if self.current_characters_match("[CDATA[", false) {
            self.consume_from_current(7);
            // "If there is an adjusted current node and it is not an element in the
            // HTML namespace, then switch to the CDATA section state. Otherwise, this
            // is a cdata-in-html-content parse error. Create a comment token whose
            // data is the "[CDATA[" string. Switch to the bogus comment state."
            if self.cdata_allowed {
                self.switch_to(TokenizerState::CDATASection);
            } else {
                self.parse_error(TokenizerError::CdataInHtmlContent);
                self.current_comment = String::from("[CDATA[");
                self.switch_to(TokenizerState::BogusComment);
            }
            return;
        }

        // "This is an incorrectly-opened-comment parse error. Create a comment token
        // whose data is the empty string. Switch to the bogus comment state (don't
        // consume anything in the current state)."
        self.parse_error(TokenizerError::IncorrectlyOpenedComment);
        self.current_comment.clear();
        self.reconsume_in(TokenizerState::BogusComment);
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            Some('>') => {
                self.parse_error(TokenizerError::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error(TokenizerError::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.current_comment.push('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.current_comment.push('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.current_comment.push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.current_comment.push('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            Some(_) => {
                self.parse_error(TokenizerError::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            Some('-') => self.current_comment.push('-'),
            None => self.eof_in_comment(),
            // "Append two U+002D HYPHEN-MINUS characters (-) to the comment token's
            // data. Reconsume in the comment state."
            Some(_) => {
                self.current_comment.push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.current_comment.push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.parse_error(TokenizerError::IncorrectlyClosedComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    fn eof_in_comment(&mut self) {
        self.parse_error(TokenizerError::EofInComment);
        self.emit_current_comment();
        self.emit_eof_token();
    }
}

// =============================================================================
// DOCTYPE
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(TokenizerError::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.start_doctype();
                self.append_to_doctype_name('\u{FFFD}');
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Switch to the data state. Emit the
            // current token."
            Some('>') => {
                self.parse_error(TokenizerError::MissingDoctypeName);
                self.start_doctype();
                self.set_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            // "Create a new DOCTYPE token. Set the token's name to the current input
            // character" (lowercased for ASCII upper alpha).
            Some(c) => {
                self.start_doctype();
                self.append_to_doctype_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.append_to_doctype_name('\u{FFFD}');
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_to_doctype_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                // "If the six characters starting from the current input character are
                // an ASCII case-insensitive match for the word "PUBLIC", then consume
                // those characters and switch to the after DOCTYPE public keyword state."
                if self.current_characters_match("PUBLIC", true) {
                    self.consume_from_current(6);
                    self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                } else if self.current_characters_match("SYSTEM", true) {
                    self.consume_from_current(6);
                    self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                } else {
                    // "Otherwise, this is an invalid-character-sequence-after-doctype-name
                    // parse error. Set the current DOCTYPE token's force-quirks flag to on.
                    // Reconsume in the bogus DOCTYPE state."
                    self.parse_error(TokenizerError::InvalidCharacterSequenceAfterDoctypeName);
                    self.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDOCTYPE);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, which: DoctypeId) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(match which {
                    DoctypeId::Public => TokenizerState::BeforeDOCTYPEPublicIdentifier,
                    DoctypeId::System => TokenizerState::BeforeDOCTYPESystemIdentifier,
                });
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(match which {
                    DoctypeId::Public => TokenizerError::MissingWhitespaceAfterDoctypePublicKeyword,
                    DoctypeId::System => TokenizerError::MissingWhitespaceAfterDoctypeSystemKeyword,
                });
                self.begin_doctype_identifier(which, quote);
            }
            _ => self.doctype_identifier_missing(which),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, which: DoctypeId) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(which, quote),
            _ => self.doctype_identifier_missing(which),
        }
    }

    /// The `>`, EOF, and "anything else" branches shared by the keyword and
    /// before-identifier states.
    fn doctype_identifier_missing(&mut self, which: DoctypeId) {
        match self.current_input_character {
            // "This is a missing-doctype-public-identifier parse error. Set the current
            // DOCTYPE token's force-quirks flag to on. Switch to the data state. Emit
            // the current DOCTYPE token."
            Some('>') => {
                self.parse_error(match which {
                    DoctypeId::Public => TokenizerError::MissingDoctypePublicIdentifier,
                    DoctypeId::System => TokenizerError::MissingDoctypeSystemIdentifier,
                });
                self.set_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(match which {
                    DoctypeId::Public => TokenizerError::MissingQuoteBeforeDoctypePublicIdentifier,
                    DoctypeId::System => TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier,
                });
                self.set_force_quirks();
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// "Set the current DOCTYPE token's public identifier to the empty string
    /// (not missing), then switch to the DOCTYPE public identifier
    /// (double-quoted) state." and the other three quote/identifier pairs.
    fn begin_doctype_identifier(&mut self, which: DoctypeId, quote: char) {
        self.set_doctype_identifier(which, String::new());
        self.switch_to(match (which, quote) {
            (DoctypeId::Public, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (DoctypeId::Public, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (DoctypeId::System, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (DoctypeId::System, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        });
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and the single-quoted and system identifier variants.
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, which: DoctypeId, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(match which {
                DoctypeId::Public => TokenizerState::AfterDOCTYPEPublicIdentifier,
                DoctypeId::System => TokenizerState::AfterDOCTYPESystemIdentifier,
            }),
            Some('\0') => {
                self.parse_error(TokenizerError::UnexpectedNullCharacter);
                self.append_to_doctype_identifier(which, '\u{FFFD}');
            }
            Some('>') => {
                self.parse_error(match which {
                    DoctypeId::Public => TokenizerError::AbruptDoctypePublicIdentifier,
                    DoctypeId::System => TokenizerError::AbruptDoctypeSystemIdentifier,
                });
                self.set_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_to_doctype_identifier(which, c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    TokenizerError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_doctype_identifier(DoctypeId::System, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.set_force_quirks();
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(DoctypeId::System, quote),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(TokenizerError::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.set_force_quirks();
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier parse
            // error. Reconsume in the bogus DOCTYPE state. (This does not set the
            // current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(TokenizerError::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some('\0') => self.parse_error(TokenizerError::UnexpectedNullCharacter),
            None => {
                self.emit_current_doctype();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(TokenizerError::EofInDoctype);
        if self.current_doctype.is_none() {
            self.start_doctype();
        }
        self.set_force_quirks();
        self.emit_current_doctype();
        self.emit_eof_token();
    }

    fn start_doctype(&mut self) {
        self.current_doctype = Some(Token::Doctype {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
        });
    }

    fn set_force_quirks(&mut self) {
        if let Some(Token::Doctype { force_quirks, .. }) = self.current_doctype.as_mut() {
            *force_quirks = true;
        }
    }

    fn append_to_doctype_name(&mut self, c: char) {
        if let Some(Token::Doctype { name, .. }) = self.current_doctype.as_mut() {
            name.get_or_insert_with(String::new).push(c);
        }
    }

    fn doctype_identifier_mut(&mut self, which: DoctypeId) -> Option<&mut Option<String>> {
        match self.current_doctype.as_mut() {
            Some(Token::Doctype {
                public_identifier,
                system_identifier,
                ..
            }) => Some(match which {
                DoctypeId::Public => public_identifier,
                DoctypeId::System => system_identifier,
            }),
            _ => None,
        }
    }

    fn set_doctype_identifier(&mut self, which: DoctypeId, value: String) {
        if let Some(identifier) = self.doctype_identifier_mut(which) {
            *identifier = Some(value);
        }
    }

    fn append_to_doctype_identifier(&mut self, which: DoctypeId, c: char) {
        if let Some(identifier) = self.doctype_identifier_mut(which) {
            identifier.get_or_insert_with(String::new).push(c);
        }
    }
}

// =============================================================================
// CDATA sections
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_to(TokenizerState::CDATASectionBracket),
            None => {
                self.parse_error(TokenizerError::EofInCdata);
                self.emit_eof_token();
            }
            // NULL is emitted as-is here; the tree builder's foreign content rules
            // replace it.
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        if self.current_input_character == Some(']') {
            self.switch_to(TokenizerState::CDATASectionEnd);
        } else {
            self.emit_character_token(']');
            self.reconsume_in(TokenizerState::CDATASection);
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.emit_character_token(']'),
            Some('>') => self.switch_to(TokenizerState::Data),
            _ => {
                self.emit_character_token(']');
                self.emit_character_token(']');
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }
}
