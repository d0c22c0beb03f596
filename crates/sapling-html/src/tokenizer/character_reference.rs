//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use sapling_common::Span;

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::TokenizerError;
use super::named_character_references::longest_match;
use super::token::Token;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column."
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

// Codes above this are clamped so long digit runs cannot overflow.
const OUTSIDE_UNICODE: u32 = 0x11_0000;

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // The '&' that led here is one byte before the current character.
        self.reference_start = self.char_start.saturating_sub(1);
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Flush code points consumed as a character reference. Reconsume in the
            // return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let Some(found) = longest_match(&self.input[self.char_start..]) else {
            // "Otherwise: Flush code points consumed as a character reference. Switch
            // to the ambiguous ampersand state."
            // Nothing past the '&' was consumed, so the current character is
            // looked at again there.
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        let matched_end = self.char_start + found.len;
        self.temporary_buffer
            .push_str(&self.input[self.char_start..matched_end]);
        self.current_pos = matched_end;

        // "If the character reference was consumed as part of an attribute, and the
        // last character matched is not a U+003B SEMICOLON character (;), and the next
        // input character is either a U+003D EQUALS SIGN character (=) or an ASCII
        // alphanumeric, then, for historical reasons, flush code points consumed as a
        // character reference and switch to the return state."
        let next = self.peek_codepoint(0);
        if self.is_consumed_as_part_of_attribute()
            && !found.terminated
            && next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to_return_state();
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;), then
        // this is a missing-semicolon-after-character-reference parse error."
        if !found.terminated {
            self.parse_error(TokenizerError::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two characters
        // corresponding to the character reference name to the temporary buffer.
        // Flush code points consumed as a character reference. Switch to the return
        // state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(found.value);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to_return_state();
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "If the character reference was consumed as part of an attribute, then
            // append the current input character to the current attribute's value.
            // Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_attribute_value(c);
                } else {
                    self.emit_character_token(c);
                }
            }
            Some(';') => {
                self.parse_error(TokenizerError::UnknownNamedCharacterReference);
                self.reconsume_in_return_state();
            }
            _ => self.reconsume_in_return_state(),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
        } else {
            self.absence_of_digits();
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_ascii_digit())
        {
            self.reconsume_in(TokenizerState::DecimalCharacterReference);
        } else {
            self.absence_of_digits();
        }
    }

    /// "This is an absence-of-digits-in-numeric-character-reference parse error.
    /// Flush code points consumed as a character reference. Reconsume in the
    /// return state."
    fn absence_of_digits(&mut self) {
        self.parse_error(TokenizerError::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference();
        self.reconsume_in_return_state();
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.handle_digits_state(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.handle_digits_state(10);
    }

    fn handle_digits_state(&mut self, radix: u32) {
        match self.current_input_character {
            // "Multiply the character reference code by 16 (or 10). Add a numeric
            // version of the current input character to the character reference code."
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or_default();
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit)
                    .min(OUTSIDE_UNICODE);
            }
            // "Switch to the numeric character reference end state."
            // That state consumes nothing, so it runs right away and the character
            // after ';' is consumed fresh in the return state.
            Some(';') => {
                self.finish_numeric_character_reference();
                self.switch_to_return_state();
            }
            _ => {
                self.parse_error(TokenizerError::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Only entered by reconsuming, so the current character still belongs to
    /// the return state.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        self.finish_numeric_character_reference();
        self.reconsume_in_return_state();
    }

    fn finish_numeric_character_reference(&mut self) {
        let code = self.character_reference_code;
        let replacement = match code {
            0 => {
                self.parse_error(TokenizerError::NullCharacterReference);
                '\u{FFFD}'
            }
            c if c > 0x10_FFFF => {
                self.parse_error(TokenizerError::CharacterReferenceOutsideUnicodeRange);
                '\u{FFFD}'
            }
            0xD800..=0xDFFF => {
                self.parse_error(TokenizerError::SurrogateCharacterReference);
                '\u{FFFD}'
            }
            c => {
                if is_noncharacter(c) {
                    self.parse_error(TokenizerError::NoncharacterCharacterReference);
                }
                // "If the number is 0x0D, or a control that's not ASCII whitespace,
                // then this is a control-character-reference parse error."
                if c == 0x0D || (is_control(c) && !matches!(c, 0x09 | 0x0A | 0x0C | 0x20)) {
                    self.parse_error(TokenizerError::ControlCharacterReference);
                }
                C1_REPLACEMENTS
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map(|(_, to)| *to)
                    .or_else(|| char::from_u32(c))
                    .unwrap_or('\u{FFFD}')
            }
        };

        self.temporary_buffer.clear();
        self.temporary_buffer.push(replacement);
        self.flush_code_points_consumed_as_character_reference();
    }

    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise,
    /// emit each character as a character token."
    ///
    /// Emitted characters all carry the span of the whole reference.
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_attribute_value(c);
            }
        } else {
            let span = Span::new(self.reference_start, self.current_pos.max(self.char_start));
            for c in buffer.chars() {
                self.emit(Token::new_character(c), span);
            }
        }
    }
}

/// [Noncharacter](https://infra.spec.whatwg.org/#noncharacter)
const fn is_noncharacter(c: u32) -> bool {
    matches!(c, 0xFDD0..=0xFDEF) || (c & 0xFFFE) == 0xFFFE
}

/// [Control](https://infra.spec.whatwg.org/#control): a C0 control or a
/// code point in the range U+007F DELETE to U+009F.
const fn is_control(c: u32) -> bool {
    c <= 0x1F || matches!(c, 0x7F..=0x9F)
}
