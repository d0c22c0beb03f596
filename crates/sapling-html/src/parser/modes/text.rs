use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::error::ParseError;
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    ///
    /// Content of `title`, `textarea`, `style`, `script` and the other raw
    /// text elements. The tokenizer already decided where the element ends.
    pub(crate) fn handle_text_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data } => {
                self.insert_character(*data);
                Step::Done
            }

            // "An end-of-file token"
            // "Parse error. If the current node is a script element, then set
            // its already started to true. Pop the current node off the stack
            // of open elements. Switch the insertion mode to the original
            // insertion mode and reprocess the token."
            Token::EndOfFile => {
                let name = self.current_node_name().local.clone();
                self.parse_error(ParseError::EofInText(name));
                let _ = self.open_elements.pop();
                Step::Reprocess(self.take_original_insertion_mode())
            }

            // "An end tag whose tag name is "script""
            // "Any other end tag"
            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            // Scripts are never prepared or run.
            Token::EndTag { .. } => {
                let _ = self.open_elements.pop();
                let mode = self.take_original_insertion_mode();
                self.switch_mode(mode);
                Step::Done
            }

            // The tokenizer emits nothing else in the text states.
            _ => Step::Done,
        }
    }

    /// Clear the original insertion mode and return what it was.
    pub(crate) fn take_original_insertion_mode(&mut self) -> InsertionMode {
        self.original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody)
    }
}
