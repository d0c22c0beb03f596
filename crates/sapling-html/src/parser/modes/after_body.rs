use sapling_dom::NodeId;

use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(crate) fn handle_after_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Process the token using the rules for the "in
            // body" insertion mode."
            _ if token.is_whitespace_character() => self.handle_in_body_mode(token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self.open_elements.bottom().unwrap_or(NodeId::ROOT);
                self.insert_comment_as_last_child_of(html, data);
                Step::Done
            }

            Token::Doctype { .. } => {
                self.unexpected(token);
                Step::Done
            }

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "If the parser was created as part of the HTML fragment parsing
            // algorithm, this is a parse error; ignore the token. (fragment
            // case) Otherwise, switch the insertion mode to "after after body"."
            Token::EndTag { name } if name == "html" => {
                if self.context_element.is_some() {
                    self.unexpected(token);
                } else {
                    self.switch_mode(InsertionMode::AfterAfterBody);
                }
                Step::Done
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => {
                self.stop_parsing();
                Step::Done
            }

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.unexpected(token);
                Step::Reprocess(InsertionMode::InBody)
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(crate) fn handle_after_after_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                self.insert_comment_as_last_child_of(NodeId::ROOT, data);
                Step::Done
            }

            // "A DOCTYPE token", whitespace, "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype { .. } => self.handle_in_body_mode(token),
            _ if token.is_whitespace_character() => self.handle_in_body_mode(token),
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndOfFile => {
                self.stop_parsing();
                Step::Done
            }

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.unexpected(token);
                Step::Reprocess(InsertionMode::InBody)
            }
        }
    }
}
