use sapling_dom::NodeId;

use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::error::ParseError;
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(crate) fn handle_in_frameset_mode(&mut self, token: &Token) -> Step {
        match token {
            Token::Character { data } if token.is_whitespace_character() => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.handle_in_body_mode(token),

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "frame""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge
                // the token's self-closing flag, if it is set."
                "frame" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }

                "noframes" => return self.handle_in_head_mode(token),

                _ => self.unexpected(token),
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name } if name == "frameset" => {
                // "If the current node is the root html element, then this is
                // a parse error; ignore the token. (fragment case)"
                if self.open_elements.len() == 1 {
                    self.unexpected(token);
                    return Step::Done;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. If the parser was not created as part of the HTML
                // fragment parsing algorithm (fragment case), and the current
                // node is no longer a frameset element, then switch the
                // insertion mode to "after frameset"."
                let _ = self.open_elements.pop();
                if self.context_element.is_none() && !self.open_elements.top_is_html("frameset") {
                    self.switch_mode(InsertionMode::AfterFrameset);
                }
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this
            // is a parse error. Note: The current node can only be the root
            // html element in the fragment case. Stop parsing."
            Token::EndOfFile => {
                if self.open_elements.len() > 1 {
                    let name = self.current_node_name().local.clone();
                    self.parse_error(ParseError::EofWithOpenElement(name));
                }
                self.stop_parsing();
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.unexpected(token),
        }
        Step::Done
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(crate) fn handle_after_frameset_mode(&mut self, token: &Token) -> Step {
        match token {
            Token::Character { data } if token.is_whitespace_character() => {
                self.insert_character(*data);
            }
            Token::Comment { data } => self.insert_comment(data),
            Token::StartTag { name, .. } if name == "html" => {
                return self.handle_in_body_mode(token);
            }

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag { name } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterFrameset);
            }

            Token::StartTag { name, .. } if name == "noframes" => {
                return self.handle_in_head_mode(token);
            }

            Token::EndOfFile => self.stop_parsing(),

            _ => self.unexpected(token),
        }
        Step::Done
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(crate) fn handle_after_after_frameset_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_as_last_child_of(NodeId::ROOT, data),

            // "A DOCTYPE token", whitespace, "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype { .. } => return self.handle_in_body_mode(token),
            _ if token.is_whitespace_character() => return self.handle_in_body_mode(token),
            Token::StartTag { name, .. } if name == "html" => {
                return self.handle_in_body_mode(token);
            }

            Token::EndOfFile => self.stop_parsing(),

            Token::StartTag { name, .. } if name == "noframes" => {
                return self.handle_in_head_mode(token);
            }

            _ => self.unexpected(token),
        }
        Step::Done
    }
}
