use crate::parser::core::{HTMLParser, Step};
use crate::parser::error::ParseError;
use crate::parser::tags::Scope;
use crate::tokenizer::Token;

const TABLE_PARTS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl HTMLParser {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(crate) fn handle_in_select_mode(&mut self, token: &Token) -> Step {
        match token {
            Token::Character { data: '\0' } => self.unexpected(token),

            // "Any other character token"
            // "Insert the token's character."
            Token::Character { data } => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.handle_in_body_mode(token),

                // "A start tag whose tag name is "option""
                // "If the current node is an option element, pop that node
                // from the stack of open elements. Insert an HTML element for
                // the token."
                "option" => {
                    self.pop_if_current_is("option");
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "optgroup""
                // "If the current node is an option element, pop that node
                // from the stack of open elements. If the current node is an
                // optgroup element, pop that node from the stack of open
                // elements. Insert an HTML element for the token."
                "optgroup" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "hr""
                // As for "optgroup", then "Immediately pop the current node
                // off the stack of open elements. Acknowledge the token's
                // self-closing flag, if it is set."
                "hr" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }

                // "A start tag whose tag name is "select""
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. (fragment
                // case) Otherwise: Pop elements from the stack of open
                // elements until a select element has been popped from the
                // stack. Reset the insertion mode appropriately."
                // "It just gets treated like an end tag."
                "select" => {
                    self.unexpected(token);
                    let _ = self.close_select();
                }

                // "A start tag whose tag name is one of: "input", "keygen", "textarea""
                // As for "select", then "Reprocess the token."
                "input" | "keygen" | "textarea" => {
                    self.unexpected(token);
                    if self.close_select() {
                        return Step::Reprocess(self.insertion_mode);
                    }
                }

                "script" | "template" => return self.handle_in_head_mode(token),

                _ => self.unexpected(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // "First, if the current node is an option element, and
                    // the node immediately before it in the stack of open
                    // elements is an optgroup element, then pop the current
                    // node from the stack of open elements."
                    let len = self.open_elements.len();
                    if self.open_elements.top_is_html("option")
                        && len >= 2
                        && self
                            .open_elements
                            .name_at(len - 2)
                            .is_some_and(|above| above.is_html("optgroup"))
                    {
                        let _ = self.open_elements.pop();
                    }
                    // "If the current node is an optgroup element, then pop
                    // that node from the stack of open elements. Otherwise,
                    // this is a parse error; ignore the token."
                    if self.open_elements.top_is_html("optgroup") {
                        let _ = self.open_elements.pop();
                    } else {
                        self.unexpected(token);
                    }
                }

                // "An end tag whose tag name is "option""
                "option" => {
                    if self.open_elements.top_is_html("option") {
                        let _ = self.open_elements.pop();
                    } else {
                        self.unexpected(token);
                    }
                }

                // "An end tag whose tag name is "select""
                "select" => {
                    let _ = self.close_select();
                }

                "template" => return self.handle_in_head_mode(token),

                _ => self.unexpected(token),
            },

            Token::EndOfFile => return self.handle_in_body_mode(token),
        }
        Step::Done
    }

    /// Pop until the open `select` is gone and reset the insertion mode.
    /// Returns false, after a parse error, when no select is in select scope.
    fn close_select(&mut self) -> bool {
        if !self.open_elements.has_in_scope("select", Scope::Select) {
            self.parse_error(ParseError::NotInScope("select".to_owned()));
            return false;
        }
        self.open_elements.pop_until_html_named("select");
        self.reset_insertion_mode_appropriately();
        true
    }

    fn pop_if_current_is(&mut self, local: &str) {
        if self.open_elements.top_is_html(local) {
            let _ = self.open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(crate) fn handle_in_select_in_table_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. Pop elements from the stack of open elements
            // until a select element has been popped from the stack. Reset
            // the insertion mode appropriately. Reprocess the token."
            Token::StartTag { name, .. } if TABLE_PARTS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.open_elements.pop_until_html_named("select");
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(self.insertion_mode)
            }

            // "An end tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. If the stack of open elements does not have an
            // element in table scope that is an HTML element with the same
            // tag name as that of the token, then ignore the token.
            // Otherwise: ... Reprocess the token."
            Token::EndTag { name } if TABLE_PARTS.contains(&name.as_str()) => {
                self.unexpected(token);
                if !self.open_elements.has_in_scope(name, Scope::Table) {
                    return Step::Done;
                }
                self.open_elements.pop_until_html_named("select");
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(self.insertion_mode)
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.handle_in_select_mode(token),
        }
    }
}
