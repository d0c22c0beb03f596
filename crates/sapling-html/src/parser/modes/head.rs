use sapling_dom::QualName;

use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::error::ParseError;
use crate::tokenizer::{Token, TokenizerState};

impl HTMLParser {
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(crate) fn handle_in_head_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Insert the character."
            Token::Character { data } if token.is_whitespace_character() => {
                self.insert_character(*data);
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                // "Process the token using the rules for the "in body" insertion mode."
                "html" => return self.handle_in_body_mode(token),

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link""
                // "A start tag whose tag name is "meta""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge
                // the token's self-closing flag, if it is set."
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }

                // "A start tag whose tag name is "title""
                // "Follow the generic RCDATA element parsing algorithm."
                "title" => self.parse_text_element(token, TokenizerState::RCDATA),

                // "A start tag whose tag name is "noscript", if the scripting flag is enabled"
                // "A start tag whose tag name is one of: "noframes", "style""
                // "Follow the generic raw text element parsing algorithm."
                "noscript" if self.options.scripting => {
                    self.parse_text_element(token, TokenizerState::RAWTEXT);
                }
                "noframes" | "style" => self.parse_text_element(token, TokenizerState::RAWTEXT),

                // "A start tag whose tag name is "noscript", if the scripting flag is disabled"
                // "Insert an HTML element for the token. Switch the insertion
                // mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InHeadNoscript);
                }

                // "A start tag whose tag name is "script""
                // The element goes in the appropriate place, the tokenizer
                // switches to the script data state, and the insertion mode
                // becomes "text". Nothing is ever executed.
                "script" => self.parse_text_element(token, TokenizerState::ScriptData),

                // "A start tag whose tag name is "template""
                "template" => self.open_template(token),

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => self.unexpected(token),

                _ => return self.in_head_anything_else(),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "head""
                // "Pop the current node (which will be the head element) off
                // the stack of open elements. Switch the insertion mode to
                // "after head"."
                "head" => {
                    let _ = self.open_elements.pop();
                    self.switch_mode(InsertionMode::AfterHead);
                }

                // "An end tag whose tag name is one of: "body", "html", "br""
                // "Act as described in the "anything else" entry below."
                "body" | "html" | "br" => return self.in_head_anything_else(),

                // "An end tag whose tag name is "template""
                "template" => self.close_template(),

                // "Any other end tag"
                // "Parse error. Ignore the token."
                _ => self.unexpected(token),
            },

            _ => return self.in_head_anything_else(),
        }
        Step::Done
    }

    /// "Pop the current node (which will be the head element) off the stack
    /// of open elements. Switch the insertion mode to "after head".
    /// Reprocess the token."
    fn in_head_anything_else(&mut self) -> Step {
        let _ = self.open_elements.pop();
        Step::Reprocess(InsertionMode::AfterHead)
    }

    /// The "in head" rule for a `template` start tag.
    fn open_template(&mut self, token: &Token) {
        // "Insert an HTML element for the token."
        // "Insert a marker at the end of the list of active formatting elements."
        // "Set the frameset-ok flag to "not ok"."
        // "Switch the insertion mode to "in template"."
        // "Push "in template" onto the stack of template insertion modes so
        // that it is the new current template insertion mode."
        let _ = self.insert_html_element(token);
        self.active_formatting.push_marker();
        self.frameset_ok = false;
        self.switch_mode(InsertionMode::InTemplate);
        self.template_insertion_modes.push(InsertionMode::InTemplate);
    }

    /// The "in head" rule for a `template` end tag.
    pub(crate) fn close_template(&mut self) {
        // "If there is no template element on the stack of open elements,
        // then this is a parse error; ignore the token."
        if !self.open_elements.contains_html("template") {
            self.parse_error(ParseError::UnexpectedEndTag("template".to_owned()));
            return;
        }

        // "1. Generate all implied end tags thoroughly.
        // 2. If the current node is not a template element, then this is a
        // parse error.
        // 3. Pop elements from the stack of open elements until a template
        // element has been popped from the stack.
        // 4. Clear the list of active formatting elements up to the last marker.
        // 5. Pop the current template insertion mode off the stack of
        // template insertion modes.
        // 6. Reset the insertion mode appropriately."
        self.generate_all_implied_end_tags_thoroughly();
        if !self.open_elements.top_is_html("template") {
            self.parse_error(ParseError::UnclosedChildren("template".to_owned()));
        }
        self.open_elements.pop_until_html_named("template");
        self.active_formatting.clear_up_to_last_marker();
        let _ = self.template_insertion_modes.pop();
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(crate) fn handle_in_head_noscript_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.unexpected(token),

            // "A start tag whose tag name is "html""
            Token::StartTag { name, .. } if name == "html" => {
                return self.handle_in_body_mode(token);
            }

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from
            // the stack of open elements; the new current node will be a head
            // element. Switch the insertion mode to "in head"."
            Token::EndTag { name } if name == "noscript" => {
                let _ = self.open_elements.pop();
                self.switch_mode(InsertionMode::InHead);
            }

            // Whitespace, comments, and "A start tag whose tag name is one
            // of: "basefont", "bgsound", "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::Comment { .. } => return self.handle_in_head_mode(token),
            _ if token.is_whitespace_character() => return self.handle_in_head_mode(token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                return self.handle_in_head_mode(token);
            }

            // "An end tag whose tag name is "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name } if name == "br" => return self.in_head_noscript_anything_else(token),

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.unexpected(token);
            }
            Token::EndTag { .. } => self.unexpected(token),

            _ => return self.in_head_noscript_anything_else(token),
        }
        Step::Done
    }

    /// "Parse error. Pop the current node (which will be a noscript element)
    /// from the stack of open elements; the new current node will be a head
    /// element. Switch the insertion mode to "in head". Reprocess the token."
    fn in_head_noscript_anything_else(&mut self, token: &Token) -> Step {
        self.unexpected(token);
        let _ = self.open_elements.pop();
        Step::Reprocess(InsertionMode::InHead)
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(crate) fn handle_after_head_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Insert the character."
            Token::Character { data } if token.is_whitespace_character() => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.handle_in_body_mode(token),

                // "A start tag whose tag name is "body""
                // "Insert an HTML element for the token. Set the frameset-ok
                // flag to "not ok". Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(token);
                    self.frameset_ok = false;
                    self.switch_mode(InsertionMode::InBody);
                }

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token. Switch the insertion
                // mode to "in frameset"."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InFrameset);
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => return self.process_in_head_for_after_head(token),

                "head" => self.unexpected(token),

                _ => return self.after_head_anything_else(),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "template""
                // "Process the token using the rules for the "in head" insertion mode."
                "template" => return self.handle_in_head_mode(token),
                "body" | "html" | "br" => return self.after_head_anything_else(),
                _ => self.unexpected(token),
            },

            _ => return self.after_head_anything_else(),
        }
        Step::Done
    }

    /// "Parse error. Push the node pointed to by the head element pointer
    /// onto the stack of open elements. Process the token using the rules for
    /// the "in head" insertion mode. Remove the node pointed to by the head
    /// element pointer from the stack of open elements. (It might not be the
    /// current node at this point.)"
    fn process_in_head_for_after_head(&mut self, token: &Token) -> Step {
        self.unexpected(token);
        let Some(head) = self.head_element_pointer else {
            return self.handle_in_head_mode(token);
        };
        self.open_elements.push(head, QualName::html("head"));
        let step = self.handle_in_head_mode(token);
        if self.open_elements.contains(head) {
            self.open_elements.remove(head);
        }
        step
    }

    /// "Insert an HTML element for a "body" start tag token with no
    /// attributes. Switch the insertion mode to "in body". Reprocess the
    /// current token."
    fn after_head_anything_else(&mut self) -> Step {
        let _ = self.insert_html_element_named("body");
        Step::Reprocess(InsertionMode::InBody)
    }
}
