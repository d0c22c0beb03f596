use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::error::ParseError;
use crate::parser::tags::{is_table_structure, Scope};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(crate) fn handle_in_table_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            // tokens. Set the original insertion mode to the current
            // insertion mode. Switch the insertion mode to "in table text"
            // and reprocess the token."
            Token::Character { .. } if is_table_structure(self.current_node_name()) => {
                self.pending_table_characters.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                Step::Reprocess(InsertionMode::InTableText)
            }

            Token::Comment { data } => {
                self.insert_comment(data);
                Step::Done
            }

            Token::Doctype { .. } => {
                self.unexpected(token);
                Step::Done
            }

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                // "Clear the stack back to a table context. Insert a marker at
                // the end of the list of active formatting elements. Insert an
                // HTML element for the token, then switch the insertion mode
                // to "in caption"."
                "caption" => {
                    self.clear_the_stack_back_to_a_table_context();
                    self.active_formatting.push_marker();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InCaption);
                    Step::Done
                }

                // "A start tag whose tag name is "colgroup""
                "colgroup" => {
                    self.clear_the_stack_back_to_a_table_context();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InColumnGroup);
                    Step::Done
                }

                // "A start tag whose tag name is "col""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "colgroup" start tag token with no attributes,
                // then switch the insertion mode to "in column group".
                // Reprocess the current token."
                "col" => {
                    self.clear_the_stack_back_to_a_table_context();
                    let _ = self.insert_html_element_named("colgroup");
                    Step::Reprocess(InsertionMode::InColumnGroup)
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    self.clear_the_stack_back_to_a_table_context();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InTableBody);
                    Step::Done
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "tbody" start tag token with no attributes,
                // then switch the insertion mode to "in table body".
                // Reprocess the current token."
                "td" | "th" | "tr" => {
                    self.clear_the_stack_back_to_a_table_context();
                    let _ = self.insert_html_element_named("tbody");
                    Step::Reprocess(InsertionMode::InTableBody)
                }

                // "A start tag whose tag name is "table""
                // "Parse error. If the stack of open elements does not have a
                // table element in table scope, ignore the token. Otherwise:
                // Pop elements from this stack until a table element has been
                // popped from the stack. Reset the insertion mode
                // appropriately. Reprocess the token."
                "table" => {
                    self.parse_error(ParseError::NestedElement("table".to_owned()));
                    if !self.open_elements.has_in_scope("table", Scope::Table) {
                        return Step::Done;
                    }
                    self.open_elements.pop_until_html_named("table");
                    self.reset_insertion_mode_appropriately();
                    Step::Reprocess(self.insertion_mode)
                }

                // "A start tag whose tag name is one of: "style", "script", "template""
                // "Process the token using the rules for the "in head" insertion mode."
                "style" | "script" | "template" => self.handle_in_head_mode(token),

                // "A start tag whose tag name is "input""
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // act as described in the "anything else" entry below.
                // Otherwise: Parse error. Insert an HTML element for the
                // token. Pop that input element off the stack of open
                // elements. Acknowledge the token's self-closing flag, if it
                // is set."
                "input"
                    if token
                        .attribute("type")
                        .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")) =>
                {
                    self.unexpected(token);
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                    Step::Done
                }

                // "A start tag whose tag name is "form""
                // "Parse error. If there is a template element on the stack of
                // open elements, or if the form element pointer is not null,
                // ignore the token. Otherwise: Insert an HTML element for the
                // token, and set the form element pointer to point to the
                // element created. Pop that form element off the stack of open
                // elements."
                "form" => {
                    self.unexpected(token);
                    if !self.open_elements.contains_html("template")
                        && self.form_element_pointer.is_none()
                    {
                        let form = self.insert_html_element(token);
                        self.form_element_pointer = Some(form);
                        let _ = self.open_elements.pop();
                    }
                    Step::Done
                }

                _ => self.in_table_anything_else(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    if self.open_elements.has_in_scope("table", Scope::Table) {
                        self.open_elements.pop_until_html_named("table");
                        self.reset_insertion_mode_appropriately();
                    } else {
                        self.parse_error(ParseError::NotInScope("table".to_owned()));
                    }
                    Step::Done
                }

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
                // "thead", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => {
                    self.unexpected(token);
                    Step::Done
                }

                "template" => self.handle_in_head_mode(token),

                _ => self.in_table_anything_else(token),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),

            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn in_table_anything_else(&mut self, token: &Token) -> Step {
        self.unexpected(token);
        self.foster_parenting = true;
        let step = self.handle_in_body_mode(token);
        self.foster_parenting = false;
        step
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(crate) fn handle_in_table_text_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => {
                self.unexpected(token);
                Step::Done
            }

            // "Any other character token"
            // "Append the character token to the pending table character
            // tokens list."
            Token::Character { data } => {
                self.pending_table_characters.push(*data);
                Step::Done
            }

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_characters);
                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace,
                // then this is a parse error: reprocess the character tokens
                // in the pending table character tokens list using the rules
                // given in the "anything else" entry in the "in table"
                // insertion mode."
                // "Otherwise, insert the characters given by the pending
                // table character tokens list."
                if pending.chars().any(|c| !c.is_ascii_whitespace()) {
                    self.parse_error(ParseError::TextInTable);
                    self.foster_parenting = true;
                    self.reconstruct_the_active_formatting_elements();
                    self.insert_text(&pending);
                    self.foster_parenting = false;
                    self.frameset_ok = false;
                } else if !pending.is_empty() {
                    self.insert_text(&pending);
                }

                // "Switch the insertion mode to the original insertion mode
                // and reprocess the token."
                Step::Reprocess(self.take_original_insertion_mode())
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(crate) fn handle_in_caption_mode(&mut self, token: &Token) -> Step {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name } if name == "caption" => {
                let _ = self.close_caption();
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a caption element
            // in table scope, this is a parse error; ignore the token.
            // (fragment case) Otherwise: ... Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if self.close_caption() {
                    Step::Reprocess(InsertionMode::InTable)
                } else {
                    Step::Done
                }
            }
            Token::EndTag { name } if name == "table" => {
                if self.close_caption() {
                    Step::Reprocess(InsertionMode::InTable)
                } else {
                    Step::Done
                }
            }

            // "An end tag whose tag name is one of: "body", "col",
            // "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// Close the open caption. Returns whether there was one in table scope.
    ///
    /// "1. Generate implied end tags. 2. Now, if the current node is not a
    /// caption element, then this is a parse error. 3. Pop elements from this
    /// stack until a caption element has been popped from the stack. 4. Clear
    /// the list of active formatting elements up to the last marker. 5.
    /// Switch the insertion mode to "in table"."
    fn close_caption(&mut self) -> bool {
        if !self.open_elements.has_in_scope("caption", Scope::Table) {
            self.parse_error(ParseError::NotInScope("caption".to_owned()));
            return false;
        }
        self.generate_implied_end_tags(None);
        if !self.open_elements.top_is_html("caption") {
            self.parse_error(ParseError::UnclosedChildren("caption".to_owned()));
        }
        self.open_elements.pop_until_html_named("caption");
        self.active_formatting.clear_up_to_last_marker();
        self.switch_mode(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(crate) fn handle_in_column_group_mode(&mut self, token: &Token) -> Step {
        match token {
            Token::Character { data } if token.is_whitespace_character() => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => {
                return self.handle_in_body_mode(token);
            }

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements. Acknowledge the
            // token's self-closing flag, if it is set."
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing_flag();
            }

            // "An end tag whose tag name is "colgroup""
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to
            // "in table"."
            Token::EndTag { name } if name == "colgroup" => {
                if self.open_elements.top_is_html("colgroup") {
                    let _ = self.open_elements.pop();
                    self.switch_mode(InsertionMode::InTable);
                } else {
                    self.unexpected(token);
                }
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag { name } if name == "col" => self.unexpected(token),

            Token::StartTag { name, .. } | Token::EndTag { name } if name == "template" => {
                return self.handle_in_head_mode(token);
            }

            Token::EndOfFile => return self.handle_in_body_mode(token),

            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to
            // "in table". Reprocess the token."
            _ => {
                if self.open_elements.top_is_html("colgroup") {
                    let _ = self.open_elements.pop();
                    return Step::Reprocess(InsertionMode::InTable);
                }
                self.unexpected(token);
            }
        }
        Step::Done
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(crate) fn handle_in_table_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context. Insert an HTML
            // element for the token, then switch the insertion mode to "in row"."
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_the_stack_back_to_a_table_body_context();
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InRow);
                Step::Done
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error. Clear the stack back to a table body context.
            // Insert an HTML element for a "tr" start tag token with no
            // attributes, then switch the insertion mode to "in row".
            // Reprocess the current token."
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.unexpected(token);
                self.clear_the_stack_back_to_a_table_body_context();
                let _ = self.insert_html_element_named("tr");
                Step::Reprocess(InsertionMode::InRow)
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name } if matches!(name.as_str(), "tbody" | "tfoot" | "thead") => {
                if !self.open_elements.has_in_scope(name, Scope::Table) {
                    self.parse_error(ParseError::NotInScope(name.clone()));
                    return Step::Done;
                }
                self.clear_the_stack_back_to_a_table_body_context();
                let _ = self.open_elements.pop();
                self.switch_mode(InsertionMode::InTable);
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_body()
            }
            Token::EndTag { name } if name == "table" => self.close_table_body(),

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    /// "If the stack of open elements does not have a tbody, thead, or tfoot
    /// element in table scope, this is a parse error; ignore the token.
    /// Otherwise: Clear the stack back to a table body context. Pop the
    /// current node from the stack of open elements. Switch the insertion
    /// mode to "in table". Reprocess the token."
    fn close_table_body(&mut self) -> Step {
        if !self
            .open_elements
            .has_any_in_scope(&["tbody", "thead", "tfoot"], Scope::Table)
        {
            self.parse_error(ParseError::NotInScope("tbody".to_owned()));
            return Step::Done;
        }
        self.clear_the_stack_back_to_a_table_body_context();
        let _ = self.open_elements.pop();
        Step::Reprocess(InsertionMode::InTable)
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(crate) fn handle_in_row_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active
            // formatting elements."
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.clear_the_stack_back_to_a_table_row_context();
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InCell);
                self.active_formatting.push_marker();
                Step::Done
            }

            // "An end tag whose tag name is "tr""
            Token::EndTag { name } if name == "tr" => {
                let _ = self.close_row();
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                self.close_row_and_reprocess()
            }
            Token::EndTag { name } if name == "table" => self.close_row_and_reprocess(),

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in
            // table scope that is an HTML element with the same tag name as
            // the token, this is a parse error; ignore the token.
            // If the stack of open elements does not have a tr element in
            // table scope, ignore the token."
            Token::EndTag { name } if matches!(name.as_str(), "tbody" | "tfoot" | "thead") => {
                if !self.open_elements.has_in_scope(name, Scope::Table) {
                    self.parse_error(ParseError::NotInScope(name.clone()));
                    return Step::Done;
                }
                if !self.open_elements.has_in_scope("tr", Scope::Table) {
                    return Step::Done;
                }
                self.close_row_and_reprocess()
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.unexpected(token);
                Step::Done
            }

            _ => self.handle_in_table_mode(token),
        }
    }

    /// "If the stack of open elements does not have a tr element in table
    /// scope, this is a parse error; ignore the token. Otherwise: Clear the
    /// stack back to a table row context. Pop the current node (which will
    /// be a tr element) from the stack of open elements. Switch the insertion
    /// mode to "in table body"."
    fn close_row(&mut self) -> bool {
        if !self.open_elements.has_in_scope("tr", Scope::Table) {
            self.parse_error(ParseError::NotInScope("tr".to_owned()));
            return false;
        }
        self.clear_the_stack_back_to_a_table_row_context();
        let _ = self.open_elements.pop();
        self.switch_mode(InsertionMode::InTableBody);
        true
    }

    fn close_row_and_reprocess(&mut self) -> Step {
        if self.close_row() {
            Step::Reprocess(InsertionMode::InTableBody)
        } else {
            Step::Done
        }
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    pub(crate) fn handle_in_cell_mode(&mut self, token: &Token) -> Step {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name } if name == "td" || name == "th" => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name
                // as that of the token, then this is a parse error; ignore
                // the token."
                if !self.open_elements.has_in_scope(name, Scope::Table) {
                    self.parse_error(ParseError::NotInScope(name.clone()));
                    return Step::Done;
                }
                // "1. Generate implied end tags. 2. Now, if the current node
                // is not an HTML element with the same tag name as the token,
                // then this is a parse error. 3. Pop elements from the stack
                // of open elements stack until an HTML element with the same
                // tag name as the token has been popped from the stack. 4.
                // Clear the list of active formatting elements up to the last
                // marker. 5. Switch the insertion mode to "in row"."
                self.generate_implied_end_tags(None);
                if !self.open_elements.top_is_html(name) {
                    self.parse_error(ParseError::UnclosedChildren(name.clone()));
                }
                self.open_elements.pop_until_html_named(name);
                self.active_formatting.clear_up_to_last_marker();
                self.switch_mode(InsertionMode::InRow);
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Assert: The stack of open elements has a td or th element in
            // table scope. Close the cell and reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if !self
                    .open_elements
                    .has_any_in_scope(&["td", "th"], Scope::Table)
                {
                    self.parse_error(ParseError::NotInScope("td".to_owned()));
                    return Step::Done;
                }
                self.close_the_cell();
                Step::Reprocess(InsertionMode::InRow)
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "An end tag whose tag name is one of: "table", "tbody",
            // "tfoot", "thead", "tr""
            // "If the stack of open elements does not have an element in
            // table scope that is an HTML element with the same tag name as
            // that of the token, then this is a parse error; ignore the token.
            // Otherwise, close the cell and reprocess the token."
            Token::EndTag { name }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if !self.open_elements.has_in_scope(name, Scope::Table) {
                    self.parse_error(ParseError::NotInScope(name.clone()));
                    return Step::Done;
                }
                self.close_the_cell();
                Step::Reprocess(InsertionMode::InRow)
            }

            _ => self.handle_in_body_mode(token),
        }
    }
}
