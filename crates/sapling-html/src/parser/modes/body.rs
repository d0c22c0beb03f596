use sapling_dom::{Namespace, NodeId, QualName, QuirksMode};

use crate::parser::adoption::AdoptionOutcome;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::error::ParseError;
use crate::parser::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
};
use crate::parser::tags::{is_formatting, is_special, may_remain_open_at_eof, Scope};
use crate::tokenizer::{Token, TokenizerState};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Start tags that close an open `p` and then insert themselves.
const BLOCK_START_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// End tags closing a block that must be in scope.
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

impl HTMLParser {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(crate) fn handle_in_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => self.unexpected(token),

            // Whitespace: "Reconstruct the active formatting elements, if
            // any. Insert the token's character."
            // "Any other character token": as above, then "Set the
            // frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.reconstruct_the_active_formatting_elements();
                self.insert_character(*data);
                if !token.is_whitespace_character() {
                    self.frameset_ok = false;
                }
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => return self.in_body_start_tag(name, token),

            Token::EndTag { name } => return self.in_body_end_tag(name, token),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    return self.handle_in_template_mode(token);
                }
                // "Otherwise, follow these steps: 1. If there is a node in the
                // stack of open elements that is not either a dd element, a dt
                // element, ... the body element, or the html element, then
                // this is a parse error. 2. Stop parsing."
                self.check_open_elements_at_eof();
                self.stop_parsing();
            }
        }
        Step::Done
    }

    fn in_body_start_tag(&mut self, name: &str, token: &Token) -> Step {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                self.unexpected(token);
                // "If there is a template element on the stack of open
                // elements, then ignore the token. Otherwise, for each
                // attribute on the token, check to see if the attribute is
                // already present on the top element of the stack of open
                // elements. If it is not, add the attribute and its
                // corresponding value to that element."
                if !self.open_elements.contains_html("template")
                    && let Some(html) = self.open_elements.bottom()
                {
                    self.merge_attributes(html, token);
                }
            }

            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => return self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body""
            "body" => {
                self.unexpected(token);
                // "If the second element on the stack of open elements is not
                // a body element, if the stack of open elements has only one
                // node on it, or if there is a template element on the stack
                // of open elements, then ignore the token. (fragment case or
                // there is a template element on the stack)"
                let body = self.second_element_if_body();
                if let Some(body) = body
                    && !self.open_elements.contains_html("template")
                {
                    // "Otherwise, set the frameset-ok flag to "not ok"; then,
                    // for each attribute on the token, check to see if the
                    // attribute is already present on the body element (the
                    // second element) on the stack of open elements, and if
                    // it is not, add the attribute and its corresponding
                    // value to that element."
                    self.frameset_ok = false;
                    self.merge_attributes(body, token);
                }
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                self.unexpected(token);
                // "If the stack of open elements has only one node on it, or
                // if the second element on the stack of open elements is not
                // a body element, then ignore the token. (fragment case or
                // there is a template element on the stack)
                // If the frameset-ok flag is set to "not ok", ignore the token."
                let body = self.second_element_if_body();
                if let Some(body) = body
                    && self.frameset_ok
                {
                    // "1. Remove the second element on the stack of open
                    // elements from its parent node, if it has one.
                    // 2. Pop all the nodes from the bottom of the stack of
                    // open elements, from the current node up to, but not
                    // including, the root html element.
                    // 3. Insert an HTML element for the token.
                    // 4. Switch the insertion mode to "in frameset"."
                    self.tree.detach(body);
                    while self.open_elements.len() > 1 {
                        let _ = self.open_elements.pop();
                    }
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InFrameset);
                }
            }

            _ if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                self.close_p_if_in_button_scope();
                // "If the current node is an HTML element whose tag name is
                // one of "h1", "h2", "h3", "h4", "h5", or "h6", then this is
                // a parse error; pop the current node off the stack of open
                // elements."
                if HEADINGS.iter().any(|h| self.open_elements.top_is_html(h)) {
                    self.parse_error(ParseError::NestedElement(name.to_owned()));
                    let _ = self.open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one.
                // (Newlines at the start of pre blocks are ignored as an
                // authoring convenience.)"
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                let in_template = self.open_elements.contains_html("template");
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this
                // is a parse error; ignore the token."
                if self.form_element_pointer.is_some() && !in_template {
                    self.parse_error(ParseError::NestedElement("form".to_owned()));
                } else {
                    self.close_p_if_in_button_scope();
                    let form = self.insert_html_element(token);
                    if !in_template {
                        self.form_element_pointer = Some(form);
                    }
                }
            }

            // "A start tag whose tag name is "li""
            "li" => {
                self.frameset_ok = false;
                self.close_list_item(&["li"]);
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                self.frameset_ok = false;
                self.close_list_item(&["dd", "dt"]);
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "plaintext""
            // "Switch the tokenizer to the PLAINTEXT state." There is no way
            // out of it.
            "plaintext" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                self.switch_tokenizer_to(TokenizerState::PLAINTEXT);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "1. If the stack of open elements has a button element in
                // scope, then run these substeps: Parse error. Generate
                // implied end tags. Pop elements from the stack of open
                // elements until a button element has been popped from the
                // stack."
                if self.open_elements.has_in_scope("button", Scope::Default) {
                    self.parse_error(ParseError::NestedElement("button".to_owned()));
                    self.generate_implied_end_tags(None);
                    self.open_elements.pop_until_html_named("button");
                }
                self.reconstruct_the_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption
                // agency algorithm for the token, then remove that element
                // from the list of active formatting elements and the stack
                // of open elements if the adoption agency algorithm didn't
                // already remove it (it might not have if the element is not
                // in table scope)."
                if let Some(existing) = self.active_formatting.last_element_after_last_marker_with_tag_name("a") {
                    self.parse_error(ParseError::NestedElement("a".to_owned()));
                    let _ = self.run_adoption_agency("a");
                    self.active_formatting.remove(existing);
                    if self.open_elements.contains(existing) {
                        self.open_elements.remove(existing);
                    }
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_the_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                // then this is a parse error; run the adoption agency
                // algorithm for the token, then once again reconstruct the
                // active formatting elements, if any."
                if self.open_elements.has_in_scope("nobr", Scope::Default) {
                    self.parse_error(ParseError::NestedElement("nobr".to_owned()));
                    let _ = self.run_adoption_agency("nobr");
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code",
            // "em", "font", "i", "s", "small", "strike", "strong", "tt", "u""
            _ if is_formatting(name) => self.insert_formatting_element(token),

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token. Insert a marker at the end of the
            // list of active formatting elements. Set the frameset-ok flag to
            // "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_the_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.active_formatting.push_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            // "If the Document is not set to quirks mode, and the stack of
            // open elements has a p element in button scope, then close a p
            // element. Insert an HTML element for the token. Set the
            // frameset-ok flag to "not ok". Switch the insertion mode to "in
            // table"."
            "table" => {
                if self.tree.quirks_mode() != QuirksMode::Quirks {
                    self.close_p_if_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            // "...If the token does not have an attribute with the name
            // "type", or if it does, but that attribute's value is not an
            // ASCII case-insensitive match for the string "hidden", then: set
            // the frameset-ok flag to "not ok"."
            "input" => {
                self.insert_void_element(token);
                if !token
                    .attribute("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"))
                {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing_flag();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and
            // reprocess it. (Don't ask.)"
            "image" => {
                self.unexpected(token);
                let Token::StartTag {
                    self_closing,
                    attributes,
                    ..
                } = token
                else {
                    return Step::Done;
                };
                return Step::ReprocessAs(Token::StartTag {
                    name: "img".to_owned(),
                    self_closing: *self_closing,
                    attributes: attributes.clone(),
                });
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // "1. Insert an HTML element for the token.
                // 2. If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one.
                // 3. Switch the tokenizer to the RCDATA state.
                // 4. Set the original insertion mode to the current insertion mode.
                // 5. Set the frameset-ok flag to "not ok".
                // 6. Switch the insertion mode to "text"."
                self.parse_text_element(token, TokenizerState::RCDATA);
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_if_in_button_scope();
                self.reconstruct_the_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed""
            // "A start tag whose tag name is "noscript", if the scripting flag is enabled"
            "noembed" => self.parse_text_element(token, TokenizerState::RAWTEXT),
            "noscript" if self.options.scripting => {
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_the_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption",
                // "in table body", "in row", or "in cell", then switch the
                // insertion mode to "in select in table". Otherwise, switch
                // the insertion mode to "in select"."
                let mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
                self.switch_mode(mode);
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            "optgroup" | "option" => {
                if self.open_elements.top_is_html("option") {
                    let _ = self.open_elements.pop();
                }
                self.reconstruct_the_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            "rb" | "rtc" => {
                if self.open_elements.has_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(None);
                    if !self.open_elements.top_is_html("ruby") {
                        self.unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            "rp" | "rt" => {
                if self.open_elements.has_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(Some("rtc"));
                    if !(self.open_elements.top_is_html("rtc")
                        || self.open_elements.top_is_html("ruby"))
                    {
                        self.unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "math""
            "math" => self.insert_foreign_root(token, Namespace::MathMl),

            // "A start tag whose tag name is "svg""
            "svg" => self.insert_foreign_root(token, Namespace::Svg),

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr""
            // "Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.unexpected(token),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token."
            _ => {
                self.reconstruct_the_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
        Step::Done
    }

    fn in_body_end_tag(&mut self, name: &str, token: &Token) -> Step {
        match name {
            "template" => return self.handle_in_head_mode(token),

            // "An end tag whose tag name is "body""
            // "An end tag whose tag name is "html""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope("body", Scope::Default) {
                    self.parse_error(ParseError::NotInScope("body".to_owned()));
                    return Step::Done;
                }
                // "Otherwise, if there is a node in the stack of open elements
                // that is not either a dd element, ... or the html element,
                // then this is a parse error."
                if self
                    .open_elements
                    .iter()
                    .any(|(_, open)| !may_remain_open_at_eof(open))
                {
                    self.parse_error(ParseError::UnclosedChildren(name.to_owned()));
                }
                // "Switch the insertion mode to "after body"." For html:
                // "Reprocess the token."
                if name == "html" {
                    return Step::Reprocess(InsertionMode::AfterBody);
                }
                self.switch_mode(InsertionMode::AfterBody);
            }

            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element with the same tag name as
                // that of the token, then this is a parse error; ignore the
                // token. Otherwise, run these steps: 1. Generate implied end
                // tags. 2. If the current node is not an HTML element with the
                // same tag name as that of the token, then this is a parse
                // error. 3. Pop elements from the stack of open elements until
                // an HTML element with the same tag name as the token has been
                // popped from the stack."
                self.close_element_in_scope(name, Scope::Default, None);
            }

            // "An end tag whose tag name is "form""
            "form" => {
                if self.open_elements.contains_html("template") {
                    self.close_element_in_scope("form", Scope::Default, None);
                    return Step::Done;
                }
                // "1. Let node be the element that the form element pointer
                // is set to, or null if it is not set to an element.
                // 2. Set the form element pointer to null.
                // 3. If node is null or if the stack of open elements does not
                // have node in scope, then this is a parse error; return and
                // ignore the token.
                // 4. Generate implied end tags.
                // 5. If the current node is not node, then this is a parse error.
                // 6. Remove node from the stack of open elements."
                let node = self.form_element_pointer.take();
                let Some(node) =
                    node.filter(|&form| self.open_elements.has_element_in_scope(form, Scope::Default))
                else {
                    self.parse_error(ParseError::NotInScope("form".to_owned()));
                    return Step::Done;
                };
                self.generate_implied_end_tags(None);
                if self.current_node() != node {
                    self.parse_error(ParseError::UnclosedChildren("form".to_owned()));
                }
                self.open_elements.remove(node);
            }

            // "An end tag whose tag name is "p""
            // "If the stack of open elements does not have a p element in
            // button scope, then this is a parse error; insert an HTML
            // element for a "p" start tag token with no attributes. Close a p
            // element."
            "p" => {
                if !self.open_elements.has_in_scope("p", Scope::Button) {
                    self.parse_error(ParseError::NotInScope("p".to_owned()));
                    let _ = self.insert_html_element_named("p");
                }
                self.close_a_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => self.close_element_in_scope("li", Scope::ListItem, Some("li")),

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.close_element_in_scope(name, Scope::Default, Some(name)),

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.open_elements.has_any_in_scope(HEADINGS, Scope::Default) {
                    self.parse_error(ParseError::NotInScope(name.to_owned()));
                    return Step::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.open_elements.top_is_html(name) {
                    self.parse_error(ParseError::UnclosedChildren(name.to_owned()));
                }
                self.open_elements.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u""
            // "Run the adoption agency algorithm for the token."
            _ if is_formatting(name) => {
                if self.run_adoption_agency(name) == AdoptionOutcome::AnyOtherEndTag {
                    self.any_other_end_tag(name);
                }
            }

            // "An end tag token whose tag name is one of: "applet", "marquee", "object""
            "applet" | "marquee" | "object" => {
                if !self.open_elements.has_in_scope(name, Scope::Default) {
                    self.parse_error(ParseError::NotInScope(name.to_owned()));
                    return Step::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.open_elements.top_is_html(name) {
                    self.parse_error(ParseError::UnclosedChildren(name.to_owned()));
                }
                self.open_elements.pop_until_html_named(name);
                self.active_formatting.clear_up_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br"
            // start tag token with no attributes, rather than the end tag
            // token that it actually is."
            "br" => {
                self.unexpected(token);
                self.insert_void_element(&Token::start_tag("br", Vec::new()));
                self.frameset_ok = false;
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
        Step::Done
    }

    /// The "any other end tag" steps of "in body".
    pub(crate) fn any_other_end_tag(&mut self, name: &str) {
        // "1. Initialize node to be the current node (the bottommost node of
        // the stack).
        // 2. Loop: If node is an HTML element with the same tag name as the
        // token, then: 1. Generate implied end tags, except for HTML elements
        // with the same tag name as the token. 2. If node is not the current
        // node, then this is a parse error. 3. Pop all the nodes from the
        // current node up to node, including node, then stop these steps.
        // 3. Otherwise, if node is in the special category, then this is a
        // parse error; ignore the token, and return.
        // 4. Set node to the previous entry in the stack of open elements.
        // 5. Return to the step labeled loop."
        let found = self
            .open_elements
            .iter()
            .rev()
            .find(|(_, open)| open.is_html(name) || is_special(open))
            .map(|(node, open)| (node, open.is_html(name)));
        match found {
            Some((node, true)) => {
                self.generate_implied_end_tags(Some(name));
                if self.current_node() != node {
                    self.parse_error(ParseError::UnclosedChildren(name.to_owned()));
                }
                self.open_elements.pop_until(node);
            }
            _ => self.parse_error(ParseError::UnexpectedEndTag(name.to_owned())),
        }
    }

    /// Generate implied end tags (except for `except`), then pop until an
    /// HTML element named `name` is gone, reporting what did not match.
    fn close_element_in_scope(&mut self, name: &str, scope: Scope, except: Option<&str>) {
        if !self.open_elements.has_in_scope(name, scope) {
            self.parse_error(ParseError::NotInScope(name.to_owned()));
            return;
        }
        self.generate_implied_end_tags(except);
        if !self.open_elements.top_is_html(name) {
            self.parse_error(ParseError::UnclosedChildren(name.to_owned()));
        }
        self.open_elements.pop_until_html_named(name);
    }

    /// The loop shared by the `li`, `dd` and `dt` start tags: close the
    /// nearest open list item of one of `closes`, unless a special element
    /// other than `address`, `div` and `p` comes first.
    fn close_list_item(&mut self, closes: &[&str]) {
        let target = self.open_elements.iter().rev().find_map(|(_, open)| {
            if let Some(local) = closes.iter().find(|local| open.is_html(local)) {
                return Some(Some((*local).to_owned()));
            }
            if is_special(open)
                && !(open.is_html("address") || open.is_html("div") || open.is_html("p"))
            {
                return Some(None);
            }
            None
        });
        if let Some(Some(local)) = target {
            // "1. Generate implied end tags, except for li elements.
            // 2. If the current node is not an li element, then this is a
            // parse error.
            // 3. Pop elements from the stack of open elements until an li
            // element has been popped from the stack.
            // 4. Jump to the step labeled done below."
            self.generate_implied_end_tags(Some(&local));
            if !self.open_elements.top_is_html(&local) {
                self.parse_error(ParseError::UnclosedChildren(local.clone()));
            }
            self.open_elements.pop_until_html_named(&local);
        }
    }

    /// The second element on the stack of open elements, if it is a body element.
    fn second_element_if_body(&self) -> Option<NodeId> {
        self.open_elements
            .name_at(1)
            .is_some_and(|name| name.is_html("body"))
            .then(|| self.open_elements.get(1))
            .flatten()
    }

    /// Add each attribute of `token` that `element` does not have yet.
    fn merge_attributes(&mut self, element: NodeId, token: &Token) {
        if let Some(data) = self.tree.as_element_mut(element) {
            for attr in token.attributes() {
                let _ = data.set_attribute(attr.clone());
            }
        }
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Push onto the list of active formatting
    /// elements that element."
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_the_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.active_formatting.push(element, token.clone());
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Immediately pop the current node off the stack
    /// of open elements. Acknowledge the token's self-closing flag, if it is
    /// set."
    fn insert_void_element(&mut self, token: &Token) {
        self.reconstruct_the_active_formatting_elements();
        let _ = self.insert_html_element(token);
        let _ = self.open_elements.pop();
        self.acknowledge_self_closing_flag();
    }

    /// The `math` and `svg` start tags of "in body".
    ///
    /// "Reconstruct the active formatting elements, if any. Adjust MathML
    /// attributes for the token. (This fixes the case of MathML attributes
    /// that are not all lowercase.) Adjust foreign attributes for the token.
    /// (This fixes the use of namespaced attributes, in particular XLink.)
    /// Insert a foreign element for the token, with MathML namespace and
    /// false. If the token has its self-closing flag set, pop the current
    /// node off the stack of open elements and acknowledge the token's
    /// self-closing flag."
    fn insert_foreign_root(&mut self, token: &Token, ns: Namespace) {
        let Token::StartTag {
            name,
            self_closing,
            attributes,
        } = token
        else {
            return;
        };
        self.reconstruct_the_active_formatting_elements();
        let mut attributes = attributes.clone();
        if ns == Namespace::MathMl {
            adjust_mathml_attributes(&mut attributes);
        } else {
            adjust_svg_attributes(&mut attributes);
        }
        adjust_foreign_attributes(&mut attributes);
        let _ = self.insert_element(QualName::new(ns, name.as_str()), attributes, false);
        if *self_closing {
            let _ = self.open_elements.pop();
            self.acknowledge_self_closing_flag();
        }
    }
}
