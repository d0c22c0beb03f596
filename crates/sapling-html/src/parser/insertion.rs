//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//!
//! The tree mutation helpers shared by every insertion mode.

use sapling_dom::{Attribute, NodeId, NodeType, QualName};

use super::core::{HTMLParser, InsertionMode};
use super::error::ParseError;
use super::tags::{has_implied_end_tag, has_implied_end_tag_thoroughly, Scope};
use crate::tokenizer::{Token, TokenizerState};

/// Where a new node goes: as a child of `parent`, before `before` or at the
/// end when `before` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InsertionLocation {
    pub(crate) parent: NodeId,
    pub(crate) before: Option<NodeId>,
}

impl InsertionLocation {
    const fn inside(parent: NodeId) -> Self {
        Self {
            parent,
            before: None,
        }
    }
}

impl HTMLParser {
    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(crate) fn appropriate_place_for_inserting_a_node(
        &self,
        override_target: Option<NodeId>,
    ) -> InsertionLocation {
        // "1. If there was an override target specified, then let target be
        // the override target. Otherwise, let target be the current node."
        let target = override_target.unwrap_or_else(|| self.current_node());

        // "2. Determine the adjusted insertion location using the first
        // matching steps from the following list:"
        let target_is_table_part = self.tree.element_name(target).is_some_and(|name| {
            ["table", "tbody", "tfoot", "thead", "tr"]
                .iter()
                .any(|local| name.is_html(local))
        });
        if !(self.foster_parenting && target_is_table_part) {
            // "Otherwise: Let adjusted insertion location be inside target,
            // after its last child (if any)."
            return InsertionLocation::inside(target);
        }

        // "If foster parenting is enabled and target is a table, tbody,
        // tfoot, thead, or tr element"
        let last_template = self.open_elements.find_last_html("template");
        let last_table = self.open_elements.find_last_html("table");

        // "3. If there is a last template and either there is no last table,
        // or there is one, but last template is lower (more recently added)
        // than last table in the stack of open elements, then: let adjusted
        // insertion location be inside last template's template contents,
        // after its last child (if any), and abort these steps."
        if let Some((template, template_index)) = last_template
            && last_table.is_none_or(|(_, table_index)| template_index > table_index)
        {
            return InsertionLocation::inside(template);
        }

        // "4. If there is no last table, then let adjusted insertion location
        // be inside the first element in the stack of open elements (the html
        // element), after its last child (if any), and abort these steps.
        // (fragment case)"
        let Some((table, table_index)) = last_table else {
            return InsertionLocation::inside(self.open_elements.bottom().unwrap_or(NodeId::ROOT));
        };

        // "5. If last table has a parent node, then let adjusted insertion
        // location be inside last table's parent node, immediately before
        // last table, and abort these steps."
        if let Some(parent) = self.tree.parent(table) {
            return InsertionLocation {
                parent,
                before: Some(table),
            };
        }

        // "6. Let previous element be the element immediately above last
        // table in the stack of open elements.
        // 7. Let adjusted insertion location be inside previous element,
        // after its last child (if any)."
        let previous = table_index
            .checked_sub(1)
            .and_then(|index| self.open_elements.get(index))
            .unwrap_or(NodeId::ROOT);
        InsertionLocation::inside(previous)
    }

    /// Put `node` at `location`.
    pub(crate) fn insert_at(&mut self, location: InsertionLocation, node: NodeId) {
        self.tree.insert_before(location.parent, node, location.before);
    }

    /// [§ 13.2.6.1 Create an element for the token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Script execution, custom elements and form association have no
    /// counterpart here, so creating an element is allocating it with the
    /// token's attributes.
    pub(crate) fn create_element(&mut self, name: QualName, attributes: Vec<Attribute>) -> NodeId {
        self.tree.alloc_element(name, attributes)
    }

    /// Create an HTML element for a start tag token.
    pub(crate) fn create_element_for_token(&mut self, token: &Token) -> NodeId {
        let name = QualName::html(token.tag_name().unwrap_or_default());
        self.create_element(name, token.attributes().to_vec())
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "1. Let the adjusted insertion location be the appropriate place for
    /// inserting a node.
    /// 2. Let element be the result of creating an element for the token in
    /// the given namespace, with the intended parent being the element in
    /// which the adjusted insertion location finds itself.
    /// 3. If onlyAddToElementStack is false, then run insert an element at
    /// the adjusted insertion location with element.
    /// 4. Push element onto the stack of open elements so that it is the new
    /// current node.
    /// 5. Return element."
    pub(crate) fn insert_element(
        &mut self,
        name: QualName,
        attributes: Vec<Attribute>,
        only_add_to_element_stack: bool,
    ) -> NodeId {
        let location = self.appropriate_place_for_inserting_a_node(None);
        let element = self.create_element(name.clone(), attributes);
        if !only_add_to_element_stack {
            self.insert_at(location, element);
        }
        self.open_elements.push(element, name);
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "To insert an HTML element given a token token: insert a foreign
    /// element given token, the HTML namespace, and false."
    pub(crate) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        let name = QualName::html(token.tag_name().unwrap_or_default());
        self.insert_element(name, token.attributes().to_vec(), false)
    }

    /// "insert an HTML element for a "..." start tag token with no attributes"
    pub(crate) fn insert_html_element_named(&mut self, local: &str) -> NodeId {
        self.insert_element(QualName::html(local), Vec::new(), false)
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(crate) fn insert_character(&mut self, c: char) {
        let mut buffer = [0; 4];
        self.insert_text(c.encode_utf8(&mut buffer));
    }

    /// Insert a run of characters as [`insert_character`](Self::insert_character) would.
    pub(crate) fn insert_text(&mut self, text: &str) {
        // "2. Let the adjusted insertion location be the appropriate place
        // for inserting a node."
        let location = self.appropriate_place_for_inserting_a_node(None);

        // "3. If the adjusted insertion location is inside a Document node,
        // then ignore the token."
        if matches!(
            self.tree.get(location.parent).map(|node| &node.node_type),
            Some(NodeType::Document)
        ) {
            return;
        }

        // "4. If there is a Text node immediately before the adjusted
        // insertion location, then append data to that Text node's data."
        let previous = match location.before {
            Some(before) => self.tree.prev_sibling(before),
            None => self.tree.last_child(location.parent),
        };
        if let Some(previous) = previous
            && self.tree.as_text(previous).is_some()
        {
            self.tree.append_text(previous, text);
            return;
        }

        // "5. Otherwise, create a new Text node whose data is data and whose
        // node document is the same as that of the element in which the
        // adjusted insertion location finds itself, and insert the newly
        // created node at the adjusted insertion location."
        let node = self.tree.alloc(NodeType::Text(text.to_string()));
        self.insert_at(location, node);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(crate) fn insert_comment(&mut self, data: &str) {
        let location = self.appropriate_place_for_inserting_a_node(None);
        let node = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.insert_at(location, node);
    }

    /// Insert a comment as the last child of `parent`, as for "Insert a
    /// comment as the last child of the Document object" and "...of the first
    /// element in the stack of open elements (the html element)".
    pub(crate) fn insert_comment_as_last_child_of(&mut self, parent: NodeId, data: &str) {
        let node = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(parent, node);
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// "1. Insert an HTML element for the token.
    /// 2. If the algorithm that was invoked is the generic raw text element
    /// parsing algorithm, switch the tokenizer to the RAWTEXT state;
    /// otherwise the algorithm invoked was the generic RCDATA element parsing
    /// algorithm, switch the tokenizer to the RCDATA state.
    /// 3. Set the original insertion mode to the current insertion mode.
    /// 4. Then, switch the insertion mode to "text"."
    pub(crate) fn parse_text_element(&mut self, token: &Token, state: TokenizerState) {
        let _ = self.insert_html_element(token);
        self.switch_tokenizer_to(state);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.switch_mode(InsertionMode::Text);
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// Pops implied-end-tag elements, stopping at an HTML element named
    /// `except` when one is given.
    pub(crate) fn generate_implied_end_tags(&mut self, except: Option<&str>) {
        self.open_elements.pop_while(|name| {
            has_implied_end_tag(name) && except.is_none_or(|except| !name.is_html(except))
        });
    }

    /// "generate all implied end tags thoroughly"
    pub(crate) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        self.open_elements.pop_while(has_implied_end_tag_thoroughly);
    }

    /// [§ 13.2.6.4.7 Close a p element](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "1. Generate implied end tags, except for p elements.
    /// 2. If the current node is not a p element, then this is a parse error.
    /// 3. Pop elements from the stack of open elements until a p element has
    /// been popped from the stack."
    pub(crate) fn close_a_p_element(&mut self) {
        self.generate_implied_end_tags(Some("p"));
        if !self.open_elements.top_is_html("p") {
            self.parse_error(ParseError::UnclosedChildren("p".to_string()));
        }
        self.open_elements.pop_until_html_named("p");
    }

    /// Close a `p` element if one is in button scope, as many start tags do first.
    pub(crate) fn close_p_if_in_button_scope(&mut self) {
        if self.open_elements.has_in_scope("p", Scope::Button) {
            self.close_a_p_element();
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// Reopens formatting elements that were implicitly closed, so that
    /// `<b>1<p>2` puts the `2` in bold too. Running it twice in a row changes
    /// nothing the second time.
    pub fn reconstruct_the_active_formatting_elements(&mut self) {
        // "1. If there are no entries in the list of active formatting
        // elements, then there is nothing to reconstruct; stop this algorithm.
        // 2. If the last (most recently added) entry in the list of active
        // formatting elements is a marker, or if it is an element that is in
        // the stack of open elements, then there is nothing to reconstruct;
        // stop this algorithm."
        let Some(last) = self.active_formatting.last() else {
            return;
        };
        if last
            .node()
            .is_none_or(|node| self.open_elements.contains(node))
        {
            return;
        }

        // "3. Let entry be the last (most recently added) element in the list
        // of active formatting elements."
        let mut index = self.active_formatting.len() - 1;

        // "4. Rewind: If there are no entries before entry in the list of
        // active formatting elements, then jump to the step labeled create.
        // 5. Let entry be the entry one earlier than entry in the list of
        // active formatting elements.
        // 6. If entry is neither a marker nor an element that is also in the
        // stack of open elements, go to the step labeled rewind.
        // 7. Advance: Let entry be the element one later than entry in the
        // list of active formatting elements."
        while index > 0 {
            let earlier = &self.active_formatting.entries()[index - 1];
            if earlier
                .node()
                .is_none_or(|node| self.open_elements.contains(node))
            {
                break;
            }
            index -= 1;
        }

        // "8. Create: Insert an HTML element for the token for which the
        // element entry was created, to obtain new element.
        // 9. Replace the entry for entry in the list with an entry for new
        // element.
        // 10. If the entry for new element in the list of active formatting
        // elements is not the last entry in the list, return to the step
        // labeled advance."
        while index < self.active_formatting.len() {
            let Some(token) = self.active_formatting.entries()[index].token().cloned() else {
                break;
            };
            let element = self.insert_html_element(&token);
            self.active_formatting.replace_at(index, element, token);
            index += 1;
        }
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(crate) fn reset_insertion_mode_appropriately(&mut self) {
        let mode = self.appropriate_insertion_mode();
        self.switch_mode(mode);
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        // "1. Let last be false.
        // 2. Let node be the last node in the stack of open elements."
        for index in (0..self.open_elements.len()).rev() {
            // "3. Loop: If node is the first node in the stack of open
            // elements, then set last to true, and, if the parser was created
            // as part of the HTML fragment parsing algorithm (fragment case),
            // set node to the context element passed to that algorithm."
            let last = index == 0;
            let name = match (&self.context_element, last) {
                (Some((_, context)), true) => context,
                _ => match self.open_elements.name_at(index) {
                    Some(name) => name,
                    None => continue,
                },
            };
            if name.ns != sapling_dom::Namespace::Html {
                if last {
                    return InsertionMode::InBody;
                }
                continue;
            }

            match name.local.as_str() {
                // "4. If node is a select element, run these substeps:"
                "select" => {
                    // "1. If last is true, jump to the step below labeled done."
                    if !last {
                        // "2. Let ancestor be node.
                        // 3. Loop: If ancestor is the first node in the stack
                        // of open elements, jump to the step below labeled done.
                        // 4. Let ancestor be the node before ancestor in the
                        // stack of open elements.
                        // 5. If ancestor is a template node, jump to the step
                        // below labeled done.
                        // 6. If ancestor is a table node, switch the insertion
                        // mode to "in select in table" and return."
                        for ancestor in (0..index).rev() {
                            match self.open_elements.name_at(ancestor) {
                                Some(n) if n.is_html("template") => break,
                                Some(n) if n.is_html("table") => {
                                    return InsertionMode::InSelectInTable;
                                }
                                _ => {}
                            }
                        }
                    }
                    // "8. Done: Switch the insertion mode to "in select" and return."
                    return InsertionMode::InSelect;
                }
                // "5. If node is a td or th element and last is false, then
                // switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => return InsertionMode::InCell,
                "tr" => return InsertionMode::InRow,
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                "caption" => return InsertionMode::InCaption,
                "colgroup" => return InsertionMode::InColumnGroup,
                "table" => return InsertionMode::InTable,
                // "11. If node is a template element, then switch the insertion
                // mode to the current template insertion mode and return."
                "template" => {
                    return self
                        .current_template_insertion_mode()
                        .unwrap_or(InsertionMode::InTemplate);
                }
                // "12. If node is a head element and last is false, then switch
                // the insertion mode to "in head" and return."
                "head" if !last => return InsertionMode::InHead,
                "body" => return InsertionMode::InBody,
                "frameset" => return InsertionMode::InFrameset,
                // "15. If node is an html element, run these substeps:
                // 1. If the head element pointer is null, switch the insertion
                // mode to "before head" and return. (fragment case)
                // 2. Otherwise, the head element pointer is not null, switch
                // the insertion mode to "after head" and return."
                "html" => {
                    return if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ => {}
            }

            // "16. If last is true, then switch the insertion mode to "in
            // body" and return. (fragment case)"
            if last {
                return InsertionMode::InBody;
            }
            // "17. Let node now be the node before node in the stack of open
            // elements. 18. Return to the step labeled loop."
        }
        InsertionMode::InBody
    }

    /// "clear the stack back to a table context": pop until the current
    /// node is a table, template, or html element.
    pub(crate) fn clear_the_stack_back_to_a_table_context(&mut self) {
        self.open_elements
            .pop_while(|name| !["table", "template", "html"].iter().any(|l| name.is_html(l)));
    }

    /// "clear the stack back to a table body context"
    pub(crate) fn clear_the_stack_back_to_a_table_body_context(&mut self) {
        self.open_elements.pop_while(|name| {
            !["tbody", "tfoot", "thead", "template", "html"]
                .iter()
                .any(|l| name.is_html(l))
        });
    }

    /// "clear the stack back to a table row context"
    pub(crate) fn clear_the_stack_back_to_a_table_row_context(&mut self) {
        self.open_elements
            .pop_while(|name| !["tr", "template", "html"].iter().any(|l| name.is_html(l)));
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "1. Generate implied end tags.
    /// 2. If the current node is not now a td element or a th element, then
    /// this is a parse error.
    /// 3. Pop elements from the stack of open elements stack until a td
    /// element or a th element has been popped from the stack.
    /// 4. Clear the list of active formatting elements up to the last marker.
    /// 5. Switch the insertion mode to "in row"."
    pub(crate) fn close_the_cell(&mut self) {
        self.generate_implied_end_tags(None);
        if !(self.open_elements.top_is_html("td") || self.open_elements.top_is_html("th")) {
            let name = self.current_node_name().local.clone();
            self.parse_error(ParseError::UnclosedChildren(name));
        }
        self.open_elements.pop_until_one_of(&["td", "th"]);
        self.active_formatting.clear_up_to_last_marker();
        self.switch_mode(InsertionMode::InRow);
    }

    /// Report every element still open at end of file that the standard
    /// does not allow to stay open silently.
    pub(crate) fn check_open_elements_at_eof(&mut self) {
        let unexpected = self
            .open_elements
            .iter()
            .find(|(_, name)| !super::tags::may_remain_open_at_eof(name))
            .map(|(_, name)| name.local.clone());
        if let Some(name) = unexpected {
            self.parse_error(ParseError::EofWithOpenElement(name));
        }
    }
}
