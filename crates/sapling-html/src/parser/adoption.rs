//! [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Repairs misnested formatting elements such as `<b>1<i>2</b>3</i>`.

use sapling_dom::QualName;

use super::core::HTMLParser;
use super::error::ParseError;
use super::tags::{is_special, Scope};

/// "If outer loop counter is greater than or equal to 8, then return."
const OUTER_LOOP_LIMIT: usize = 8;

/// "If inner loop counter is greater than 3 and node is in the list of
/// active formatting elements, then remove node from the list of active
/// formatting elements."
const INNER_LOOP_LIMIT: usize = 3;

/// How the adoption agency algorithm finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdoptionOutcome {
    /// The end tag was handled.
    Done,
    /// "act as described in the "any other end tag" entry below"
    AnyOtherEndTag,
}

impl HTMLParser {
    /// Run the adoption agency algorithm for an end tag named `subject`.
    pub(crate) fn run_adoption_agency(&mut self, subject: &str) -> AdoptionOutcome {
        // "2. If the current node is an HTML element whose tag name is
        // subject, and the current node is not in the list of active
        // formatting elements, then pop the current node off the stack of
        // open elements and return."
        let current = self.current_node();
        if self.open_elements.top_is_html(subject) && !self.active_formatting.contains(current) {
            let _ = self.open_elements.pop();
            return AdoptionOutcome::Done;
        }

        // "3. Let outer loop counter be 0.
        // 4. While true:"
        for _ in 0..OUTER_LOOP_LIMIT {
            // "3. Let formatting element be the last element in the list of
            // active formatting elements that: is between the end of the list
            // and the last marker in the list, if any, or the start of the
            // list otherwise, and has the tag name subject.
            // If there is no such element, then return and instead act as
            // described in the "any other end tag" entry above."
            let Some(formatting_index) = self.active_formatting.find_element_after_last_marker(subject)
            else {
                return AdoptionOutcome::AnyOtherEndTag;
            };
            let Some(entry) = self.active_formatting.get(formatting_index) else {
                return AdoptionOutcome::AnyOtherEndTag;
            };
            let (Some(formatting_element), Some(formatting_token)) =
                (entry.node(), entry.token().cloned())
            else {
                return AdoptionOutcome::AnyOtherEndTag;
            };

            // "4. If formatting element is not in the stack of open elements,
            // then this is a parse error; remove the element from the list,
            // and return."
            let Some(formatting_stack_index) = self.open_elements.position(formatting_element)
            else {
                self.parse_error(ParseError::FormattingElementNotOpen(subject.to_owned()));
                self.active_formatting.remove_at(formatting_index);
                return AdoptionOutcome::Done;
            };

            // "5. If formatting element is in the stack of open elements, but
            // the element is not in scope, then this is a parse error; return."
            if !self
                .open_elements
                .has_element_in_scope(formatting_element, Scope::Default)
            {
                self.parse_error(ParseError::FormattingElementNotInScope(subject.to_owned()));
                return AdoptionOutcome::Done;
            }

            // "6. If formatting element is not the current node, this is a
            // parse error. (But do not return.)"
            if formatting_element != self.current_node() {
                self.parse_error(ParseError::MisnestedFormattingElement(subject.to_owned()));
            }

            // "7. Let furthest block be the topmost node in the stack of open
            // elements that is lower in the stack than formatting element,
            // and is an element in the special category. There might not be
            // one."
            let furthest = (formatting_stack_index + 1..self.open_elements.len()).find(|&index| {
                self.open_elements.name_at(index).is_some_and(is_special)
            });

            // "8. If there is no furthest block, then the UA must first pop
            // all the nodes from the bottom of the stack of open elements,
            // from the current node up to and including formatting element,
            // then remove formatting element from the list of active
            // formatting elements, and finally return."
            let Some(furthest_block_index) = furthest else {
                self.open_elements.pop_until(formatting_element);
                self.active_formatting.remove(formatting_element);
                return AdoptionOutcome::Done;
            };
            let Some(furthest_block) = self.open_elements.get(furthest_block_index) else {
                return AdoptionOutcome::Done;
            };

            // "9. Let common ancestor be the element immediately above
            // formatting element in the stack of open elements."
            let Some(common_ancestor) = self.open_elements.element_immediately_above(formatting_element)
            else {
                return AdoptionOutcome::Done;
            };

            // "10. Let a bookmark note the position of formatting element in
            // the list of active formatting elements relative to the elements
            // on either side of it in the list."
            let mut bookmark = formatting_index;

            // "11. Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // "12. Let inner loop counter be 0.
            // 13. While true:"
            let mut inner_loop_counter = 0;
            loop {
                // "1. Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // "2. Let node be the element immediately above node in the
                // stack of open elements, or if node is no longer in the stack
                // of open elements (e.g. because it got removed by this
                // algorithm), the element that was immediately above node in
                // the stack of open elements before node was removed."
                node_index -= 1;
                let Some(mut node) = self.open_elements.get(node_index) else {
                    break;
                };

                // "3. If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // "4. If inner loop counter is greater than 3 and node is in
                // the list of active formatting elements, then remove node
                // from the list of active formatting elements."
                let mut node_formatting_index = self.active_formatting.index_of(node);
                if inner_loop_counter > INNER_LOOP_LIMIT
                    && let Some(index) = node_formatting_index
                {
                    self.active_formatting.remove_at(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                    node_formatting_index = None;
                }

                // "5. If node is not in the list of active formatting elements,
                // then remove node from the stack of open elements and continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    self.open_elements.remove(node);
                    continue;
                };

                // "6. Create an element for the token for which the element
                // node was created, in the HTML namespace, with common
                // ancestor as the intended parent; replace the entry for node
                // in the list of active formatting elements with an entry for
                // the new element, replace the entry for node in the stack of
                // open elements with an entry for the new element, and let
                // node be the new element."
                let Some(token) = self
                    .active_formatting
                    .get(node_formatting_index)
                    .and_then(|entry| entry.token().cloned())
                else {
                    break;
                };
                let name = QualName::html(token.tag_name().unwrap_or_default());
                let element = self.create_element_for_token(&token);
                self.active_formatting
                    .replace_at(node_formatting_index, element, token);
                self.open_elements.replace(node, element, name);
                node = element;

                // "7. If last node is furthest block, then move the
                // aforementioned bookmark to be immediately after the new node
                // in the list of active formatting elements."
                if last_node == furthest_block {
                    bookmark = node_formatting_index + 1;
                }

                // "8. Append last node to node."
                self.tree.append_child(node, last_node);

                // "9. Set last node to node."
                last_node = node;
            }

            // "14. Insert whatever last node ended up being in the appropriate
            // place for inserting a node, but using common ancestor as the
            // override target."
            let location = self.appropriate_place_for_inserting_a_node(Some(common_ancestor));
            self.insert_at(location, last_node);

            // "15. Create an element for the token for which formatting
            // element was created, in the HTML namespace, with furthest block
            // as the intended parent."
            let element = self.create_element_for_token(&formatting_token);

            // "16. Take all of the child nodes of furthest block and append
            // them to the element created in the last step.
            // 17. Append that new element to furthest block."
            self.tree.move_children(furthest_block, element);
            self.tree.append_child(furthest_block, element);

            // "18. Remove formatting element from the list of active
            // formatting elements, and insert the new element into the list
            // of active formatting elements at the position of the
            // aforementioned bookmark."
            if let Some(index) = self.active_formatting.index_of(formatting_element) {
                self.active_formatting.remove_at(index);
                if index < bookmark {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.active_formatting.len());
            self.active_formatting
                .insert(bookmark, element, formatting_token.clone());

            // "19. Remove formatting element from the stack of open elements,
            // and insert the new element into the stack of open elements
            // immediately below the position of furthest block in that stack."
            self.open_elements.remove(formatting_element);
            self.open_elements.insert_below(
                furthest_block,
                element,
                QualName::html(formatting_token.tag_name().unwrap_or_default()),
            );
        }

        AdoptionOutcome::Done
    }
}
