//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! "Initially, the stack of open elements is empty. The stack grows
//! downwards; the topmost node on the stack is the first one added to the
//! stack, and the bottommost node of the stack is the most recently added
//! node in the stack."
//!
//! The stack stores `NodeId` handles into the tree together with each
//! element's name, so scope checks never need to look at the tree. Index 0
//! is the `html` element; the last entry is the current node. The methods
//! `top` and `bottom` follow the usual data structure sense (top is the
//! current node), not the standard's "topmost"/"bottommost" wording.

use sapling_dom::{NodeId, QualName};

use super::tags::Scope;

#[derive(Debug, Clone)]
struct Entry {
    id: NodeId,
    name: QualName,
}

/// The stack of open elements.
#[derive(Debug, Clone, Default)]
pub struct OpenElements {
    entries: Vec<Entry>,
}

impl OpenElements {
    /// An empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of open elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push `id` as the new current node.
    ///
    /// # Panics
    /// Panics if `id` is already open. An element is never on the stack twice.
    pub fn push(&mut self, id: NodeId, name: QualName) {
        assert!(
            !self.contains(id),
            "{id:?} <{name}> pushed onto the stack of open elements twice"
        );
        self.entries.push(Entry { id, name });
    }

    /// Pop the current node.
    ///
    /// # Panics
    /// Panics if the stack is empty. Every caller checks for an open element
    /// first, so an empty pop is a tree builder defect.
    pub fn pop(&mut self) -> NodeId {
        self.entries
            .pop()
            .map(|entry| entry.id)
            .expect("popped an empty stack of open elements")
    }

    /// Pop elements until `target` has been popped.
    ///
    /// # Panics
    /// Panics if `target` is not open.
    pub fn pop_until(&mut self, target: NodeId) {
        let index = self
            .position(target)
            .unwrap_or_else(|| panic!("pop_until: {target:?} is not open"));
        self.entries.truncate(index);
    }

    /// "Pop elements from the stack of open elements until an HTML element
    /// with the same tag name as the token has been popped from the stack."
    ///
    /// Pops everything when no such element is open.
    pub fn pop_until_html_named(&mut self, local: &str) {
        self.pop_until_one_of(&[local]);
    }

    /// Pop until an HTML element whose tag name is one of `locals` has been
    /// popped.
    pub fn pop_until_one_of(&mut self, locals: &[&str]) {
        while let Some(entry) = self.entries.pop() {
            if locals.iter().any(|local| entry.name.is_html(local)) {
                break;
            }
        }
    }

    /// Pop while the current node's name satisfies `pred`.
    pub fn pop_while(&mut self, mut pred: impl FnMut(&QualName) -> bool) {
        while self.entries.last().is_some_and(|entry| pred(&entry.name)) {
            let _ = self.entries.pop();
        }
    }

    /// "The current node is the bottommost node in this stack of open elements."
    #[must_use]
    pub fn top(&self) -> Option<NodeId> {
        self.entries.last().map(|entry| entry.id)
    }

    /// The name of the current node.
    #[must_use]
    pub fn top_name(&self) -> Option<&QualName> {
        self.entries.last().map(|entry| &entry.name)
    }

    /// Whether the current node is the HTML element `local`.
    #[must_use]
    pub fn top_is_html(&self, local: &str) -> bool {
        self.top_name().is_some_and(|name| name.is_html(local))
    }

    /// The first element pushed; the `html` element once it exists.
    #[must_use]
    pub fn bottom(&self) -> Option<NodeId> {
        self.entries.first().map(|entry| entry.id)
    }

    /// The element at `index`, counting from the `html` element.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    /// The name of the element at `index`.
    #[must_use]
    pub fn name_at(&self, index: usize) -> Option<&QualName> {
        self.entries.get(index).map(|entry| &entry.name)
    }

    /// The name of the open element `id`.
    #[must_use]
    pub fn name_of(&self, id: NodeId) -> Option<&QualName> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.name)
    }

    /// The element pushed just before `id`, i.e. its parent in the stack.
    #[must_use]
    pub fn element_immediately_above(&self, id: NodeId) -> Option<NodeId> {
        let index = self.position(id)?;
        index.checked_sub(1).and_then(|i| self.get(i))
    }

    /// The most recently pushed element named `name`, with its index.
    #[must_use]
    pub fn find_last(&self, name: &QualName) -> Option<(NodeId, usize)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find(|(_, entry)| &entry.name == name)
            .map(|(index, entry)| (entry.id, index))
    }

    /// [`find_last`](Self::find_last) for an HTML element.
    #[must_use]
    pub fn find_last_html(&self, local: &str) -> Option<(NodeId, usize)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find(|(_, entry)| entry.name.is_html(local))
            .map(|(index, entry)| (entry.id, index))
    }

    /// Whether `id` is open.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.position(id).is_some()
    }

    /// Whether any HTML element named `local` is open.
    #[must_use]
    pub fn contains_html(&self, local: &str) -> bool {
        self.entries.iter().any(|entry| entry.name.is_html(local))
    }

    /// Index of `id`, counting from the `html` element.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Insert `id` at `index`.
    ///
    /// # Panics
    /// Panics if `id` is already open or `index` is past the end.
    pub fn insert(&mut self, index: usize, id: NodeId, name: QualName) {
        assert!(!self.contains(id), "{id:?} inserted into the stack twice");
        self.entries.insert(index, Entry { id, name });
    }

    /// Insert `id` immediately below `reference`, so that `reference` is the
    /// element immediately above it.
    ///
    /// # Panics
    /// Panics if `reference` is not open.
    pub fn insert_below(&mut self, reference: NodeId, id: NodeId, name: QualName) {
        let index = self
            .position(reference)
            .unwrap_or_else(|| panic!("insert_below: {reference:?} is not open"));
        self.insert(index + 1, id, name);
    }

    /// Remove `id` wherever it is in the stack.
    ///
    /// # Panics
    /// Panics if `id` is not open.
    pub fn remove(&mut self, id: NodeId) {
        let index = self
            .position(id)
            .unwrap_or_else(|| panic!("remove: {id:?} is not open"));
        let _ = self.entries.remove(index);
    }

    /// Put `new` in the place of `old`.
    ///
    /// # Panics
    /// Panics if `old` is not open.
    pub fn replace(&mut self, old: NodeId, new: NodeId, name: QualName) {
        let index = self
            .position(old)
            .unwrap_or_else(|| panic!("replace: {old:?} is not open"));
        self.entries[index] = Entry { id: new, name };
    }

    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// 1. "Initialize node to be the current node (the bottommost node of the stack)."
    /// 2. "If node is the target node, terminate in a match state."
    /// 3. "Otherwise, if node is one of the element types in list, terminate in a failure state."
    /// 4. "Otherwise, set node to the previous entry in the stack of open
    ///    elements and return to step 2."
    #[must_use]
    pub fn has_in_scope(&self, local: &str, scope: Scope) -> bool {
        self.has_any_in_scope(&[local], scope)
    }

    /// Scope check for several HTML tag names at once, as for `h1`..`h6`.
    #[must_use]
    pub fn has_any_in_scope(&self, locals: &[&str], scope: Scope) -> bool {
        for entry in self.entries.iter().rev() {
            if locals.iter().any(|local| entry.name.is_html(local)) {
                return true;
            }
            if scope.is_boundary(&entry.name) {
                return false;
            }
        }
        false
    }

    /// Scope check for one particular element rather than a tag name.
    #[must_use]
    pub fn has_element_in_scope(&self, id: NodeId, scope: Scope) -> bool {
        for entry in self.entries.iter().rev() {
            if entry.id == id {
                return true;
            }
            if scope.is_boundary(&entry.name) {
                return false;
            }
        }
        false
    }

    /// Open elements from the `html` element to the current node.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &QualName)> + '_ {
        self.entries.iter().map(|entry| (entry.id, &entry.name))
    }

    /// Empty the stack. Used when parsing stops.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
