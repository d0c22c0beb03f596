//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! "Initially, the list of active formatting elements is empty. It is used
//! to handle mis-nested formatting element tags."

use sapling_dom::NodeId;

use crate::tokenizer::{Attribute, Token};

/// One entry in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingEntry {
    /// A formatting element together with the start tag that created it.
    /// The token is kept so the element can be recreated during
    /// reconstruction and the adoption agency algorithm.
    Element {
        /// The element in the tree.
        node: NodeId,
        /// "the token for which the element was created"
        token: Token,
    },
    /// "A marker is an entry in the list of active formatting elements that
    /// is distinct from any element." Pushed for applet, object, marquee,
    /// template, td, th, and caption.
    Marker,
}

impl FormattingEntry {
    /// The element, unless this is a marker.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        match self {
            Self::Element { node, .. } => Some(*node),
            Self::Marker => None,
        }
    }

    /// The originating token, unless this is a marker.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Element { token, .. } => Some(token),
            Self::Marker => None,
        }
    }

    /// Whether this is a marker.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }
}

/// The list of active formatting elements.
#[derive(Debug, Clone, Default)]
pub struct ActiveFormattingElements {
    entries: Vec<FormattingEntry>,
}

impl ActiveFormattingElements {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FormattingEntry> {
        self.entries.get(index)
    }

    /// The most recently added entry.
    #[must_use]
    pub fn last(&self) -> Option<&FormattingEntry> {
        self.entries.last()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[FormattingEntry] {
        &self.entries
    }

    /// The index just past the last marker, or 0 if there is none. Lookups
    /// that are limited to "after the last marker" start here.
    #[must_use]
    pub fn index_after_last_marker(&self) -> usize {
        self.entries
            .iter()
            .rposition(FormattingEntry::is_marker)
            .map_or(0, |index| index + 1)
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "1. If there are already three elements in the list of active formatting
    /// elements after the last marker, if any, or anywhere in the list if
    /// there are no markers, that have the same tag name, namespace, and
    /// attributes as element, then remove the earliest such element from the
    /// list of active formatting elements. For these purposes, the attributes
    /// must be compared as they were when the elements were created by the
    /// parser; two elements have the same attributes if all their parsed
    /// attributes can be paired such that the two attributes in each pair
    /// have identical names, namespaces, and values (the order of the
    /// attributes does not matter).
    ///
    /// 2. Add element to the list of active formatting elements."
    ///
    /// Formatting elements are always in the HTML namespace, so comparing
    /// the originating tokens compares name, namespace, and attributes.
    pub fn push(&mut self, node: NodeId, token: Token) {
        let start = self.index_after_last_marker();
        let matching: Vec<usize> = self.entries[start..]
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.token().is_some_and(|t| same_element(t, &token)))
            .map(|(offset, _)| start + offset)
            .collect();
        if matching.len() >= 3 {
            let _ = self.entries.remove(matching[0]);
        }
        self.entries.push(FormattingEntry::Element { node, token });
    }

    /// "insert a marker at the end of the list of active formatting elements"
    pub fn push_marker(&mut self) {
        self.entries.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list of
    /// active formatting elements.
    /// 2. Remove entry from the list of active formatting elements.
    /// 3. If entry was a marker, then stop the algorithm at this point.
    /// 4. Go to step 1."
    pub fn clear_up_to_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    /// Insert an element entry at `index`, as the adoption agency does at its
    /// bookmark.
    pub fn insert(&mut self, index: usize, node: NodeId, token: Token) {
        self.entries.insert(index, FormattingEntry::Element { node, token });
    }

    /// Remove the entry for `node`, if it has one.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(index) = self.index_of(node) {
            let _ = self.entries.remove(index);
        }
    }

    /// Remove the entry at `index`.
    pub fn remove_at(&mut self, index: usize) {
        let _ = self.entries.remove(index);
    }

    /// Replace the entry for `old` with an entry for `new`.
    ///
    /// # Panics
    /// Panics if `old` has no entry.
    pub fn replace(&mut self, old: NodeId, new: NodeId, token: Token) {
        let index = self
            .index_of(old)
            .unwrap_or_else(|| panic!("replace: {old:?} is not an active formatting element"));
        self.entries[index] = FormattingEntry::Element { node: new, token };
    }

    /// Replace whatever is at `index` with an entry for `node`.
    pub(crate) fn replace_at(&mut self, index: usize, node: NodeId, token: Token) {
        self.entries[index] = FormattingEntry::Element { node, token };
    }

    /// The index of `node`'s entry.
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.node() == Some(node))
    }

    /// Whether `node` has an entry.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.index_of(node).is_some()
    }

    /// The index of the last element entry after the last marker whose tag
    /// name is `name`.
    #[must_use]
    pub fn find_element_after_last_marker(&self, name: &str) -> Option<usize> {
        let start = self.index_after_last_marker();
        self.entries[start..]
            .iter()
            .rposition(|entry| entry.token().is_some_and(|t| t.tag_name() == Some(name)))
            .map(|offset| start + offset)
    }

    /// The element of [`find_element_after_last_marker`](Self::find_element_after_last_marker).
    #[must_use]
    pub fn last_element_after_last_marker_with_tag_name(&self, name: &str) -> Option<NodeId> {
        self.find_element_after_last_marker(name)
            .and_then(|index| self.entries[index].node())
    }
}

fn same_element(a: &Token, b: &Token) -> bool {
    a.tag_name() == b.tag_name() && same_attributes(a.attributes(), b.attributes())
}

/// Attribute names are unique on a token, so equal length plus every
/// attribute of `a` having an equal counterpart in `b` is a pairing.
fn same_attributes(a: &[Attribute], b: &[Attribute]) -> bool {
    a.len() == b.len() && a.iter().all(|attr| b.contains(attr))
}
