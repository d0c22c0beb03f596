//! DOM tree implementation for the sapling parser.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. The
//! tree builder's stack of open elements and list of active formatting
//! elements hold `NodeId`s as non-owning handles; only the [`DomTree`] owns
//! nodes. Nodes are never freed during a parse, so a handle stays valid even
//! after its node is detached.

use std::fmt;

pub mod dump;

pub use dump::dump;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 2.2 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// The namespaces an HTML parser can place elements and attributes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// "The HTML namespace is `http://www.w3.org/1999/xhtml`."
    Html,
    /// "The SVG namespace is `http://www.w3.org/2000/svg`."
    Svg,
    /// "The MathML namespace is `http://www.w3.org/1998/Math/MathML`."
    MathMl,
    /// "The XLink namespace is `http://www.w3.org/1999/xlink`."
    XLink,
    /// "The XML namespace is `http://www.w3.org/XML/1998/namespace`."
    Xml,
    /// "The XMLNS namespace is `http://www.w3.org/2000/xmlns/`."
    Xmlns,
}

impl Namespace {
    /// The namespace URL.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::XLink => "http://www.w3.org/1999/xlink",
            Self::Xml => "http://www.w3.org/XML/1998/namespace",
            Self::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }
}

/// A namespace plus local name.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
/// "Elements have an associated namespace, namespace prefix, local name..."
///
/// Every name comparison the tree builder makes ("an HTML element with the
/// same tag name", "a `MathML` `mi` element") is a `QualName` comparison, so a
/// `<title>` inside `<svg>` never satisfies a lookup for the HTML `title`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualName {
    /// The element's namespace.
    pub ns: Namespace,
    /// The element's local name.
    pub local: String,
}

impl QualName {
    /// A name in `ns`.
    #[must_use]
    pub fn new(ns: Namespace, local: impl Into<String>) -> Self {
        Self {
            ns,
            local: local.into(),
        }
    }

    /// A name in the HTML namespace.
    #[must_use]
    pub fn html(local: impl Into<String>) -> Self {
        Self::new(Namespace::Html, local)
    }

    /// Whether this is `local` in namespace `ns`.
    #[must_use]
    pub fn is(&self, ns: Namespace, local: &str) -> bool {
        self.ns == ns && self.local == local
    }

    /// Whether this is the HTML element `local`.
    #[must_use]
    pub fn is_html(&self, local: &str) -> bool {
        self.is(Namespace::Html, local)
    }
}

impl fmt::Display for QualName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ns {
            Namespace::Svg => write!(f, "svg {}", self.local),
            Namespace::MathMl => write!(f, "math {}", self.local),
            _ => f.write_str(&self.local),
        }
    }
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// "Attr nodes have a namespace (null or a non-empty string), namespace
/// prefix (null or a non-empty string), local name (a non-empty string),
/// value (a string)..."
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Local name, e.g. `href` for `xlink:href`.
    pub name: String,
    /// Attribute value.
    pub value: String,
    /// Namespace, set only for adjusted foreign attributes.
    pub namespace: Option<Namespace>,
    /// Namespace prefix, e.g. `xlink`.
    pub prefix: Option<String>,
}

impl Attribute {
    /// An attribute in no namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
            prefix: None,
        }
    }

    /// The name as written in markup: `prefix:name` or `name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated mode: "no-quirks", "quirks", or
/// "limited-quirks"."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuirksMode {
    /// Standards mode.
    #[default]
    NoQuirks,
    /// Almost-standards mode.
    LimitedQuirks,
    /// Quirks mode.
    Quirks,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
/// "Each node has an associated node document... and parent (null or an element)."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    Doctype(DoctypeData),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
///
/// "Doctypes have an associated name, public ID, and system ID."
/// "When a doctype is created, its name is always given. Unless explicitly
/// given when a doctype is created, its public ID and system ID are the
/// empty string."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctypeData {
    /// The doctype name.
    pub name: String,
    /// The public identifier, or empty.
    pub public_id: String,
    /// The system identifier, or empty.
    pub system_id: String,
}

/// Element-specific data.
///
/// Attributes are kept in source order. The tokenizer already dropped
/// duplicates, and [`ElementData::set_attribute`] never overwrites, so the
/// first occurrence of a name always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Namespace and local name.
    pub name: QualName,
    /// "An element has an associated attribute list"
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Element data for `name` with `attrs`.
    #[must_use]
    pub const fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        Self { name, attrs }
    }

    /// The local name.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.name.local
    }

    /// The element's namespace.
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.name.ns
    }

    /// Whether this is the HTML element `local`.
    #[must_use]
    pub fn is_html(&self, local: &str) -> bool {
        self.name.is_html(local)
    }

    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// Looks up an attribute by its qualified name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.qualified_name() == name)
            .map(|attr| attr.value.as_str())
    }

    /// [§ 4.9 hasAttribute](https://dom.spec.whatwg.org/#dom-element-hasattribute)
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Add `attr` unless an attribute with the same qualified name exists.
    ///
    /// Returns whether the attribute was added. Used when a stray `<html>` or
    /// `<body>` start tag merges its attributes into an existing element:
    /// "add the attribute and its corresponding value to that element" only
    /// "if the attribute is not already present".
    pub fn set_attribute(&mut self, attr: Attribute) -> bool {
        if self.has_attribute(&attr.qualified_name()) {
            return false;
        }
        self.attrs.push(attr);
        true
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
    quirks_mode: QuirksMode,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
            quirks_mode: QuirksMode::NoQuirks,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The document's quirks mode.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Set the document's quirks mode.
    pub const fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// Allocate a detached element.
    pub fn alloc_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(name, attrs)))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`. A child that already
    /// has a parent is removed from it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`, or at the
    /// end when `reference` is `None`. A child that already has a parent is
    /// removed from it first.
    ///
    /// # Panics
    /// Panics if `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let Some(reference) = reference else {
            self.append_child(parent, child);
            return;
        };
        self.detach(child);

        let index = self.index_in_parent(parent, reference);
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);

        let prev = index
            .checked_sub(1)
            .map(|i| self.nodes[parent.0].children[i]);
        self.nodes[child.0].prev_sibling = prev;
        self.nodes[child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(child);
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = Some(child);
        }
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`. The node stays in the arena and can be
    /// re-inserted elsewhere.
    ///
    /// # Panics
    /// Panics if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.index_in_parent(parent, child);
        let _ = self.nodes[parent.0].children.remove(index);

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }
        self.nodes[child.0].parent = None;
    }

    /// Remove `node` from its parent, if it has one.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.remove_child(parent, node);
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = self.nodes[from.0].children.clone();
        for child in children {
            self.append_child(to, child);
        }
    }

    /// Append `data` to the text node `id`.
    ///
    /// # Panics
    /// Panics if `id` is not a text node.
    pub fn append_text(&mut self, id: NodeId, data: &str) {
        match &mut self.nodes[id.0].node_type {
            NodeType::Text(text) => text.push_str(data),
            other => panic!("append_text on non-text node {other:?}"),
        }
    }

    fn index_in_parent(&self, parent: NodeId, child: NodeId) -> usize {
        self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == child)
            .unwrap_or_else(|| panic!("{child:?} is not a child of {parent:?}"))
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The qualified name of an element node.
    #[must_use]
    pub fn element_name(&self, id: NodeId) -> Option<&QualName> {
        self.as_element(id).map(|e| &e.name)
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenation of every descendant text node, in tree order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.as_text(id) {
            out.push_str(text);
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id)
                    .is_some_and(|e| e.is_html("body") || e.is_html("frameset"))
            })
            .copied()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
