//! Tests for the mutation primitives the tree builder leans on: placing
//! nodes before a table, moving children into a clone, and detaching
//! misnested elements.

use sapling_dom::{DomTree, NodeId, NodeType, QualName, dump};

fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc_element(QualName::html(tag), Vec::new())
}

fn text(tree: &mut DomTree, data: &str) -> NodeId {
    tree.alloc(NodeType::Text(data.to_string()))
}

/// `html > body`, returning the body.
fn document_with_body(tree: &mut DomTree) -> NodeId {
    let html = element(tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let body = element(tree, "body");
    tree.append_child(html, body);
    body
}

/// Every child's sibling links agree with the parent's child list.
fn assert_links_consistent(tree: &DomTree, parent: NodeId) {
    let children = tree.children(parent);
    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.parent(child), Some(parent));
        let prev = i.checked_sub(1).map(|j| children[j]);
        assert_eq!(tree.prev_sibling(child), prev);
        assert_eq!(tree.next_sibling(child), children.get(i + 1).copied());
    }
}

// ========== foster parenting ==========

#[test]
fn test_insert_before_table_fosters_text() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let table = element(&mut tree, "table");
    tree.append_child(body, table);

    let foo = text(&mut tree, "foo");
    tree.insert_before(body, foo, Some(table));

    assert_eq!(tree.children(body), &[foo, table]);
    assert_links_consistent(&tree, body);
    assert!(tree.children(table).is_empty());
}

#[test]
fn test_fostered_text_extends_previous_text_node() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let before = text(&mut tree, "a");
    let table = element(&mut tree, "table");
    tree.append_child(body, before);
    tree.append_child(body, table);

    // The node right before the table is text, so the builder appends to it.
    let previous = tree.prev_sibling(table).unwrap();
    tree.append_text(previous, "b");

    assert_eq!(tree.as_text(before), Some("ab"));
    assert_eq!(tree.children(body).len(), 2);
}

#[test]
fn test_insert_before_none_appends() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let p = element(&mut tree, "p");
    let div = element(&mut tree, "div");
    tree.append_child(body, p);

    tree.insert_before(body, div, None);

    assert_eq!(tree.children(body), &[p, div]);
    assert_links_consistent(&tree, body);
}

// ========== adoption agency re-parenting ==========

/// `<p>1<b>2<p>3</b>4` after the adoption agency runs: the second `p`
/// leaves the `b`, a clone of the `b` takes the `p`'s children, and the
/// clone goes back under the `p`.
#[test]
fn test_furthest_block_children_move_into_clone() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let b = element(&mut tree, "b");
    tree.append_child(body, b);
    let furthest = element(&mut tree, "p");
    tree.append_child(b, furthest);
    let three = text(&mut tree, "3");
    tree.append_child(furthest, three);

    // Common ancestor is body: the furthest block moves out of the b.
    tree.append_child(body, furthest);
    let clone = element(&mut tree, "b");
    tree.move_children(furthest, clone);
    tree.append_child(furthest, clone);

    assert_eq!(
        dump(&tree, NodeId::ROOT),
        "| <html>\n|   <body>\n|     <b>\n|     <p>\n|       <b>\n|         \"3\"\n"
    );
    assert!(tree.children(b).is_empty());
    assert_links_consistent(&tree, body);
    assert_links_consistent(&tree, clone);
}

#[test]
fn test_move_children_keeps_order_and_existing_children() {
    let mut tree = DomTree::new();
    let from = element(&mut tree, "i");
    let to = element(&mut tree, "i");
    let kept = text(&mut tree, "x");
    tree.append_child(to, kept);
    let a = element(&mut tree, "a");
    let span = element(&mut tree, "span");
    tree.append_child(from, a);
    tree.append_child(from, span);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[kept, a, span]);
    assert_links_consistent(&tree, to);
}

#[test]
fn test_move_children_from_empty_node() {
    let mut tree = DomTree::new();
    let from = element(&mut tree, "b");
    let to = element(&mut tree, "b");

    tree.move_children(from, to);

    assert!(tree.children(to).is_empty());
}

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let formatting = element(&mut tree, "b");
    let block = element(&mut tree, "div");
    let after = text(&mut tree, "tail");
    tree.append_child(body, formatting);
    tree.append_child(formatting, block);
    tree.append_child(formatting, after);

    tree.append_child(body, block);

    assert_eq!(tree.children(formatting), &[after]);
    assert_eq!(tree.prev_sibling(after), None);
    assert_eq!(tree.children(body), &[formatting, block]);
    assert_links_consistent(&tree, body);
}

#[test]
fn test_insert_before_sibling_under_same_parent() {
    let mut tree = DomTree::new();
    let row = element(&mut tree, "tr");
    let first = element(&mut tree, "td");
    let second = element(&mut tree, "td");
    let third = element(&mut tree, "td");
    tree.append_child(row, first);
    tree.append_child(row, second);
    tree.append_child(row, third);

    tree.insert_before(row, third, Some(first));

    assert_eq!(tree.children(row), &[third, first, second]);
    assert_links_consistent(&tree, row);
}

// ========== removal ==========

#[test]
fn test_remove_child_relinks_neighbours() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let ids: Vec<NodeId> = ["h1", "frameset", "p"]
        .iter()
        .map(|tag| element(&mut tree, tag))
        .collect();
    for &id in &ids {
        tree.append_child(body, id);
    }

    tree.remove_child(body, ids[1]);

    assert_eq!(tree.children(body), &[ids[0], ids[2]]);
    assert_eq!(tree.parent(ids[1]), None);
    assert_eq!(tree.next_sibling(ids[1]), None);
    assert_links_consistent(&tree, body);
}

#[test]
fn test_detach_body_for_frameset() {
    let mut tree = DomTree::new();
    let body = document_with_body(&mut tree);
    let html = tree.document_element().unwrap();

    tree.detach(body);
    let frameset = element(&mut tree, "frameset");
    tree.append_child(html, frameset);

    assert_eq!(tree.children(html), &[frameset]);
    assert_eq!(tree.body(), None);
}

#[test]
fn test_detach_without_parent_is_noop() {
    let mut tree = DomTree::new();
    let a = element(&mut tree, "a");
    tree.detach(a);
    assert_eq!(tree.parent(a), None);
}

// ========== text and comments ==========

#[test]
fn test_append_text_and_text_content() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);
    let node = text(&mut tree, "Hel");
    tree.append_child(p, node);

    tree.append_text(node, "lo");

    assert_eq!(tree.as_text(node), Some("Hello"));
    assert_eq!(tree.text_content(NodeId::ROOT), "Hello");
}

#[test]
fn test_descendants_and_comments() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let comment = tree.alloc(NodeType::Comment(" note ".to_string()));
    tree.append_child(div, comment);

    assert!(tree.is_descendant_of(comment, NodeId::ROOT));
    assert!(!tree.is_descendant_of(div, comment));
    assert_eq!(tree.as_comment(comment), Some(" note "));
    assert_eq!(tree.as_comment(div), None);
}
