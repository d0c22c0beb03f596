//! Tests for element data, namespaces, and the tree dump format.

use sapling_dom::{
    Attribute, DoctypeData, DomTree, Namespace, NodeId, NodeType, QualName, QuirksMode, dump,
};

#[test]
fn test_qualname_equality_respects_namespace() {
    let html_title = QualName::html("title");
    let svg_title = QualName::new(Namespace::Svg, "title");

    assert_ne!(html_title, svg_title);
    assert!(html_title.is_html("title"));
    assert!(!svg_title.is_html("title"));
    assert!(svg_title.is(Namespace::Svg, "title"));
}

#[test]
fn test_set_attribute_first_seen_wins() {
    let mut tree = DomTree::new();
    let body = tree.alloc_element(
        QualName::html("body"),
        vec![Attribute::new("class", "a")],
    );
    let element = tree.as_element_mut(body).unwrap();

    assert!(!element.set_attribute(Attribute::new("class", "b")));
    assert!(element.set_attribute(Attribute::new("id", "main")));

    assert_eq!(element.get_attribute("class"), Some("a"));
    assert_eq!(element.get_attribute("id"), Some("main"));
    assert_eq!(element.attrs.len(), 2);
}

#[test]
fn test_prefixed_attribute_lookup() {
    let mut href = Attribute::new("href", "#a");
    href.prefix = Some("xlink".to_string());
    href.namespace = Some(Namespace::XLink);
    assert_eq!(href.qualified_name(), "xlink:href");

    let mut tree = DomTree::new();
    let svg = tree.alloc_element(QualName::new(Namespace::Svg, "use"), vec![href]);
    let element = tree.as_element(svg).unwrap();
    assert!(element.has_attribute("xlink:href"));
    assert!(!element.has_attribute("href"));
}

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
        name: "html".to_string(),
        ..DoctypeData::default()
    }));
    tree.append_child(NodeId::ROOT, doctype);
    let html = tree.alloc_element(QualName::html("html"), Vec::new());
    tree.append_child(NodeId::ROOT, html);
    let head = tree.alloc_element(QualName::html("head"), Vec::new());
    let body = tree.alloc_element(QualName::html("body"), Vec::new());
    tree.append_child(html, head);
    tree.append_child(html, body);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
}

#[test]
fn test_dump_format() {
    let mut tree = DomTree::new();
    tree.set_quirks_mode(QuirksMode::Quirks);
    let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
        name: "html".to_string(),
        ..DoctypeData::default()
    }));
    tree.append_child(NodeId::ROOT, doctype);
    let html = tree.alloc_element(QualName::html("html"), Vec::new());
    tree.append_child(NodeId::ROOT, html);
    let svg = tree.alloc_element(
        QualName::new(Namespace::Svg, "svg"),
        vec![Attribute::new("width", "1"), Attribute::new("height", "2")],
    );
    tree.append_child(html, svg);
    let text = tree.alloc(NodeType::Text("hi".to_string()));
    tree.append_child(html, text);
    let comment = tree.alloc(NodeType::Comment("c".to_string()));
    tree.append_child(html, comment);

    let expected = "\
| <!DOCTYPE html>
| <html>
|   <svg svg>
|     height=\"2\"
|     width=\"1\"
|   \"hi\"
|   <!-- c -->
";
    assert_eq!(dump(&tree, NodeId::ROOT), expected);
    assert_eq!(tree.quirks_mode(), QuirksMode::Quirks);
}

#[test]
fn test_dump_doctype_with_identifiers() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
        name: "html".to_string(),
        public_id: "-//W3C//DTD HTML 4.01//EN".to_string(),
        system_id: String::new(),
    }));
    tree.append_child(NodeId::ROOT, doctype);

    assert_eq!(
        dump(&tree, NodeId::ROOT),
        "| <!DOCTYPE html \"-//W3C//DTD HTML 4.01//EN\" \"\">\n"
    );
}
