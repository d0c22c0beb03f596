//! Text rendering of a tree in the html5lib tree-construction test format.
//!
//! ```text
//! | <!DOCTYPE html>
//! | <html>
//! |   <head>
//! |   <body>
//! |     <svg svg>
//! |       xlink href="#a"
//! |     "text"
//! ```
//!
//! Each node is one line, indented two spaces per level below `root`.
//! Attributes follow their element one level deeper, sorted by name.

use std::fmt::Write;

use crate::{DomTree, Namespace, NodeId, NodeType};

/// Render every descendant of `root` (but not `root` itself).
#[must_use]
pub fn dump(tree: &DomTree, root: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(root) {
        dump_node(tree, child, 0, &mut out);
    }
    out
}

fn dump_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    match &node.node_type {
        NodeType::Document => {}
        NodeType::Doctype(doctype) => {
            if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                let _ = writeln!(out, "| {indent}<!DOCTYPE {}>", doctype.name);
            } else {
                let _ = writeln!(
                    out,
                    "| {indent}<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                );
            }
        }
        NodeType::Element(element) => {
            let _ = writeln!(out, "| {indent}<{}>", element.name);

            let mut attrs: Vec<(String, &str)> = element
                .attrs
                .iter()
                .map(|attr| {
                    let name = match attr.namespace {
                        Some(Namespace::XLink) => format!("xlink {}", attr.name),
                        Some(Namespace::Xml) => format!("xml {}", attr.name),
                        Some(Namespace::Xmlns) => format!("xmlns {}", attr.name),
                        _ => attr.name.clone(),
                    };
                    (name, attr.value.as_str())
                })
                .collect();
            attrs.sort();
            for (name, value) in attrs {
                let _ = writeln!(out, "| {indent}  {name}=\"{value}\"");
            }
        }
        NodeType::Text(text) => {
            let _ = writeln!(out, "| {indent}\"{text}\"");
        }
        NodeType::Comment(data) => {
            let _ = writeln!(out, "| {indent}<!-- {data} -->");
        }
    }

    for &child in &node.children {
        dump_node(tree, child, depth + 1, out);
    }
}
