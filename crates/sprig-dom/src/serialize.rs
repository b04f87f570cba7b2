//! HTML Serialization
//!
//! Renders a subtree to an HTML string with standard escaping.

use crate::{DomTree, NodeId};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Serialize a node and its subtree
pub fn to_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

/// Serialize only a node's children
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for (child, _) in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };

    if let Some(text) = node.as_text() {
        escape_text(text, out);
        return;
    }
    let Some(element) = node.as_element() else { return };

    out.push('<');
    out.push_str(&element.tag);
    for attr in element.attrs.iter() {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_attr(&attr.value, out);
        out.push('"');
    }
    out.push('>');

    if is_void(&element.tag) {
        return;
    }
    for (child, _) in tree.children(id) {
        write_node(tree, child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
