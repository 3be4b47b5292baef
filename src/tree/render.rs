//! Tree serialization to an HTML string.

use std::fmt::Write;

use super::node::{Element, Node};

/// Elements that never carry children and are emitted without a close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Render an element subtree to HTML.
pub fn render(root: &Element) -> String {
    let mut out = String::new();
    render_element(root, &mut out);
    out
}

fn render_element(elem: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&elem.tag);
    for (name, value) in elem.attrs.iter() {
        if value.is_empty() {
            write!(out, " {name}").ok();
        } else {
            write!(out, " {name}=\"{}\"", escape_attr(value)).ok();
        }
    }

    if VOID_ELEMENTS.contains(&elem.tag.as_str()) {
        out.push_str("/>");
        return;
    }
    out.push('>');

    for child in &elem.children {
        render_node(child, out);
    }

    write!(out, "</{}>", elem.tag).ok();
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(elem) => render_element(elem, out),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Raw(html) => out.push_str(html),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Attrs;

    #[test]
    fn test_nested_elements() {
        let mut p = Element::new("p");
        let mut em = Element::new("em");
        em.children.push(Node::text("hi"));
        p.children.push(Node::Element(em));
        assert_eq!(render(&p), "<p><em>hi</em></p>");
    }

    #[test]
    fn test_void_element() {
        let img = Element::with_attrs("img", Attrs::from([("src", "a.png"), ("alt", "")]));
        assert_eq!(render(&img), "<img src=\"a.png\" alt/>");
    }

    #[test]
    fn test_text_escaped() {
        let mut code = Element::new("code");
        code.children.push(Node::text("a < b && c"));
        assert_eq!(render(&code), "<code>a &lt; b &amp;&amp; c</code>");
    }

    #[test]
    fn test_attr_escaped() {
        let a = Element::with_attrs("a", Attrs::from([("title", "say \"hi\"")]));
        assert_eq!(render(&a), "<a title=\"say &quot;hi&quot;\"></a>");
    }

    #[test]
    fn test_raw_passthrough() {
        let mut div = Element::new("div");
        div.children
            .push(Node::Raw("<iframe src=\"x\"></iframe>".to_string()));
        assert_eq!(render(&div), "<div><iframe src=\"x\"></iframe></div>");
    }
}
