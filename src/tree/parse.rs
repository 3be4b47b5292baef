//! HTML fragment parsing into tree nodes.
//!
//! Used wherever a pipeline stage produces markup as a string (the syntax
//! highlighter, resolved embeds) and the result has to rejoin the tree.

use super::node::{Attrs, Element, Node};

/// Parse an HTML fragment into tree nodes.
///
/// Whitespace-only text between tags is dropped; comments are skipped.
/// Returns an empty vec when the fragment cannot be parsed.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Vec::new();
    };

    let parser = dom.parser();
    dom.children()
        .iter()
        .filter_map(|handle| tl_node_to_tree(*handle, parser))
        .collect()
}

/// Convert a tl node handle into a tree node.
fn tl_node_to_tree(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();

            let mut attrs = Attrs::new();
            for (key, value) in tag.attributes().iter() {
                let key_str: &str = key.as_ref();
                let value_str = value.map(|v| v.to_string()).unwrap_or_default();
                attrs.set(key_str, value_str);
            }

            let mut elem = Element::with_attrs(&tag_name, attrs);
            for child_handle in tag.children().top().iter() {
                if let Some(child) = tl_node_to_tree(*child_handle, parser) {
                    elem.children.push(child);
                }
            }

            Some(Node::Element(elem))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            if text.trim().is_empty() {
                None
            } else {
                Some(Node::Text(decode_entities(&text)))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

/// Decode the handful of entities the pipeline itself emits.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// =============================================================================
// Tests
// =============================================================================
