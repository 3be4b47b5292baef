//! Depth-first traversal utilities.
//!
//! Traversal is decoupled from the passes: a pass supplies a callback, the
//! walker owns the recursion. Visits are pre-order, and children produced by
//! a callback (node replacement) are visited too, so callbacks must be
//! idempotent on their own output.

use super::node::{Element, Node};

/// Visit every element in the subtree rooted at `root` (including `root`),
/// pre-order, with mutable access.
pub fn visit_elements_mut<F>(root: &mut Element, f: &mut F)
where
    F: FnMut(&mut Element),
{
    f(root);
    for child in &mut root.children {
        if let Node::Element(elem) = child {
            visit_elements_mut(elem, f);
        }
    }
}

/// Visit every node below `root`, pre-order, with mutable access.
///
/// The callback receives `&mut Node`, so it can replace a node wholesale
/// (e.g. swap a paragraph for a resolved embed fragment).
pub fn visit_nodes_mut<F>(root: &mut Element, f: &mut F)
where
    F: FnMut(&mut Node),
{
    for child in &mut root.children {
        f(child);
        if let Node::Element(elem) = child {
            visit_nodes_mut(elem, f);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Attrs;

    fn sample() -> Element {
        let mut root = Element::new("article");
        let mut p = Element::new("p");
        p.children.push(Node::text("one"));
        let mut div = Element::new("div");
        div.children.push(Node::element("pre"));
        root.children.push(Node::Element(p));
        root.children.push(Node::Element(div));
        root
    }

    #[test]
    fn test_visits_all_elements_preorder() {
        let mut root = sample();
        let mut tags = Vec::new();
        visit_elements_mut(&mut root, &mut |elem| tags.push(elem.tag.clone()));
        assert_eq!(tags, ["article", "p", "div", "pre"]);
    }

    #[test]
    fn test_element_mutation_sticks() {
        let mut root = sample();
        visit_elements_mut(&mut root, &mut |elem| {
            if elem.is_tag("pre") {
                elem.set_attr("data-seen", "1");
            }
        });
        let div = root.children[1].as_element().unwrap();
        let pre = div.sole_element_child().unwrap();
        assert_eq!(pre.get_attr("data-seen"), Some("1"));
    }

    #[test]
    fn test_node_replacement() {
        let mut root = sample();
        visit_nodes_mut(&mut root, &mut |node| {
            if node.as_element().is_some_and(|e| e.is_tag("p")) {
                *node = Node::Raw("<aside>swapped</aside>".to_string());
            }
        });
        assert!(matches!(&root.children[0], Node::Raw(html) if html.contains("swapped")));
    }

    #[test]
    fn test_replacement_children_are_visited() {
        let mut root = Element::new("article");
        root.children.push(Node::element("p"));

        let mut seen = Vec::new();
        visit_nodes_mut(&mut root, &mut |node| {
            if let Node::Element(elem) = node {
                seen.push(elem.tag.clone());
                if elem.is_tag("p") {
                    let mut div = Element::with_attrs("div", Attrs::new());
                    div.children.push(Node::element("span"));
                    *node = Node::Element(div);
                }
            }
        });
        // The p was visited, replaced by a div, and the div's new child was
        // walked afterwards. The replacing div itself is not re-visited.
        assert_eq!(seen, ["p", "span"]);
    }
}
