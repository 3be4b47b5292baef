use crate::pipeline::Pass;
use crate::tree::{Element, Node};

/// Collapses container `div`s whose only child is a `pre`, leaving the
/// `pre` in the div's place.
///
/// The highlight pass emits such wrappers, and authors occasionally write
/// them by hand; neither should survive into the rendered output. A div
/// holding a `pre` next to other content is not a wrapper and is kept.
pub struct UnwrapPreDivs;

impl Pass for UnwrapPreDivs {
    fn name(&self) -> &'static str {
        "unwrap-pre-divs"
    }

    fn apply(&self, root: &mut Element) {
        collapse(root);
    }
}

// Post-order so nested wrappers collapse from the inside out.
fn collapse(elem: &mut Element) {
    for child in elem.children.iter_mut() {
        if let Node::Element(inner) = child {
            collapse(inner);
        }
    }
    if !elem.is_tag("div") {
        return;
    }
    let pre = match elem.sole_element_child() {
        Some(child) if child.is_tag("pre") => child.clone(),
        _ => return,
    };
    *elem = pre;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{parse_fragment, render};

    fn apply(html: &str) -> String {
        let mut root = Element::new("article");
        root.children = parse_fragment(html);
        UnwrapPreDivs.apply(&mut root);
        render(&root)
    }

    #[test]
    fn test_wrapper_div_collapsed() {
        let out = apply("<div class=\"code-block\"><pre data-language=\"rs\">x</pre></div>");
        assert_eq!(out, "<article><pre data-language=\"rs\">x</pre></article>");
    }

    #[test]
    fn test_nested_wrappers_collapsed() {
        let out = apply("<div><div><pre>x</pre></div></div>");
        assert_eq!(out, "<article><pre>x</pre></article>");
    }

    #[test]
    fn test_div_with_siblings_kept() {
        let out = apply("<div><p>note</p><pre>x</pre></div>");
        assert_eq!(out, "<article><div><p>note</p><pre>x</pre></div></article>");
    }

    #[test]
    fn test_div_with_other_sole_child_kept() {
        let out = apply("<div><p>just text</p></div>");
        assert_eq!(out, "<article><div><p>just text</p></div></article>");
    }
}
