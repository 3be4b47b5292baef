use crate::log;
use crate::pipeline::Pass;
use crate::tree::{visit_elements_mut, Element, Node};

/// Trims leading and trailing whitespace from fenced code blocks.
///
/// Markdown conversion leaves a trailing newline inside every code block;
/// stripping it here keeps the highlighter from emitting an empty final
/// line.
pub struct TrimCodeBlocks;

impl Pass for TrimCodeBlocks {
    fn name(&self) -> &'static str {
        "trim-code-blocks"
    }

    fn apply(&self, root: &mut Element) {
        visit_elements_mut(root, &mut |elem| {
            if !elem.is_tag("pre") {
                return;
            }
            let Some(Node::Element(code)) = elem.children.first_mut() else {
                return;
            };
            if !code.is_tag("code") {
                return;
            }
            match code.children.first_mut() {
                None => {}
                Some(Node::Text(text)) => *text = text.trim().to_string(),
                Some(_) => {
                    log!("warn"; "code block starts with a non-text node, not trimming");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::render;

    fn code_block(source: &str) -> Element {
        let mut code = Element::with_attrs("code", [("class", "language-rust")]);
        code.children.push(Node::text(source));
        let mut pre = Element::new("pre");
        pre.children.push(Node::Element(code));
        pre
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let mut root = Element::new("article");
        root.children.push(Node::Element(code_block("\nlet x = 1;\n")));
        TrimCodeBlocks.apply(&mut root);
        assert!(render(&root).contains("<code class=\"language-rust\">let x = 1;</code>"));
    }

    #[test]
    fn test_interior_whitespace_kept() {
        let mut root = Element::new("article");
        root.children.push(Node::Element(code_block("a\n\nb\n")));
        TrimCodeBlocks.apply(&mut root);
        assert!(render(&root).contains(">a\n\nb</code>"));
    }

    #[test]
    fn test_empty_code_block_ok() {
        let mut pre = Element::new("pre");
        pre.children.push(Node::Element(Element::new("code")));
        let mut root = Element::new("article");
        root.children.push(Node::Element(pre));
        TrimCodeBlocks.apply(&mut root);
        assert!(render(&root).contains("<pre><code></code></pre>"));
    }
}
