use super::is_heading;
use crate::pipeline::Pass;
use crate::tree::{visit_elements_mut, Element, Node};

/// Wraps the content of every id-bearing heading in a self-referential
/// anchor, so headings are directly linkable.
///
/// Runs after [`super::HeadingSlugs`]; headings that still lack an id are
/// skipped.
pub struct AutolinkHeadings;

impl Pass for AutolinkHeadings {
    fn name(&self) -> &'static str {
        "autolink-headings"
    }

    fn apply(&self, root: &mut Element) {
        visit_elements_mut(root, &mut |elem| {
            if !is_heading(&elem.tag) {
                return;
            }
            let Some(id) = elem.get_attr("id") else {
                return;
            };
            // Idempotence: the sole-anchor shape is exactly what we produce.
            if let Some(child) = elem.sole_element_child() {
                if child.is_tag("a") {
                    return;
                }
            }
            let mut anchor = Element::with_attrs("a", [("href", &*format!("#{id}"))]);
            anchor.children = std::mem::take(&mut elem.children);
            elem.children.push(Node::Element(anchor));
        });
    }
}
