use super::is_heading;
use crate::pipeline::Pass;
use crate::tree::{visit_elements_mut, Element};
use crate::utils::slug::slugify;

/// Assigns a slug id to every heading that does not already carry one.
///
/// Ids are derived from the heading's text content, so `## Deep dive` gets
/// `id="deep-dive"`. Authored ids win.
pub struct HeadingSlugs;

impl Pass for HeadingSlugs {
    fn name(&self) -> &'static str {
        "heading-slugs"
    }

    fn apply(&self, root: &mut Element) {
        visit_elements_mut(root, &mut |elem| {
            if !is_heading(&elem.tag) || elem.get_attr("id").is_some() {
                return;
            }
            let id = slugify(&elem.text_content());
            if !id.is_empty() {
                elem.set_attr("id", id);
            }
        });
    }
}
