use crate::config::AffiliateConfig;
use crate::core::affiliate::add_affiliate_tag;
use crate::pipeline::Pass;
use crate::tree::{visit_elements_mut, Element};

/// Appends the configured affiliate parameters to outbound store links.
pub struct AutoAffiliates<'a> {
    config: &'a AffiliateConfig,
}

impl<'a> AutoAffiliates<'a> {
    pub fn new(config: &'a AffiliateConfig) -> Self {
        Self { config }
    }
}

impl Pass for AutoAffiliates<'_> {
    fn name(&self) -> &'static str {
        "auto-affiliates"
    }

    fn apply(&self, root: &mut Element) {
        visit_elements_mut(root, &mut |elem| {
            if !elem.is_tag("a") {
                return;
            }
            if let Some(href) = elem.get_attr("href") {
                let tagged = add_affiliate_tag(href, self.config);
                elem.set_attr("href", tagged);
            }
        });
    }
}
