use crate::config::CdnConfig;
use crate::core::cdn::rewrite_cdn_image_url;
use crate::log;
use crate::pipeline::Pass;
use crate::tree::{visit_elements_mut, Element};

/// Rewrites untransformed CDN image URLs to carry the default delivery
/// transforms (format/quality auto, width cap).
///
/// Images whose URL already specifies transforms, and images hosted
/// elsewhere, are left exactly as written.
pub struct CdnImages<'a> {
    config: &'a CdnConfig,
}

impl<'a> CdnImages<'a> {
    pub fn new(config: &'a CdnConfig) -> Self {
        Self { config }
    }
}

impl Pass for CdnImages<'_> {
    fn name(&self) -> &'static str {
        "cdn-images"
    }

    fn apply(&self, root: &mut Element) {
        visit_elements_mut(root, &mut |elem| {
            if !elem.is_tag("img") {
                return;
            }
            let Some(src) = elem.get_attr("src") else {
                log!("warn"; "image without url?");
                return;
            };
            if let Some(rewritten) = rewrite_cdn_image_url(src, self.config) {
                elem.set_attr("src", rewritten);
            }
        });
    }
}
