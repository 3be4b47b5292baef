//! Video lesson embeds for egghead.io lesson pages.
//!
//! Lesson-detail URLs become an `/embed` iframe with default query flags:
//! preloading is disabled and the affiliate code injected, unless the author
//! already set either one on the link.

use anyhow::Result;
use url::Url;

use super::{EmbedTransformer, make_embed};

/// Resolves lesson-detail URLs into aspect-ratio boxed iframes.
pub struct EggheadTransformer {
    affiliate_code: String,
}

impl EggheadTransformer {
    pub fn new(affiliate_code: impl Into<String>) -> Self {
        Self {
            affiliate_code: affiliate_code.into(),
        }
    }
}

impl EmbedTransformer for EggheadTransformer {
    fn name(&self) -> &'static str {
        "egghead"
    }

    fn matches(&self, url: &Url) -> bool {
        url.host_str() == Some("egghead.io")
            && url.path().contains("/lessons/")
            && !url.path().contains("/embed")
    }

    fn resolve(&self, url: &Url) -> Result<String> {
        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        // Don't preload videos
        if !params.iter().any(|(k, _)| k == "preload") {
            params.push(("preload".into(), "false".into()));
        }
        if !params.iter().any(|(k, _)| k == "af") {
            params.push(("af".into(), self.affiliate_code.clone()));
        }

        let mut iframe_src = Url::parse(&format!(
            "https://egghead.io{}/embed",
            url.path().trim_end_matches('/')
        ))?;
        iframe_src.query_pairs_mut().extend_pairs(params);

        let iframe = format!("<iframe src=\"{iframe_src}\" allowfullscreen></iframe>");
        Ok(make_embed(&iframe, "egghead", "56.25%"))
    }
}

// =============================================================================
// Tests
// =============================================================================
