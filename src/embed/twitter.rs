//! Social post embeds for twitter.com / x.com status URLs.

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use super::fetch::HttpFetch;
use super::EmbedTransformer;

const OEMBED_ENDPOINT: &str = "https://publish.twitter.com/oembed";

const STATUS_HOSTS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
];

/// Resolves status URLs into the platform's blockquote embed markup.
pub struct TwitterTransformer {
    fetch: Arc<dyn HttpFetch>,
}

impl TwitterTransformer {
    pub fn new(fetch: Arc<dyn HttpFetch>) -> Self {
        Self { fetch }
    }
}

/// A status URL looks like `https://x.com/<user>/status/<id>`.
fn is_status_url(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if !STATUS_HOSTS.contains(&host) {
        return false;
    }

    let mut segments = url.path_segments().into_iter().flatten();
    let user = segments.next();
    let status = segments.next();
    let id = segments.next();

    user.is_some_and(|s| !s.is_empty())
        && status == Some("status")
        && id.is_some_and(|s| s.bytes().all(|b| b.is_ascii_digit()) && !s.is_empty())
}

impl EmbedTransformer for TwitterTransformer {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn matches(&self, url: &Url) -> bool {
        is_status_url(url)
    }

    fn resolve(&self, url: &Url) -> Result<String> {
        let mut endpoint = Url::parse(OEMBED_ENDPOINT)?;
        endpoint
            .query_pairs_mut()
            .append_pair("url", url.as_str())
            .append_pair("omit_script", "true")
            .append_pair("dnt", "true");

        let body = self.fetch.fetch_json(&endpoint)?;
        let html = body
            .get("html")
            .and_then(|v| v.as_str())
            .context("oEmbed response has no html field")?;
        Ok(html.trim().to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
