//! Embed resolution for bare links.
//!
//! A paragraph consisting of nothing but a link gets replaced by an
//! embeddable HTML fragment. Resolvers are strategy objects tried in a
//! fixed order; the first whose predicate matches wins, and a URL no
//! resolver claims is left as a plain link.
//!
//! - [`twitter`]: social post embeds (publish.twitter.com oEmbed)
//! - [`egghead`]: video lesson iframe embeds
//! - [`oembed`]: generic oEmbed fallback over a provider registry
//! - [`fetch`]: HTTP collaborator contract + reqwest implementation

pub mod egghead;
pub mod fetch;
pub mod oembed;
pub mod twitter;

use anyhow::Result;
use url::Url;

pub use egghead::EggheadTransformer;
pub use fetch::{HttpClient, HttpFetch};
pub use oembed::OembedTransformer;
pub use twitter::TwitterTransformer;

/// An embed strategy: a URL predicate paired with an HTML producer.
///
/// Implementations are stateless and reusable across compilations.
pub trait EmbedTransformer: Send + Sync {
    /// Resolver name for logs.
    fn name(&self) -> &'static str;

    /// Does this resolver claim the URL?
    fn matches(&self, url: &Url) -> bool;

    /// Produce an embeddable HTML fragment for a claimed URL.
    fn resolve(&self, url: &Url) -> Result<String>;
}

/// Resolve a URL against an ordered resolver list.
///
/// Returns `None` when no resolver claims the URL (the link stays a link).
/// A resolver failure is absorbed into a visible inline error fragment so
/// one broken embed never aborts the whole compilation.
pub fn resolve_embed(url: &Url, transformers: &[Box<dyn EmbedTransformer>]) -> Option<String> {
    let transformer = transformers.iter().find(|t| t.matches(url))?;

    let html = match transformer.resolve(url) {
        Ok(html) => html,
        Err(err) => {
            crate::log!("embed"; "{} failed for {url}: {err:#}", transformer.name());
            return Some(error_fragment(url));
        }
    };

    Some(wrap_embed(&html, url))
}

/// Inline fallback shown in place of a failed embed.
fn error_fragment(url: &Url) -> String {
    format!("<p>Error embedding <a href=\"{url}\">{url}</a>.</p>")
}

/// Post-process resolved HTML based on the source host.
///
/// YouTube embeds get a 56.25% (16:9) padding box so they can be styled to
/// 100% width; CodeSandbox embeds get a taller 80% box. Everything else is
/// passed through unwrapped.
pub fn wrap_embed(html: &str, url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();

    // matches youtu.be and youtube.com
    if host.contains("youtube.com") || host.contains("youtu.be") {
        return make_embed(html, "youtube", "56.25%");
    }
    if host.contains("codesandbox.io") {
        return make_embed(html, "codesandbox", "80%");
    }
    html.to_string()
}

/// Wrap an embed in a fixed aspect-ratio padding box.
pub fn make_embed(html: &str, kind: &str, height_ratio: &str) -> String {
    format!(
        "<div class=\"embed\" data-embed-type=\"{kind}\">\
         <div style=\"padding-bottom: {height_ratio}\">{html}</div>\
         </div>"
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        name: &'static str,
        host: &'static str,
        html: &'static str,
    }

    impl EmbedTransformer for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }
        fn matches(&self, url: &Url) -> bool {
            url.host_str() == Some(self.host)
        }
        fn resolve(&self, _url: &Url) -> Result<String> {
            Ok(self.html.to_string())
        }
    }

    struct Failing;

    impl EmbedTransformer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn matches(&self, _url: &Url) -> bool {
            true
        }
        fn resolve(&self, _url: &Url) -> Result<String> {
            anyhow::bail!("boom")
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let transformers: Vec<Box<dyn EmbedTransformer>> = vec![
            Box::new(Fixed {
                name: "specific",
                host: "example.com",
                html: "<b>specific</b>",
            }),
            Box::new(Fixed {
                name: "generic",
                host: "example.com",
                html: "<b>generic</b>",
            }),
        ];
        let out = resolve_embed(&url("https://example.com/post/1"), &transformers).unwrap();
        assert!(out.contains("specific"));
        assert!(!out.contains("generic"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let transformers: Vec<Box<dyn EmbedTransformer>> = vec![Box::new(Fixed {
            name: "only",
            host: "example.com",
            html: "<b>x</b>",
        })];
        assert!(resolve_embed(&url("https://other.com/"), &transformers).is_none());
    }

    #[test]
    fn test_failure_becomes_error_fragment() {
        let transformers: Vec<Box<dyn EmbedTransformer>> = vec![Box::new(Failing)];
        let out = resolve_embed(&url("https://broken.dev/x"), &transformers).unwrap();
        assert!(out.starts_with("<p>Error embedding "));
        assert!(out.contains("https://broken.dev/x"));
    }

    #[test]
    fn test_youtube_wrap() {
        let wrapped = wrap_embed("<iframe></iframe>", &url("https://youtu.be/abc"));
        assert!(wrapped.contains("data-embed-type=\"youtube\""));
        assert!(wrapped.contains("padding-bottom: 56.25%"));
    }

    #[test]
    fn test_codesandbox_wrap() {
        let wrapped = wrap_embed("<iframe></iframe>", &url("https://codesandbox.io/s/x"));
        assert!(wrapped.contains("data-embed-type=\"codesandbox\""));
        assert!(wrapped.contains("padding-bottom: 80%"));
    }

    #[test]
    fn test_other_hosts_unwrapped() {
        let html = "<blockquote>post</blockquote>";
        assert_eq!(wrap_embed(html, &url("https://x.com/u/status/1")), html);
    }
}
