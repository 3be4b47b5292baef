//! Affiliate query tag injection.
//!
//! Known affiliate-eligible domains get a fixed query parameter appended,
//! but only when the link does not already carry one. Applying the rewrite
//! twice therefore yields the same URL as applying it once.

use url::Url;

use crate::config::AffiliateConfig;

/// Inject the affiliate query parameter for known domains.
///
/// Unknown domains and unparseable URLs come back unchanged.
pub fn add_affiliate_tag(link: &str, config: &AffiliateConfig) -> String {
    let Ok(mut url) = Url::parse(link) else {
        return link.to_string();
    };

    let Some(host) = url.host_str().map(str::to_ascii_lowercase) else {
        return link.to_string();
    };

    if host_matches(&host, "amazon.com") && !has_param(&url, "tag") {
        url.query_pairs_mut().append_pair("tag", &config.amazon_tag);
        return url.to_string();
    }

    if host_matches(&host, "egghead.io") && !has_param(&url, "af") {
        url.query_pairs_mut().append_pair("af", &config.egghead_code);
        return url.to_string();
    }

    link.to_string()
}

/// Exact domain or any subdomain of it.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

fn has_param(url: &Url, name: &str) -> bool {
    url.query_pairs().any(|(k, _)| k == name)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AffiliateConfig {
        AffiliateConfig {
            amazon_tag: "shop-20".to_string(),
            egghead_code: "abc123".to_string(),
        }
    }

    #[test]
    fn test_amazon_gets_tag() {
        let out = add_affiliate_tag("https://www.amazon.com/dp/B012345", &config());
        assert!(out.contains("tag=shop-20"));
    }

    #[test]
    fn test_existing_tag_preserved() {
        let url = "https://amazon.com/dp/B012345?tag=other-1";
        assert_eq!(add_affiliate_tag(url, &config()), url);
    }

    #[test]
    fn test_idempotent() {
        let once = add_affiliate_tag("https://egghead.io/lessons/intro", &config());
        let twice = add_affiliate_tag(&once, &config());
        assert_eq!(once, twice);
        assert!(once.contains("af=abc123"));
    }

    #[test]
    fn test_unknown_domain_untouched() {
        let url = "https://example.com/page?x=1";
        assert_eq!(add_affiliate_tag(url, &config()), url);
    }

    #[test]
    fn test_lookalike_domain_untouched() {
        // `notamazon.com` must not match `amazon.com`
        let url = "https://notamazon.com/dp/B012345";
        assert_eq!(add_affiliate_tag(url, &config()), url);
    }

    #[test]
    fn test_relative_link_untouched() {
        assert_eq!(add_affiliate_tag("./sibling.mdx", &config()), "./sibling.mdx");
    }
}
