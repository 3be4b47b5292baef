//! Cloudinary image URL rewriting.
//!
//! Recognized URL shape:
//!
//! ```text
//! https://res.cloudinary.com/<cloud_name>/image/upload/[<transforms>/][v<N>/]<public_id>
//! ```
//!
//! URLs that already carry a transform segment are left alone - rewriting is
//! a no-op there, which makes the rewrite idempotent from the caller's view.

use url::Url;

use crate::config::CdnConfig;

const CDN_HOST: &str = "res.cloudinary.com";

/// Parsed fields of a Cloudinary image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnImage {
    pub cloud_name: String,
    /// Existing transform list segment (`f_auto,q_auto,...`), if any.
    pub transforms: Option<String>,
    /// Version segment (`v1234567890`), if any.
    pub version: Option<String>,
    /// Asset public id, possibly several path segments.
    pub public_id: String,
}

impl CdnImage {
    /// Parse a URL into CDN image fields. Returns `None` for anything that
    /// is not a Cloudinary upload URL.
    pub fn parse(url_str: &str) -> Option<Self> {
        let url = Url::parse(url_str).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some(CDN_HOST) {
            return None;
        }

        let mut segments = url.path_segments()?;
        let cloud_name = segments.next()?.to_string();
        if cloud_name.is_empty() || segments.next()? != "image" || segments.next()? != "upload" {
            return None;
        }

        let rest: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
        if rest.is_empty() {
            return None;
        }

        // Transform and version segments are only recognized when a public
        // id still follows them; a lone trailing segment is always the id.
        let mut i = 0;
        let transforms = (rest.len() > i + 1 && is_transform_list(rest[i])).then(|| {
            i += 1;
            rest[i - 1].to_string()
        });
        let version = (rest.len() > i + 1 && is_version(rest[i])).then(|| {
            i += 1;
            rest[i - 1].to_string()
        });

        Some(Self {
            cloud_name,
            transforms,
            version,
            public_id: rest[i..].join("/"),
        })
    }
}

/// A segment counts as a transform list when every comma-separated token
/// carries an underscore (`f_auto`, `w_1600`, `dpr_2.0`, ...).
///
/// This mirrors the loose recognizer the content repo historically relied
/// on: an underscore-bearing folder name in the public id is also treated
/// as "already transformed" and left untouched.
fn is_transform_list(segment: &str) -> bool {
    !segment.is_empty() && segment.split(',').all(|token| token.contains('_'))
}

/// Version segments look like `v1234567890`.
fn is_version(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next() == Some('v') && {
        let rest = chars.as_str();
        !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Rewrite a Cloudinary image URL to include the default transform list.
///
/// Returns `None` when the URL is not a CDN image URL, or when it already
/// carries transforms (the caller keeps the original in both cases).
///
/// The synthesized list is `f_auto,q_auto[,dpr_2.0],w_<max_width>` in that
/// canonical order; `dpr_2.0` is skipped for GIF assets, which do not
/// support pixel-ratio transforms.
pub fn rewrite_cdn_image_url(url_str: &str, config: &CdnConfig) -> Option<String> {
    let image = CdnImage::parse(url_str)?;
    if image.transforms.is_some() {
        return None;
    }

    let mut transforms: Vec<String> = vec!["f_auto".into(), "q_auto".into()];
    if !image.public_id.ends_with(".gif") {
        transforms.push("dpr_2.0".into());
    }
    transforms.push(format!("w_{}", config.max_width));

    let mut parts = vec![
        format!("https://{CDN_HOST}/{}/image/upload", image.cloud_name),
        transforms.join(","),
    ];
    if let Some(version) = image.version {
        parts.push(version);
    }
    parts.push(image.public_id);

    Some(parts.join("/"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CdnConfig {
        CdnConfig::default()
    }

    #[test]
    fn test_rewrite_plain_url() {
        let url = "https://res.cloudinary.com/demo/image/upload/blog/pic.png";
        let rewritten = rewrite_cdn_image_url(url, &config()).unwrap();
        assert_eq!(
            rewritten,
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,dpr_2.0,w_1600/blog/pic.png"
        );
    }

    #[test]
    fn test_rewrite_preserves_version() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1667342629/pic.jpg";
        let rewritten = rewrite_cdn_image_url(url, &config()).unwrap();
        assert_eq!(
            rewritten,
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,dpr_2.0,w_1600/v1667342629/pic.jpg"
        );
    }

    #[test]
    fn test_already_transformed_is_noop() {
        let url = "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto/pic.png";
        assert_eq!(rewrite_cdn_image_url(url, &config()), None);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let url = "https://res.cloudinary.com/demo/image/upload/pic.png";
        let once = rewrite_cdn_image_url(url, &config()).unwrap();
        // Second application recognizes the transforms and declines
        assert_eq!(rewrite_cdn_image_url(&once, &config()), None);
    }

    #[test]
    fn test_gif_never_gets_dpr() {
        let url = "https://res.cloudinary.com/demo/image/upload/funny.gif";
        let rewritten = rewrite_cdn_image_url(url, &config()).unwrap();
        assert!(!rewritten.contains("dpr_"));
        assert!(rewritten.contains("f_auto,q_auto,w_1600"));
    }

    #[test]
    fn test_non_cdn_url_ignored() {
        assert_eq!(
            rewrite_cdn_image_url("https://example.com/image/upload/pic.png", &config()),
            None
        );
        assert_eq!(rewrite_cdn_image_url("not a url", &config()), None);
    }

    #[test]
    fn test_lone_underscore_segment_is_public_id() {
        // A trailing segment is always the public id, even with underscores
        let url = "https://res.cloudinary.com/demo/image/upload/my_file.png";
        let image = CdnImage::parse(url).unwrap();
        assert_eq!(image.transforms, None);
        assert_eq!(image.public_id, "my_file.png");
    }

    #[test]
    fn test_parse_fields() {
        let url =
            "https://res.cloudinary.com/demo/image/upload/w_300,h_200/v42/folder/pic.webp";
        let image = CdnImage::parse(url).unwrap();
        assert_eq!(image.cloud_name, "demo");
        assert_eq!(image.transforms.as_deref(), Some("w_300,h_200"));
        assert_eq!(image.version.as_deref(), Some("v42"));
        assert_eq!(image.public_id, "folder/pic.webp");
    }

    #[test]
    fn test_version_requires_digits() {
        assert!(is_version("v1667342629"));
        assert!(!is_version("v"));
        assert!(!is_version("video"));
    }
}
