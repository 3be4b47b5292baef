//! Heading id slugification.
//!
//! Unicode text is transliterated to ASCII first (deunicode), then lowered
//! and collapsed to `-` separated tokens.

use deunicode::deunicode;

/// Slugify arbitrary heading text into a URL-safe fragment id.
///
/// - Unicode -> ASCII transliteration
/// - lowercase
/// - every run of non-alphanumeric characters becomes a single `-`
/// - no leading/trailing `-`
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}
