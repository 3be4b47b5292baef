//! Content file sets and entry document resolution.
//!
//! A content item is one directory of files: an entry document named
//! `index.md` or `index.mdx` plus whatever assets and sub-documents sit next
//! to it. Compilation works on bundle-relative paths, so the entry's
//! directory becomes the bundle root.

use anyhow::{bail, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

/// One (path, content) pair belonging to a content item.
#[derive(Debug, Clone)]
pub struct ContentFile {
    pub path: String,
    pub content: String,
}

impl ContentFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Find the entry document for `slug`: the first file whose path matches
/// `<slug>/index.md` or `<slug>/index.mdx`. No match is a valid "not found"
/// outcome, not an error.
pub fn find_entry<'a>(slug: &str, files: &'a [ContentFile]) -> Result<Option<&'a ContentFile>> {
    let pattern = Regex::new(&format!(r"{}/index\.mdx?$", regex::escape(slug)))?;
    Ok(files.iter().find(|file| pattern.is_match(&file.path)))
}

/// Remap every file path relative to the entry document's directory, so the
/// entry itself becomes `./index.md(x)`. Two files collapsing onto the same
/// relative path is a caller error.
pub fn relative_files(
    entry_path: &str,
    files: &[ContentFile],
) -> Result<FxHashMap<String, String>> {
    let dir = match entry_path.rsplit_once('/') {
        Some((dir, _)) => dir,
        None => "",
    };

    let mut map = FxHashMap::default();
    for file in files {
        let relative = match file.path.strip_prefix(dir) {
            Some(rest) if dir.is_empty() => format!("./{rest}"),
            Some(rest) if rest.starts_with('/') => format!(".{rest}"),
            _ => file.path.clone(),
        };
        if map.insert(relative.clone(), file.content.clone()).is_some() {
            bail!("duplicate file path after remapping: {relative}");
        }
    }
    Ok(map)
}
