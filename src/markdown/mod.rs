//! Markdown parsing for the compile pipeline.
//!
//! - [`convert`]: Markdown -> document tree via `pulldown-cmark`
//! - [`frontmatter`]: YAML (`---`) / TOML (`+++`) frontmatter extraction

pub mod convert;
pub mod frontmatter;

pub use convert::{MarkdownOptions, from_markdown};
pub use frontmatter::extract_frontmatter;
