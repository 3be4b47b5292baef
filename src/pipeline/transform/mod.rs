mod affiliate;
mod autolink;
mod code;
mod embed;
mod highlight;
mod image;
mod slug;
mod unwrap;

pub use affiliate::AutoAffiliates;
pub use autolink::AutolinkHeadings;
pub use code::TrimCodeBlocks;
pub use embed::EmbedLinks;
pub use highlight::{CodeHighlighter, HighlightCode};
pub use image::CdnImages;
pub use slug::HeadingSlugs;
pub use unwrap::UnwrapPreDivs;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag)
}
