//! Pure URL rewriters used as pipeline stages.
//!
//! - [`cdn`]: Cloudinary image URL transform injection
//! - [`affiliate`]: affiliate query tag injection for known domains

pub mod affiliate;
pub mod cdn;

pub use affiliate::add_affiliate_tag;
pub use cdn::rewrite_cdn_image_url;
