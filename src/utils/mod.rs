//! Small pure helpers.
//!
//! - [`slug`]: heading id slugification
//! - [`readtime`]: word-count based reading time estimation

pub mod readtime;
pub mod slug;
