//! Word-count based reading time estimation.

use serde::Serialize;

/// Reading time estimate for one document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadTime {
    /// Human readable summary, e.g. `"3 min read"`.
    pub text: String,
    /// Exact minutes (fractional).
    pub minutes: f64,
    /// Exact milliseconds.
    pub time: f64,
    /// Number of words counted.
    pub words: usize,
}

/// Estimate reading time of `text` at `words_per_minute`.
///
/// A word is any whitespace-separated token. The displayed minute count is
/// rounded up so short posts read as "1 min read" rather than "0".
pub fn estimate(text: &str, words_per_minute: u32) -> ReadTime {
    let words = text.split_whitespace().count();
    let minutes = words as f64 / f64::from(words_per_minute.max(1));
    let display_minutes = minutes.ceil().max(1.0) as u64;

    ReadTime {
        text: format!("{display_minutes} min read"),
        minutes,
        time: minutes * 60.0 * 1000.0,
        words,
    }
}
