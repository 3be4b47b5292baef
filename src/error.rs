//! Typed errors for the compile gate boundary.
//!
//! Pipeline internals use `anyhow` with context; the queue surfaces a small
//! typed enum so callers can distinguish a timeout from a failed compile.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by [`crate::queue::CompileQueue::submit`].
#[derive(Debug, Error)]
pub enum QueueError {
    /// The compilation exceeded the per-task time budget.
    ///
    /// The underlying task is abandoned; it is never retried automatically.
    #[error("compilation of `{slug}` exceeded the {budget:?} time budget")]
    Timeout { slug: String, budget: Duration },

    /// The compile worker panicked or was cancelled.
    #[error("compile worker failed for `{slug}`: {reason}")]
    Worker { slug: String, reason: String },

    /// The compilation itself failed (bundler error, bad input, ...).
    ///
    /// Logged with slug context at the orchestrator, then propagated here
    /// unchanged - compile failures are never swallowed.
    #[error(transparent)]
    Compile(#[from] anyhow::Error),
}
