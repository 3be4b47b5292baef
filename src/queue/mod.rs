//! Single-flight serialization gate for compilations.
//!
//! The bundling step has a high peak memory footprint, so at most one
//! compilation may run at a time process-wide. The gate is a one-permit
//! semaphore (FIFO fair, so submissions are served in submission order)
//! plus a fixed per-task time budget. This is deliberate backpressure, not
//! an optimization.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task;
use tokio::time::timeout;

use crate::compiler::{compile, CompileContext, CompiledArtifact};
use crate::content::ContentFile;
use crate::error::QueueError;
use crate::log;

static GLOBAL: OnceLock<CompileQueue> = OnceLock::new();

pub struct CompileQueue {
    gate: Semaphore,
    budget: Duration,
}

impl CompileQueue {
    pub fn new(budget: Duration) -> Self {
        Self {
            gate: Semaphore::new(1),
            budget,
        }
    }

    /// The process-wide queue. Lazily built on first use; the first caller's
    /// budget wins and later callers share the same instance.
    pub fn global(budget: Duration) -> &'static CompileQueue {
        GLOBAL.get_or_init(|| CompileQueue::new(budget))
    }

    /// Enqueue one compilation and await its result.
    ///
    /// Waits for its FIFO turn, then runs `compile` on a blocking thread
    /// under the time budget. A task that overruns the budget is abandoned
    /// and reported as [`QueueError::Timeout`]; it keeps its thread until it
    /// finishes on its own, but the gate reopens for the next submission.
    pub async fn submit(
        &self,
        slug: &str,
        files: Vec<ContentFile>,
        ctx: Arc<CompileContext>,
    ) -> Result<Option<CompiledArtifact>, QueueError> {
        let _permit = self.gate.acquire().await.map_err(|err| QueueError::Worker {
            slug: slug.to_string(),
            reason: err.to_string(),
        })?;
        crate::debug!("queue"; "compiling '{slug}'");

        let task_slug = slug.to_string();
        let worker = task::spawn_blocking(move || compile(&task_slug, &files, &ctx));

        match timeout(self.budget, worker).await {
            Err(_) => {
                log!("error"; "compilation of '{slug}' timed out after {:?}", self.budget);
                Err(QueueError::Timeout {
                    slug: slug.to_string(),
                    budget: self.budget,
                })
            }
            Ok(Err(join_err)) => Err(QueueError::Worker {
                slug: slug.to_string(),
                reason: join_err.to_string(),
            }),
            Ok(Ok(result)) => result.map_err(QueueError::from),
        }
    }
}
