// Background worker draining the job store

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::pipeline::Pipeline;
use crate::queue::jobs::Job;
use crate::queue::store::JobStore;
use crate::storage::remove_upload;

pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_millis(500);

/// The single consumer of a [`JobStore`].
///
/// Jobs are processed strictly one at a time, in dequeue order. A failed job
/// is logged and dropped: it is neither retried nor re-enqueued, and no
/// result is ever stored for its request id.
pub struct Worker {
    store: Arc<JobStore>,
    pipeline: Pipeline,
    idle_interval: Duration,
}

impl Worker {
    pub fn new(store: Arc<JobStore>, pipeline: Pipeline) -> Self {
        Self {
            store,
            pipeline,
            idle_interval: DEFAULT_IDLE_INTERVAL,
        }
    }

    pub fn with_idle_interval(mut self, idle_interval: Duration) -> Self {
        self.idle_interval = idle_interval;
        self
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Drain the store until `shutdown` is cancelled.
    ///
    /// Cancellation is checked between jobs; a job already in flight runs to
    /// completion first.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(idle_ms = self.idle_interval.as_millis() as u64, "Worker started");

        while !shutdown.is_cancelled() {
            match self.store.try_dequeue() {
                Some(job) => {
                    self.process_job(job).await;
                }
                None => {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(self.idle_interval) => {}
                    }
                }
            }
        }

        info!(pending = self.store.pending_count(), "Worker stopped");
    }

    /// Run one job through the pipeline. Returns whether a result was stored.
    pub async fn process_job(&self, job: Job) -> bool {
        let span = info_span!("job", request_id = %job.request_id);

        async {
            info!(
                text_only = job.text_only,
                language = %job.language,
                size = %job.size,
                "Processing job"
            );

            let outcome = AssertUnwindSafe(self.pipeline.process(&job))
                .catch_unwind()
                .await;

            let stored = match outcome {
                Ok(Ok(result)) => {
                    self.store.store_result(result);
                    info!("Job complete");
                    true
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Job failed, dropping");
                    false
                }
                Err(panic) => {
                    error!(panic = %panic_message(&*panic), "Job panicked, dropping");
                    false
                }
            };

            remove_upload(&job.source_path).await;
            stored
        }
        .instrument(span)
        .await
    }
}

/// Drop every job still queued and delete its upload. Returns how many were
/// dropped. Only meaningful once the worker has stopped.
pub async fn discard_pending(store: &JobStore) -> usize {
    let abandoned = store.drain_pending();
    for job in &abandoned {
        debug!(request_id = %job.request_id, "Discarding unprocessed job");
        remove_upload(&job.source_path).await;
    }
    if !abandoned.is_empty() {
        warn!(count = abandoned.len(), "Discarded unprocessed jobs at shutdown");
    }
    abandoned.len()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
