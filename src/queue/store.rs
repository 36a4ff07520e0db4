use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Language, SizeMode};
use crate::queue::jobs::{Job, JobResult};

/// Pending jobs plus completed results.
///
/// Every method takes `&self` and is safe to call from any number of tasks.
/// The queue lock is only ever held for a single push or pop, so no caller
/// waits behind another caller's I/O.
#[derive(Default)]
pub struct JobStore {
    pending: Mutex<VecDeque<Job>>,
    results: DashMap<String, JobResult>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a job with a fresh request id and enqueue it.
    pub fn submit(
        &self,
        language: Language,
        size: SizeMode,
        source_path: impl Into<PathBuf>,
        text_only: bool,
    ) -> String {
        let request_id = Uuid::new_v4().to_string();
        self.enqueue(Job {
            request_id: request_id.clone(),
            language,
            size,
            source_path: source_path.into(),
            text_only,
        });
        request_id
    }

    pub fn enqueue(&self, job: Job) {
        debug!(request_id = %job.request_id, "Job enqueued");
        self.queue().push_back(job);
    }

    /// Remove and return the oldest pending job, if any.
    pub fn try_dequeue(&self) -> Option<Job> {
        self.queue().pop_front()
    }

    pub fn store_result(&self, result: JobResult) {
        self.results.insert(result.request_id.clone(), result);
    }

    /// `None` covers unknown, pending and failed ids alike.
    pub fn get_result(&self, request_id: &str) -> Option<JobResult> {
        self.results.get(request_id).map(|entry| entry.value().clone())
    }

    /// Remove every pending job at once, oldest first.
    pub fn drain_pending(&self) -> Vec<Job> {
        self.queue().drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue().len()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned guard is still usable.
    fn queue(&self) -> MutexGuard<'_, VecDeque<Job>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
