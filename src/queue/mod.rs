//! In-memory job queue
//!
//! Submissions land in a [`JobStore`]; a single [`Worker`] drains it in FIFO
//! order, runs each [`Job`] through the processing pipeline and stores the
//! [`JobResult`] for polling.

pub mod jobs;
pub mod store;
pub mod workers;

pub use jobs::{Job, JobResult};
pub use store::JobStore;
pub use workers::{discard_pending, Worker};
