// Job and result records exchanged through the store

use std::path::PathBuf;

use serde::Serialize;

use crate::models::{Language, SizeMode};

/// One submitted unit of work. Never mutated after it is enqueued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub request_id: String,
    pub language: Language,
    pub size: SizeMode,
    /// Locally persisted upload. The worker removes it once the job is done.
    pub source_path: PathBuf,
    pub text_only: bool,
}

/// Outcome of a successfully processed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub request_id: String,
    /// Whatever was handed to the language model: the OCR text when the job
    /// ran in text-only mode, otherwise the hosted image URL.
    pub extracted_text: String,
    pub response: String,
}
