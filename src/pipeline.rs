//! Processing Pipeline
//!
//! Turns one [`Job`] into one [`JobResult`]:
//!
//! ```text
//!  local image ──upload──▶ hosted URL
//!                             │
//!             text_only ──────┼────── !text_only
//!                 │                        │
//!                OCR                       │
//!                 │                        │
//!          complete_text            complete_image
//!                 │                        │
//!                 ▼                        ▼
//!      JobResult { extracted_text: OCR text | hosted URL, response }
//! ```
//!
//! The pipeline performs no I/O of its own; every external effect goes
//! through one of the three capabilities it is built with.

use std::sync::Arc;

use tracing::debug;

use crate::llm::ChatCompletion;
use crate::ocr::OcrEngine;
use crate::queue::{Job, JobResult};
use crate::storage::ImageHost;
use crate::types::AppResult;

#[derive(Clone)]
pub struct Pipeline {
    image_host: Arc<dyn ImageHost>,
    ocr: Arc<dyn OcrEngine>,
    chat: Arc<dyn ChatCompletion>,
}

impl Pipeline {
    pub fn new(
        image_host: Arc<dyn ImageHost>,
        ocr: Arc<dyn OcrEngine>,
        chat: Arc<dyn ChatCompletion>,
    ) -> Self {
        Self {
            image_host,
            ocr,
            chat,
        }
    }

    pub async fn process(&self, job: &Job) -> AppResult<JobResult> {
        let image_url = self.image_host.upload(&job.source_path).await?;
        debug!(request_id = %job.request_id, image_url = %image_url, "Image hosted");

        let (extracted_text, response) = if job.text_only {
            let text = self.ocr.recognize(&image_url, job.language).await?;
            let response = self.chat.complete_text(&text, job.size).await?;
            (text, response)
        } else {
            let response = self
                .chat
                .complete_image(&image_url, job.language, job.size)
                .await?;
            (image_url, response)
        };

        Ok(JobResult {
            request_id: job.request_id.clone(),
            extracted_text,
            response,
        })
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::fakes::pipeline;
    use super::*;
    use crate::models::{Language, SizeMode};
    use crate::types::AppError;

    fn job(text_only: bool) -> Job {
        Job {
            request_id: "req-1".to_string(),
            language: Language::En,
            size: SizeMode::Small,
            source_path: PathBuf::from("/tmp/upload.png"),
            text_only,
        }
    }

    #[tokio::test]
    async fn test_text_only_path() {
        let (pipeline, log) = pipeline(
            Some("https://img/x"),
            Some("What is 2+2?"),
            "1. 2+2=4",
            "unused",
        );

        let result = pipeline.process(&job(true)).await.unwrap();

        assert_eq!(
            result,
            JobResult {
                request_id: "req-1".to_string(),
                extracted_text: "What is 2+2?".to_string(),
                response: "1. 2+2=4".to_string(),
            }
        );
        assert_eq!(
            log.entries(),
            vec![
                "upload:/tmp/upload.png",
                "ocr:https://img/x:en",
                "text:What is 2+2?:small",
            ]
        );
    }

    #[tokio::test]
    async fn test_image_path_skips_ocr() {
        let (pipeline, log) = pipeline(
            Some("https://img/y"),
            Some("never read"),
            "unused",
            "1. Summary... Answer: 4",
        );

        let result = pipeline.process(&job(false)).await.unwrap();

        assert_eq!(result.request_id, "req-1");
        assert_eq!(result.extracted_text, "https://img/y");
        assert_eq!(result.response, "1. Summary... Answer: 4");
        assert_eq!(
            log.entries(),
            vec!["upload:/tmp/upload.png", "image:https://img/y:en:small"]
        );
    }

    #[tokio::test]
    async fn test_upload_failure_aborts() {
        let (pipeline, log) = pipeline(None, Some("text"), "a", "b");

        let result = pipeline.process(&job(true)).await;

        assert!(matches!(result, Err(AppError::Upload(_))));
        assert_eq!(log.entries(), vec!["upload:/tmp/upload.png"]);
    }

    #[tokio::test]
    async fn test_ocr_failure_skips_chat() {
        let (pipeline, log) = pipeline(Some("https://img/x"), None, "a", "b");

        let result = pipeline.process(&job(true)).await;

        assert!(matches!(result, Err(AppError::Ocr(_))));
        assert_eq!(log.entries().len(), 2);
    }
}
