// Optical character recognition

use async_trait::async_trait;

use crate::models::Language;
use crate::types::AppResult;

pub mod azure;

pub use azure::AzureOcrClient;

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract the printed text of a hosted image.
    async fn recognize(&self, image_url: &str, language: Language) -> AppResult<String>;
}
