use async_trait::async_trait;

use crate::models::{Language, SizeMode};
use crate::types::{AppResult, LLMRequest, LLMResponse};

/// Transport for a chat-completions style API
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// The two questions the pipeline asks a language model.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Answer the questions found in recognized text.
    async fn complete_text(&self, text: &str, size: SizeMode) -> AppResult<String>;

    /// Answer the questions shown in a hosted image.
    async fn complete_image(
        &self,
        image_url: &str,
        language: Language,
        size: SizeMode,
    ) -> AppResult<String>;
}
