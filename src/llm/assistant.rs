//! Assistant
//!
//! Turns the pipeline's two chat operations into prompt-bearing requests for
//! whatever [`LLMAdapter`] is configured.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm::provider::{ChatCompletion, LLMAdapter};
use crate::models::{Language, SizeMode};
use crate::types::{AppResult, ContentPart, LLMMessage, LLMRequest};

pub const DEFAULT_MODEL: &str = "gpt-4o";

const TEXT_TASK_PROMPT: &str = "Look at the text, find the questions and answer to them in the language the text on the image is written.\n\n";

const IMAGE_TASK_PROMPT: &str = r#"You are an advanced AI capable of processing images and extracting meaningful information. Your task is as follows:

1. **Image Analysis:** Extract all text from the image, including questions, instructions, and multiple-choice options.

2. **Question Solving:** Answer **all** identified questions clearly and concisely.
   - Instead of rewriting the full question, provide a **short summary** of its meaning before answering.
   - If a question has multiple-choice options, select the correct answer(s) and explain the reasoning.
   - If the question requires eliminating incorrect answers, provide the **remaining valid options**.

3. **Language Consistency:** Write responses in the same language as the text found in the image. Write a summary in the same language as the text found in the image.

4. **Structured Responses:** Present answers in a numbered list or bullet points for clarity.

5. **Formatting:**
   - Use a **short summary of the question** instead of repeating it in full.
   - For open-ended questions, provide a brief but well-structured explanation.
   - For multiple-choice questions, list the correct choice(s) with reasoning.
   - For elimination-type questions, list only the valid options.

6. **Answer Quality:** Ensure that your answers are accurate, relevant, and complete. If a question is ambiguous, provide a clear explanation of the assumptions made.

7. **IMPORTANT:** Do not provide answers that are factually incorrect, misleading, or inappropriate.

8. **IMPORTANT:** Write in a language that on the image is written.

9. **IMPORTANT:** If you write math formulas, please use LaTeX formatting.

**Note:** If the image contains multiple questions, answer each question separately. If the image contains a passage with questions, answer each question based on the passage content. If the image contains a single question, provide a detailed and accurate response."#;

pub struct Assistant {
    adapter: Box<dyn LLMAdapter>,
    model: String,
}

impl Assistant {
    pub fn new(adapter: Box<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        Self {
            adapter,
            model: model.into(),
        }
    }

    fn text_request(&self, text: &str, size: SizeMode) -> LLMRequest {
        let prompt = format!("{}{}\n\n{}", TEXT_TASK_PROMPT, text, size.instruction());

        LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user(prompt)],
            max_tokens: None,
            temperature: None,
        }
    }

    fn image_request(&self, image_url: &str, language: Language, size: SizeMode) -> LLMRequest {
        let user = LLMMessage::user_multimodal(vec![
            ContentPart::Text {
                text: IMAGE_TASK_PROMPT.to_string(),
            },
            ContentPart::ImageUrl {
                url: image_url.to_string(),
                detail: None,
            },
            ContentPart::Text {
                text: size.instruction().to_string(),
            },
            ContentPart::Text {
                text: language.instruction().to_string(),
            },
        ]);

        LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::system(IMAGE_TASK_PROMPT), user],
            max_tokens: None,
            temperature: None,
        }
    }

    async fn complete(&self, request: &LLMRequest) -> AppResult<String> {
        let response = self.adapter.create_chat_completion(request).await?;

        if response.finish_reason == "length" {
            warn!("Model answer was cut off at the token limit");
        }
        info!(
            finish_reason = %response.finish_reason,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            "Model answered"
        );

        Ok(response.content)
    }
}

#[async_trait]
impl ChatCompletion for Assistant {
    async fn complete_text(&self, text: &str, size: SizeMode) -> AppResult<String> {
        info!(text_len = text.len(), size = %size, "Answering recognized text");
        self.complete(&self.text_request(text, size)).await
    }

    async fn complete_image(
        &self,
        image_url: &str,
        language: Language,
        size: SizeMode,
    ) -> AppResult<String> {
        info!(image_url = %image_url, language = %language, size = %size, "Answering image");
        self.complete(&self.image_request(image_url, language, size))
            .await
    }
}
