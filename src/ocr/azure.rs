// Azure Computer Vision OCR adapter
// API Reference: https://westus.dev.cognitive.microsoft.com/docs/services/computer-vision-v3-2/operations/56f91f2e778daf14a499f20d

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{HttpConfig, OcrConfig};
use crate::models::Language;
use crate::ocr::OcrEngine;
use crate::types::{AppError, AppResult};
use crate::utils::build_client;

const OCR_PATH: &str = "/vision/v3.2/ocr";

pub struct AzureOcrClient {
    client: Client,
    endpoint: String,
    subscription_key: String,
}

#[derive(Serialize)]
struct OcrRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    regions: Vec<OcrRegion>,
}

#[derive(Deserialize)]
struct OcrRegion {
    #[serde(default)]
    lines: Vec<OcrLine>,
}

#[derive(Deserialize)]
struct OcrLine {
    #[serde(default)]
    words: Vec<OcrWord>,
}

#[derive(Deserialize)]
struct OcrWord {
    text: String,
}

impl AzureOcrClient {
    pub fn new(endpoint: &str, subscription_key: &str, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_key: subscription_key.to_string(),
        })
    }

    pub fn from_config(config: &OcrConfig, http: &HttpConfig) -> AppResult<Self> {
        Self::new(&config.endpoint, &config.subscription_key, http.timeout())
    }

    /// All words of all lines of all regions, in reading order, space separated
    fn join_words(response: &OcrResponse) -> String {
        response
            .regions
            .iter()
            .flat_map(|region| region.lines.iter())
            .flat_map(|line| line.words.iter())
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl OcrEngine for AzureOcrClient {
    async fn recognize(&self, image_url: &str, language: Language) -> AppResult<String> {
        let url = format!("{}{}", self.endpoint, OCR_PATH);
        debug!(image_url = %image_url, language = %language, "Requesting OCR");

        let response = self
            .client
            .post(&url)
            .query(&[
                ("language", language.ocr_hint()),
                ("detectOrientation", "true"),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .json(&OcrRequest { url: image_url })
            .send()
            .await
            .map_err(|e| AppError::Ocr(format!("OCR request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Ocr(format!("OCR API error ({}): {}", status, body)));
        }

        let parsed: OcrResponse = response
            .json()
            .await
            .map_err(|e| AppError::Ocr(format!("Failed to parse OCR response: {}", e)))?;

        let text = Self::join_words(&parsed);
        if text.is_empty() {
            return Err(AppError::Ocr("No text recognized in image".to_string()));
        }

        info!(chars = text.len(), "OCR complete");
        Ok(text)
    }
}
