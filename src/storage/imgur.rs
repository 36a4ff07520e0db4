// Imgur image hosting client
// API Reference: https://apidocs.imgur.com/#c85c9dfc-7487-4de2-9ecd-66f727cf3139

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};

use crate::config::{HttpConfig, ImgurConfig};
use crate::storage::ImageHost;
use crate::types::{AppError, AppResult};
use crate::utils::build_client;

pub const IMGUR_UPLOAD_URL: &str = "https://api.imgur.com/3/upload";

const FALLBACK_MIME: &str = "image/png";

pub struct ImgurClient {
    client: Client,
    api_key: String,
    upload_url: String,
}

#[derive(Deserialize)]
struct ImgurResponse {
    data: ImgurImage,
}

#[derive(Deserialize)]
struct ImgurImage {
    link: String,
}

impl ImgurClient {
    pub fn with_upload_url(api_key: &str, upload_url: &str, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key: api_key.to_string(),
            upload_url: upload_url.to_string(),
        })
    }

    pub fn from_config(config: &ImgurConfig, http: &HttpConfig) -> AppResult<Self> {
        Self::with_upload_url(&config.api_key, &config.upload_url, http.timeout())
    }

    fn mime_for(path: &Path) -> String {
        mime_guess::from_path(path)
            .first()
            .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string())
    }
}

#[async_trait]
impl ImageHost for ImgurClient {
    async fn upload(&self, local_path: &Path) -> AppResult<String> {
        let bytes = fs::read(local_path).await.map_err(|e| {
            AppError::Upload(format!(
                "Image file not found at {}: {}",
                local_path.display(),
                e
            ))
        })?;

        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let mime = Self::mime_for(local_path);
        debug!(file_name = %file_name, mime = %mime, size = bytes.len(), "Uploading image");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|e| AppError::Upload(format!("Invalid MIME type {}: {}", mime, e)))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.upload_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("Imgur request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upload(format!(
                "Error uploading to Imgur: {} - {}",
                status, body
            )));
        }

        let parsed: ImgurResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Failed to parse Imgur response: {}", e)))?;

        info!(link = %parsed.data.link, "Image uploaded");
        Ok(parsed.data.link)
    }
}
