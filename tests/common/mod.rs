#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ocr_chat_server::config::{
    Config, HttpConfig, ImgurConfig, LLMConfig, OcrConfig, ServerConfig, UploadConfig,
    WorkerConfig,
};
use ocr_chat_server::llm::ChatCompletion;
use ocr_chat_server::models::{Language, SizeMode};
use ocr_chat_server::ocr::OcrEngine;
use ocr_chat_server::storage::ImageHost;
use ocr_chat_server::types::{AppError, AppResult};
use ocr_chat_server::{create_router, AppState, JobStore, Pipeline};

pub const BOUNDARY: &str = "----ocrchatboundary";

/// Config pointing uploads at `upload_dir`; remote credentials are never used.
pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        upload: UploadConfig {
            dir: upload_dir.to_path_buf(),
            max_bytes: 1024 * 1024,
        },
        worker: WorkerConfig { idle_interval_ms: 10 },
        llm: LLMConfig {
            openai_api_key: "unused".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-4o".to_string(),
        },
        imgur: ImgurConfig {
            api_key: "unused".to_string(),
            upload_url: "http://127.0.0.1:9".to_string(),
        },
        ocr: OcrConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            subscription_key: "unused".to_string(),
        },
        http: HttpConfig { timeout_secs: 5 },
    }
}

pub fn build_test_app(store: Arc<JobStore>, upload_dir: &Path) -> Router {
    create_router(AppState {
        store,
        config: test_config(upload_dir),
    })
}

/// Multipart body with text fields followed by an optional file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

// Capabilities that answer from fixed strings

pub struct StaticHost(pub &'static str);

#[async_trait]
impl ImageHost for StaticHost {
    async fn upload(&self, local_path: &Path) -> AppResult<String> {
        if !local_path.exists() {
            return Err(AppError::Upload(format!(
                "Image file not found: {}",
                local_path.display()
            )));
        }
        Ok(self.0.to_string())
    }
}

pub struct StaticOcr(pub &'static str);

#[async_trait]
impl OcrEngine for StaticOcr {
    async fn recognize(&self, _image_url: &str, _language: Language) -> AppResult<String> {
        Ok(self.0.to_string())
    }
}

pub struct EchoChat;

#[async_trait]
impl ChatCompletion for EchoChat {
    async fn complete_text(&self, text: &str, size: SizeMode) -> AppResult<String> {
        Ok(format!("text[{size}]: {text}"))
    }

    async fn complete_image(
        &self,
        image_url: &str,
        language: Language,
        size: SizeMode,
    ) -> AppResult<String> {
        Ok(format!("image[{language},{size}]: {image_url}"))
    }
}

pub fn static_pipeline() -> Pipeline {
    Pipeline::new(
        Arc::new(StaticHost("https://img/hosted.png")),
        Arc::new(StaticOcr("What is 2+2?")),
        Arc::new(EchoChat),
    )
}
