use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::llm::assistant::DEFAULT_MODEL;
use crate::llm::openai::OPENAI_API_BASE;
use crate::storage::imgur::IMGUR_UPLOAD_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub worker: WorkerConfig,
    pub llm: LLMConfig,
    pub imgur: ImgurConfig,
    pub ocr: OcrConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    pub idle_interval_ms: u64,
}

impl WorkerConfig {
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }
}

/// Settings shared by every outbound HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub openai_api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImgurConfig {
    pub api_key: String,
    pub upload_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub endpoint: String,
    pub subscription_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            upload: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| env::temp_dir().join("ocr-chat-uploads")),
                max_bytes: env::var("UPLOAD_MAX_BYTES")
                    .unwrap_or_else(|_| "10485760".to_string())
                    .parse()
                    .context("UPLOAD_MAX_BYTES must be a number")?,
            },
            worker: WorkerConfig {
                idle_interval_ms: positive("WORKER_IDLE_INTERVAL_MS", "500")?,
            },
            llm: LLMConfig {
                openai_api_key: required("OPENAI_API_KEY")?,
                base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| OPENAI_API_BASE.to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            },
            imgur: ImgurConfig {
                api_key: required("IMGUR_API_KEY")?,
                upload_url: env::var("IMGUR_UPLOAD_URL")
                    .unwrap_or_else(|_| IMGUR_UPLOAD_URL.to_string()),
            },
            ocr: OcrConfig {
                endpoint: required("AZURE_OCR_ENDPOINT")?,
                subscription_key: required("AZURE_OCR_KEY")?,
            },
            http: HttpConfig {
                timeout_secs: positive("HTTP_TIMEOUT_SECS", "60")?,
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

fn positive(name: &str, default: &str) -> Result<u64> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_positive(name, &raw)
}

// Intervals and timeouts must be non-zero.
fn parse_positive(name: &str, raw: &str) -> Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number, got '{}'", name, raw))?;
    if value == 0 {
        bail!("{} must be greater than zero", name);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("WORKER_IDLE_INTERVAL_MS", "500").unwrap(), 500);
        assert_eq!(parse_positive("HTTP_TIMEOUT_SECS", " 30 ").unwrap(), 30);
    }

    #[test]
    fn test_parse_positive_rejects_zero() {
        let err = parse_positive("WORKER_IDLE_INTERVAL_MS", "0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_parse_positive_rejects_garbage() {
        assert!(parse_positive("HTTP_TIMEOUT_SECS", "-1").is_err());
        assert!(parse_positive("HTTP_TIMEOUT_SECS", "soon").is_err());
        assert!(parse_positive("HTTP_TIMEOUT_SECS", "").is_err());
    }

    #[test]
    fn test_durations() {
        let worker = WorkerConfig { idle_interval_ms: 250 };
        assert_eq!(worker.idle_interval(), Duration::from_millis(250));
        let http = HttpConfig { timeout_secs: 5 };
        assert_eq!(http.timeout(), Duration::from_secs(5));
    }
}
