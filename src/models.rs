use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Config;
use crate::queue::JobStore;
use crate::types::AppError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
    pub config: Config,
}

/// Language the model must answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Ru,
    Ua,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Ua => "ua",
        }
    }

    /// Instruction appended to image prompts.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::En => "Respond in english. This is important!",
            Language::Ru => "Отвечай на русском. Это важно!",
            Language::Ua => "Відповідай українською. Це важливо!",
        }
    }

    /// Language hint for the OCR service. The legacy OCR endpoint has no
    /// Ukrainian model, so that case falls back to auto-detection.
    pub fn ocr_hint(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Ua => "unk",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            "ua" => Ok(Language::Ua),
            other => Err(AppError::UnsupportedOption(format!(
                "language code '{}'",
                other
            ))),
        }
    }
}

/// How long the model's answer should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeMode {
    /// Brief answers.
    Small,
    Medium,
    /// Thorough answers.
    Large,
}

impl SizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeMode::Small => "small",
            SizeMode::Medium => "medium",
            SizeMode::Large => "large",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            SizeMode::Small => "The responses should be brief and to the point. (small)",
            SizeMode::Medium => "The responses should be detailed and comprehensive. (medium)",
            SizeMode::Large => "The responses should be thorough and in-depth. (large)",
        }
    }
}

impl fmt::Display for SizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(SizeMode::Small),
            "medium" => Ok(SizeMode::Medium),
            "large" => Ok(SizeMode::Large),
            other => Err(AppError::UnsupportedOption(format!("size mode '{}'", other))),
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub request_id: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub queue_depth: usize,
    pub results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!("ua".parse::<Language>().unwrap(), Language::Ua);

        // Tags are case sensitive and never fall back to a default
        assert!(matches!(
            "EN".parse::<Language>(),
            Err(AppError::UnsupportedOption(_))
        ));
        assert!("de".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_size_parse() {
        assert_eq!("small".parse::<SizeMode>().unwrap(), SizeMode::Small);
        assert_eq!("medium".parse::<SizeMode>().unwrap(), SizeMode::Medium);
        assert_eq!("large".parse::<SizeMode>().unwrap(), SizeMode::Large);
        assert!(matches!(
            "huge".parse::<SizeMode>(),
            Err(AppError::UnsupportedOption(_))
        ));
    }

    #[test]
    fn test_display_round_trips_wire_tag() {
        for lang in [Language::En, Language::Ru, Language::Ua] {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
        assert_eq!(SizeMode::Large.to_string(), "large");
    }

    #[test]
    fn test_instructions() {
        assert_eq!(
            Language::En.instruction(),
            "Respond in english. This is important!"
        );
        assert!(SizeMode::Small.instruction().ends_with("(small)"));
        assert_eq!(Language::Ua.ocr_hint(), "unk");
    }
}
