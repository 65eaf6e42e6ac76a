//! Gemini model registry

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Gemini model identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
}

impl GeminiModel {
    /// All models the backend accepts
    pub const ALL: [GeminiModel; 3] = [
        GeminiModel::Gemini25Pro,
        GeminiModel::Gemini25Flash,
        GeminiModel::Gemini25FlashLite,
    ];

    /// Get the model identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            GeminiModel::Gemini25Pro => "gemini-2.5-pro",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini25FlashLite => "gemini-2.5-flash-lite",
        }
    }
}

impl Default for GeminiModel {
    fn default() -> Self {
        GeminiModel::Gemini25Flash
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeminiModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeminiModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| ModelError::UnsupportedModel(s.to_string()))
    }
}

/// Errors from model id lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The requested id is not in the registry
    #[error(
        "Unsupported model '{0}'. Supported models: \
         gemini-2.5-pro, gemini-2.5-flash, gemini-2.5-flash-lite."
    )]
    UnsupportedModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_model_as_str() {
        assert_eq!(GeminiModel::Gemini25Pro.as_str(), "gemini-2.5-pro");
        assert_eq!(GeminiModel::Gemini25Flash.as_str(), "gemini-2.5-flash");
        assert_eq!(
            GeminiModel::Gemini25FlashLite.as_str(),
            "gemini-2.5-flash-lite"
        );
    }

    #[test]
    fn test_default_model() {
        assert_eq!(GeminiModel::default(), GeminiModel::Gemini25Flash);
    }

    #[test]
    fn test_parse_known_models() {
        for model in GeminiModel::ALL {
            let parsed: GeminiModel = model.as_str().parse().unwrap();
            assert_eq!(parsed, model);
        }
    }

    #[test]
    fn test_parse_unknown_model() {
        let err = "gemini-1.0-ultra".parse::<GeminiModel>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnsupportedModel("gemini-1.0-ultra".to_string())
        );
        assert!(err.to_string().contains("Unsupported model"));
        assert!(err.to_string().contains("gemini-2.5-flash"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Gemini-2.5-Flash".parse::<GeminiModel>().is_err());
        assert!("".parse::<GeminiModel>().is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(
            GeminiModel::Gemini25FlashLite.to_string(),
            "gemini-2.5-flash-lite"
        );
    }
}
