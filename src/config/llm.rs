//! LLM gateway configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// LLM gateway configuration
///
/// The gateway speaks an OpenAI-compatible chat completion protocol.
/// Generation (interview turns) and classification (intent, field
/// extraction, closure detection) can use different models.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API key for the gateway
    pub api_key: Option<Secret<String>>,

    /// Base URL of the gateway
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for interview turn generation
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Model used for classification calls (cheaper, low temperature)
    #[serde(default = "default_classification_model")]
    pub classification_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate LLM configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("LLM_API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidLlmBaseUrl);
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            generation_model: default_generation_model(),
            classification_model: default_classification_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generation_model() -> String {
    "gpt-4o".to_string()
}

fn default_classification_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_secs, 60);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_timeout_duration() {
        let config = LlmConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_missing_key() {
        let config = LlmConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = LlmConfig {
            api_key: Some(Secret::new("sk-xxx".to_string())),
            base_url: "ftp://gateway".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = LlmConfig {
            api_key: Some(Secret::new("sk-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
