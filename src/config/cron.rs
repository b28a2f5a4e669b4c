//! Cron endpoint configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for secret-guarded cron endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct CronConfig {
    /// Bearer secret expected on cron requests
    pub secret: Secret<String>,

    /// Knowledge-base growth lookback window in days
    #[serde(default = "default_lookback_days")]
    pub kb_lookback_days: u32,
}

impl CronConfig {
    /// Validate cron configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().len() < 16 {
            return Err(ValidationError::CronSecretTooShort);
        }
        if self.kb_lookback_days == 0 || self.kb_lookback_days > 30 {
            return Err(ValidationError::InvalidCronLookback);
        }
        Ok(())
    }
}

fn default_lookback_days() -> u32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> CronConfig {
        CronConfig {
            secret: Secret::new(secret.to_string()),
            kb_lookback_days: default_lookback_days(),
        }
    }

    #[test]
    fn test_default_lookback_is_seven_days() {
        let config = config_with_secret("a-sufficiently-long-secret");
        assert_eq!(config.kb_lookback_days, 7);
    }

    #[test]
    fn test_validation_short_secret() {
        let config = config_with_secret("short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_lookback() {
        let mut config = config_with_secret("a-sufficiently-long-secret");
        config.kb_lookback_days = 0;
        assert!(config.validate().is_err());

        config.kb_lookback_days = 45;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config_with_secret("a-sufficiently-long-secret");
        assert!(config.validate().is_ok());
    }
}
