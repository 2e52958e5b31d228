//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
///
/// Base URL and API key have no defaults: the relay refuses to start
/// without them.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Provider API base URL (e.g. `https://api.groq.com/openai/v1`)
    pub base_url: Option<String>,

    /// Provider API key
    pub api_key: Option<Secret<String>>,

    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL, if configured and non-empty
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// API key, if configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let base_url = self
            .base_url()
            .ok_or(ValidationError::MissingRequired("RELAY__AI__BASE_URL"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        if self.api_key().is_none() {
            return Err(ValidationError::MissingRequired("RELAY__AI__API_KEY"));
        }

        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("RELAY__AI__MODEL"));
        }

        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    crate::adapters::ai::DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    120
}
