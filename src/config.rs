//! API configuration from environment variables.
//!
//! Key selection order:
//! 1. `GEMINI_API_KEY` (Gemini's OpenAI-compatible endpoint)
//! 2. `OPENAI_API_KEY` (OpenAI)
//!
//! `AI_COMMIT_MODEL` overrides the provider's default model.

use std::env;
use std::fmt;

use secrecy::SecretString;
use tracing::debug;

use crate::error::ConfigError;

pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "AI_COMMIT_MODEL";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";

/// Which API key selected the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::OpenAi => "OpenAI",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_BASE_URL,
            Provider::OpenAi => OPENAI_BASE_URL,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved chat-completion endpoint, model and credential.
#[derive(Debug)]
pub struct ApiConfig {
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    api_key: SecretString,
}

impl ApiConfig {
    /// Build a config for `provider` with its default endpoint.
    pub fn new(provider: Provider, api_key: SecretString, model: Option<String>) -> Self {
        Self {
            provider,
            base_url: provider.base_url().to_string(),
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            api_key,
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (provider, key) = if let Some(key) = non_empty_var(GEMINI_KEY_VAR) {
            (Provider::Gemini, key)
        } else if let Some(key) = non_empty_var(OPENAI_KEY_VAR) {
            (Provider::OpenAi, key)
        } else {
            return Err(ConfigError::MissingApiKey);
        };

        let config = Self::new(provider, SecretString::from(key), non_empty_var(MODEL_VAR));
        debug!(
            "Using {} at {} with model {}",
            config.provider, config.base_url, config.model
        );
        Ok(config)
    }

    /// Point the config at a different endpoint (e.g. a local proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
