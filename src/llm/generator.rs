//! The `MessageGenerator` seam and its chat completion implementation.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::commit::subject::ConventionalSubject;
use crate::config::ApiConfig;
use crate::error::GenerationError;

use super::prompt::build_messages;
use super::types::{ChatRequest, ChatResponse};

/// Maximum characters of an error body kept in [`GenerationError::Api`].
const MAX_ERROR_BODY: usize = 500;

/// Produces a commit message from staged diff text.
///
/// This abstraction allows scripting generation results in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Generate a candidate message. Fails instead of inventing a message
    /// when the diff is empty or the API returns nothing usable.
    async fn generate(&self, diff: &str) -> Result<String, GenerationError>;
}

/// Generator backed by an OpenAI-compatible `chat/completions` endpoint.
pub struct ChatCompletionGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: SecretString,
}

impl ChatCompletionGenerator {
    pub fn new(config: &ApiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GenerationError::Request)?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            model: config.model.clone(),
            api_key: SecretString::from(config.api_key().expose_secret().to_string()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl MessageGenerator for ChatCompletionGenerator {
    async fn generate(&self, diff: &str) -> Result<String, GenerationError> {
        if diff.trim().is_empty() {
            return Err(GenerationError::EmptyDiff);
        }

        let request = ChatRequest {
            model: &self.model,
            messages: build_messages(diff),
        };

        debug!(
            "Requesting completion from {} (model {}, diff {} chars)",
            self.endpoint,
            self.model,
            diff.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: body.trim().chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(GenerationError::Request)?;
        let message = parsed
            .first_content()
            .ok_or(GenerationError::EmptyResponse)?
            .to_string();

        if ConventionalSubject::parse(&message).is_none() {
            warn!("Generated message does not follow the type(scope): description form");
        }

        Ok(message)
    }
}

/// Join `chat/completions` onto a base URL, with or without a trailing slash.
fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}
