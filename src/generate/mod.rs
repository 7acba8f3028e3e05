//! Text-generation service interface
//!
//! The narrative stage talks to the external language-understanding service
//! through the `TextGenerator` trait. `HttpTextGenerator` speaks an
//! OpenAI-compatible chat-completions protocol; any transport problem or
//! malformed response surfaces as an error for the caller to isolate per
//! section.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{AnalyticsError, Result};

/// One message of a chat-style generation request
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role, e.g. `user`
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A user-role message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A single generation request with pinned model and sampling parameters
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Identifier of the pinned model
    pub model: String,
    /// Conversation messages, in order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum number of output tokens
    pub max_tokens: u32,
}

/// External text-generation service
pub trait TextGenerator {
    /// Generate prose for one request
    fn generate(&self, request: &GenerationRequest) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// HTTP-backed text generator
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl HttpTextGenerator {
    /// Build a generator client from its configuration
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate(&self, request: &GenerationRequest) -> impl Future<Output = Result<String>> + Send {
        let mut http_request = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            http_request = http_request.bearer_auth(key);
        }

        async move {
            let response: ChatCompletionResponse = http_request
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| {
                    AnalyticsError::Generation("response contained no choices".to_string())
                })
        }
    }
}
