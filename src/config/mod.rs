//! Configuration for the analytics pipeline and its external collaborators.

use std::time::Duration;

/// Configuration for the narrative stage of the pipeline
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Identifier of the pinned text-generation model
    pub model_id: String,
    /// Sampling temperature passed to the text-generation service
    pub temperature: f64,
    /// Maximum number of output tokens per section request
    pub max_output_tokens: u32,
    /// Delay imposed after each successful section call
    pub section_delay: Duration,
    /// Shorter backoff imposed after a failed section call
    pub failure_backoff: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model_id: "mixtral-8x7b-32768".to_string(),
            temperature: 0.7,
            max_output_tokens: 4000,
            section_delay: Duration::from_secs(60),
            failure_backoff: Duration::from_secs(10),
        }
    }
}

/// Configuration for the HTTP record store adapter
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the record store, without a trailing slash
    pub base_url: String,
    /// API key sent as a bearer token, if the store requires one
    pub api_key: Option<String>,
    /// Request timeout for a single fetch
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for the HTTP text-generation adapter
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// API key sent as a bearer token
    pub api_key: Option<String>,
    /// Request timeout for a single generation call
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}
