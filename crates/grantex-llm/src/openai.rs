//! OpenAI-compatible chat completions provider
//!
//! Talks to any endpoint implementing the OpenAI chat completions API
//! (OpenAI itself, or local gateways exposing the same surface).
//! Sampling is pinned to temperature 0 so the provider behaves as a
//! deterministic function of its input, to the extent the backend allows.
//!
//! Requests are single-shot: a backend failure propagates immediately and
//! is fatal to the run.

use crate::LlmError;
use grantex_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for completion requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Explicit configuration for the chat backend.
///
/// Constructed by the caller and passed into the provider, so tests can
/// substitute a mock implementing the same contract instead of relying on
/// ambient environment state.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chat completion model name
    pub model: String,

    /// API key; may be empty for local gateways that skip auth
    pub api_key: String,

    /// API base URL (the `/chat/completions` path is appended)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Create a config with the default timeout
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the config from the environment.
    ///
    /// `MODEL` is required; `OPENAI_KEY` defaults to empty and
    /// `OPENAI_BASE_URL` to the public OpenAI endpoint.
    pub fn from_env() -> Result<Self, LlmError> {
        let model = env::var("MODEL")
            .map_err(|_| LlmError::MissingConfig("MODEL".to_string()))?;
        let api_key = env::var("OPENAI_KEY").unwrap_or_default();
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(model, api_key, base_url))
    }
}

/// Chat completions provider for an OpenAI-compatible API
pub struct OpenAiProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiProvider {
    /// Create a new provider from an explicit configuration
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap();

        Self { config, client }
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Request a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The backend is unreachable
    /// - The model is not available
    /// - The response body is not the expected shape
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request_body = ChatRequest {
            model: &self.config.model,
            temperature: 0.0,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.client.post(&url).json(&request_body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response carried no choices".to_string()))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        // Blocking wrapper for the async request; callers bridge through
        // spawn_blocking
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.complete(prompt).await })
    }
}
