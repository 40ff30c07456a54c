//! Grantex Backend Provider Layer
//!
//! Pluggable network backends behind the `LlmProvider` and
//! `EmbeddingBackend` traits from `grantex-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `OllamaEmbedder`: Ollama embeddings API
//!
//! # Examples
//!
//! ```
//! use grantex_llm::MockProvider;
//! use grantex_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("{\"grant_name\": \"\", \"projects\": []}");
//! let result = provider.generate("any prompt").unwrap();
//! assert!(result.starts_with('{'));
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;

use grantex_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaEmbedder;
pub use openai::{LlmConfig, OpenAiProvider};

/// Errors that can occur during backend operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Required configuration is missing
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Generic error
    #[error("Backend error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses can be keyed by a prompt substring, so a multi-task run can
/// answer each task's question differently.
///
/// # Examples
///
/// ```
/// use grantex_llm::MockProvider;
/// use grantex_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("{}");
/// provider.respond_when("grant amount", "{\"total\": 100}");
/// assert_eq!(provider.generate("what is the grant amount?").unwrap(), "{\"total\": 100}");
/// assert_eq!(provider.generate("anything else").unwrap(), "{}");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    // (needle, response); None injects an error. First contains-match wins.
    responses: Arc<Mutex<Vec<(String, Option<String>)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Return `response` for any prompt containing `needle`
    pub fn respond_when(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), Some(response.into())));
    }

    /// Fail with an error for any prompt containing `needle`
    pub fn fail_when(&mut self, needle: impl Into<String>) {
        self.responses.lock().unwrap().push((needle.into(), None));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        for (needle, response) in responses.iter() {
            if prompt.contains(needle.as_str()) {
                return match response {
                    Some(text) => Ok(text.clone()),
                    None => Err(LlmError::Other("Mock error".to_string())),
                };
            }
        }

        Ok(self.default_response.clone())
    }
}
