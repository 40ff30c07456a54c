//! Ollama embedding backend
//!
//! Computes text embeddings through a local Ollama instance using one
//! fixed embedding model for the whole run. If the service is
//! unreachable, the error propagates and aborts the index build; there is
//! no fallback embedding path.

use crate::LlmError;
use grantex_domain::traits::EmbeddingBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default embedding model
pub const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Vector dimension of the default embedding model
pub const DEFAULT_DIMENSION: usize = 768;

/// Default timeout for embedding requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Embedding provider backed by the Ollama embeddings API
pub struct OllamaEmbedder {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    /// Create a new embedder
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Embedding model to use (e.g., "nomic-embed-text")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            dimension: DEFAULT_DIMENSION,
            client,
        }
    }

    /// Create an embedder against the default local endpoint and model
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_EMBED_MODEL)
    }

    /// Override the expected vector dimension (model-dependent)
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Compute the embedding for one text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Ollama is not running
    /// - The model is not available
    /// - The response format is invalid
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = format!("{}/api/embeddings", self.endpoint.trim_end_matches('/'));

        let request_body = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
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

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(parsed.embedding)
    }
}

impl EmbeddingBackend for OllamaEmbedder {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        // Blocking wrapper for the async request; callers bridge through
        // spawn_blocking
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.embed_text(text).await })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
