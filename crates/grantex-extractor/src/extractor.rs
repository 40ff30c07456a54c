//! Core extraction engine

use crate::config::EngineConfig;
use crate::error::ExtractorError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use grantex_domain::traits::LlmProvider;
use grantex_domain::Schema;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};

/// The extraction engine: one schema-constrained model query per call.
///
/// Sends a fixed instruction prompt plus retrieved context and schema
/// description to the language model, then parses and validates the
/// response. Each call either yields a fully validated field map or
/// fails; partial data never escapes.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    provider: Arc<L>,
    config: EngineConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new extraction engine
    pub fn new(provider: L, config: EngineConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
        }
    }

    /// Extract one task's fields from the retrieved context.
    pub async fn extract(
        &self,
        question: &str,
        context: &str,
        schema: &Schema,
    ) -> Result<Map<String, Value>, ExtractorError> {
        let prompt = PromptBuilder::new(question, context, schema).build();

        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(self.config.extraction_timeout(), self.call_llm(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)??;

        debug!("LLM response length: {} chars", response.len());

        let fields = parse_response(&response, schema)?;

        info!(
            "Extraction for schema '{}' produced {} field(s)",
            schema.name,
            fields.len()
        );
        Ok(fields)
    }

    /// Call the LLM provider
    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        let llm = Arc::clone(&self.provider);
        let prompt = prompt.to_string();

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            llm.generate(&prompt)
                .map_err(|e| ExtractorError::Backend(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Backend(format!("Task join error: {}", e)))?
    }
}
