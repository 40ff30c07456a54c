//! The grant assembler: drives retrieval and extraction per task and
//! merges the results

use crate::error::ExtractorError;
use crate::extractor::Extractor;
use grantex_domain::traits::{EmbeddingBackend, LlmProvider};
use grantex_domain::{GrantRecord, TaskKey};
use grantex_store::{build_context, SemanticIndex};
use std::fmt;
use std::sync::Arc;
use tokio::task;
use tracing::info;

/// Orchestrates the fixed task sequence over one built index.
///
/// For each task key, in order: retrieve context with the task's
/// retrieval query, extract with the task's question and schema, and
/// shallow-merge the validated fields into the running record. Any task
/// failure aborts the whole run; the record is returned only when every
/// task has succeeded.
pub struct GrantAssembler<L, E>
where
    L: LlmProvider,
    E: EmbeddingBackend,
{
    index: Arc<SemanticIndex<E>>,
    extractor: Extractor<L>,
    k: usize,
}

impl<L, E> GrantAssembler<L, E>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
    E: EmbeddingBackend + Send + Sync + 'static,
    E::Error: fmt::Display,
{
    /// Create a new assembler over a built index
    pub fn new(index: Arc<SemanticIndex<E>>, extractor: Extractor<L>, k: usize) -> Self {
        Self {
            index,
            extractor,
            k,
        }
    }

    /// Run every task in order and return the merged record.
    pub async fn run(&self) -> Result<GrantRecord, ExtractorError> {
        let mut record = GrantRecord::new();

        for task in TaskKey::ALL {
            let spec = task.query_spec();

            info!("Retrieving context for task '{}' (k = {})", task, self.k);
            let context = self.retrieve_context(spec.retrieval_query).await?;

            info!("Extracting '{}' fields", task);
            let fields = self
                .extractor
                .extract(spec.extraction_question, &context, task.schema())
                .await?;

            info!("Merging {} field(s) from task '{}'", fields.len(), task);
            record.merge(fields);
        }

        Ok(record)
    }

    /// Retrieve and concatenate context pages for one query
    async fn retrieve_context(&self, query: &str) -> Result<String, ExtractorError> {
        let index = Arc::clone(&self.index);
        let query = query.to_string();
        let k = self.k;

        // The embedding backend is synchronous; bridge like the LLM call
        task::spawn_blocking(move || {
            build_context(index.as_ref(), &query, k)
                .map_err(|e| ExtractorError::Retrieval(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Retrieval(format!("Task join error: {}", e)))?
    }
}
