//! Exact nearest-neighbor index over page units
//!
//! The index embeds every page once at build time and answers retrieval
//! queries with an exact cosine-similarity scan. An exact scan (rather
//! than an approximate structure) keeps the ranking contract simple:
//! descending similarity, ties broken by original ingestion order,
//! identical results for identical inputs.

use crate::embedding::cosine_similarity;
use grantex_domain::traits::EmbeddingBackend;
use grantex_domain::PageUnit;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during index operations
#[derive(Error, Debug)]
pub enum IndexError {
    /// Embedding backend failure; fatal for the run
    #[error("Embedding backend error: {0}")]
    Embedding(String),

    /// Backend produced a vector of the wrong dimension
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension produced
        actual: usize,
    },
}

struct IndexEntry {
    page: PageUnit,
    embedding: Vec<f32>,
}

/// In-memory semantic index over the page units of one run.
///
/// Built once from the full page sequence; read-only afterward.
///
/// # Examples
///
/// ```
/// use grantex_domain::PageUnit;
/// use grantex_store::{MockEmbeddingModel, SemanticIndex};
///
/// let pages = vec![PageUnit::new("some text", "doc.pdf", 0)];
/// let index = SemanticIndex::build(MockEmbeddingModel::new(64), pages).unwrap();
/// let results = index.retrieve("a query", 5).unwrap();
/// assert_eq!(results.len(), 1);
/// ```
pub struct SemanticIndex<E: EmbeddingBackend> {
    model: E,
    entries: Vec<IndexEntry>,
}

impl<E> SemanticIndex<E>
where
    E: EmbeddingBackend,
    E::Error: fmt::Display,
{
    /// Build the index by embedding every page with the given backend.
    ///
    /// Pages keep their ingestion order. Any backend failure aborts the
    /// build; there is no silent fallback.
    pub fn build(model: E, pages: Vec<PageUnit>) -> Result<Self, IndexError> {
        let mut entries = Vec::with_capacity(pages.len());
        for page in pages {
            let embedding = embed_checked(&model, &page.text)?;
            entries.push(IndexEntry { page, embedding });
        }

        debug!("Indexed {} page(s)", entries.len());
        Ok(Self { model, entries })
    }

    /// Retrieve up to `k` pages ranked by descending similarity to the
    /// query text.
    ///
    /// Ties are broken by original ingestion order. `k = 0` and an empty
    /// index both yield an empty result; if `k` exceeds the index size,
    /// all pages are returned.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<&PageUnit>, IndexError> {
        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = embed_checked(&self.model, query)?;

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(&query_embedding, &entry.embedding)))
            .collect();

        // Stable sort keeps ingestion order for equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, _)| &self.entries[i].page)
            .collect())
    }

    /// Number of indexed pages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no pages
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn embed_checked<E>(model: &E, text: &str) -> Result<Vec<f32>, IndexError>
where
    E: EmbeddingBackend,
    E::Error: fmt::Display,
{
    let embedding = model
        .embed(text)
        .map_err(|e| IndexError::Embedding(e.to_string()))?;

    if embedding.len() != model.dimension() {
        return Err(IndexError::DimensionMismatch {
            expected: model.dimension(),
            actual: embedding.len(),
        });
    }

    Ok(embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingModel;

    fn page(text: &str, index: usize) -> PageUnit {
        PageUnit::new(text, "test.pdf", index)
    }

    #[test]
    fn test_build_empty_index() {
        let index = SemanticIndex::build(MockEmbeddingModel::new(64), Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.retrieve("anything", 3).unwrap().is_empty());
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let pages = vec![
            page("budget and spending details", 0),
            page("the official grant title", 1),
        ];
        let index = SemanticIndex::build(MockEmbeddingModel::new(256), pages).unwrap();

        let results = index.retrieve("the official grant title", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].page_index, 1);
    }

    #[test]
    fn test_k_clamped_to_index_size() {
        let pages = vec![page("one", 0), page("two", 1)];
        let index = SemanticIndex::build(MockEmbeddingModel::new(64), pages).unwrap();

        let results = index.retrieve("one", 10).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_k_zero_yields_empty() {
        let pages = vec![page("one", 0)];
        let index = SemanticIndex::build(MockEmbeddingModel::new(64), pages).unwrap();

        assert!(index.retrieve("one", 0).unwrap().is_empty());
    }

    #[test]
    fn test_retrieval_is_deterministic() {
        let pages = vec![page("alpha", 0), page("beta", 1), page("gamma", 2)];
        let index = SemanticIndex::build(MockEmbeddingModel::new(128), pages).unwrap();

        let first: Vec<usize> = index
            .retrieve("alpha beta", 3)
            .unwrap()
            .iter()
            .map(|p| p.page_index)
            .collect();
        let second: Vec<usize> = index
            .retrieve("alpha beta", 3)
            .unwrap()
            .iter()
            .map(|p| p.page_index)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_keep_ingestion_order() {
        // Identical texts embed identically, so every pair of duplicates
        // scores the same and must come back in ingestion order.
        let pages = vec![
            page("duplicate text", 0),
            page("duplicate text", 1),
            page("duplicate text", 2),
        ];
        let index = SemanticIndex::build(MockEmbeddingModel::new(64), pages).unwrap();

        let order: Vec<usize> = index
            .retrieve("some query", 3)
            .unwrap()
            .iter()
            .map(|p| p.page_index)
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_build_fails_on_backend_error() {
        // Mock rejects empty text
        let pages = vec![page("", 0)];
        let result = SemanticIndex::build(MockEmbeddingModel::new(64), pages);
        assert!(matches!(result, Err(IndexError::Embedding(_))));
    }
}
