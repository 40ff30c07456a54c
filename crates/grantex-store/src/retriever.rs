//! Context assembly from retrieved pages

use crate::index::{IndexError, SemanticIndex};
use grantex_domain::traits::EmbeddingBackend;
use std::fmt;
use tracing::debug;

/// Retrieve the `k` most similar pages for a query and concatenate their
/// texts, in rank order, with no separator.
///
/// An empty retrieval (`k = 0` or an empty index) yields an empty string;
/// that is a valid, non-error state.
pub fn build_context<E>(
    index: &SemanticIndex<E>,
    query: &str,
    k: usize,
) -> Result<String, IndexError>
where
    E: EmbeddingBackend,
    E::Error: fmt::Display,
{
    let pages = index.retrieve(query, k)?;

    let mut context = String::new();
    for page in &pages {
        context.push_str(&page.text);
    }

    debug!(
        "Built context from {} page(s), {} chars",
        pages.len(),
        context.len()
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingModel;
    use grantex_domain::PageUnit;

    #[test]
    fn test_context_concatenates_in_rank_order() {
        let pages = vec![
            PageUnit::new("first page text. ", "doc.pdf", 0),
            PageUnit::new("second page text.", "doc.pdf", 1),
        ];
        let index = SemanticIndex::build(MockEmbeddingModel::new(128), pages).unwrap();

        // Query equal to one page's text pins that page to rank 0
        let context = build_context(&index, "second page text.", 2).unwrap();
        assert!(context.starts_with("second page text."));
        assert!(context.contains("first page text. "));
        assert_eq!(context.len(), "first page text. second page text.".len());
    }

    #[test]
    fn test_k_zero_yields_empty_context() {
        let pages = vec![PageUnit::new("content", "doc.pdf", 0)];
        let index = SemanticIndex::build(MockEmbeddingModel::new(64), pages).unwrap();

        assert_eq!(build_context(&index, "query", 0).unwrap(), "");
    }

    #[test]
    fn test_empty_index_yields_empty_context() {
        let index = SemanticIndex::build(MockEmbeddingModel::new(64), Vec::new()).unwrap();
        assert_eq!(build_context(&index, "query", 4).unwrap(), "");
    }
}
