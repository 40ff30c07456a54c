//! Grantex Semantic Index Layer
//!
//! In-memory semantic search over page units for one extraction run.
//!
//! # Architecture
//!
//! - The index is built once from the full page sequence, embedding every
//!   page with a single fixed embedding backend
//! - Retrieval is an exact cosine-similarity scan, ranked descending with
//!   ties broken by ingestion order, so results are fully deterministic
//! - The context retriever concatenates retrieved page texts in rank
//!   order for the extraction prompt
//!
//! # Examples
//!
//! ```
//! use grantex_domain::PageUnit;
//! use grantex_store::{build_context, MockEmbeddingModel, SemanticIndex};
//!
//! let pages = vec![
//!     PageUnit::new("Grant Title: Ocean Research Initiative", "award.pdf", 0),
//!     PageUnit::new("Budget: $100,000 total", "award.pdf", 1),
//! ];
//! let index = SemanticIndex::build(MockEmbeddingModel::new(128), pages).unwrap();
//! let context = build_context(&index, "grant name", 2).unwrap();
//! assert!(!context.is_empty());
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod index;
pub mod retriever;

pub use embedding::{cosine_similarity, EmbeddingError, MockEmbeddingModel};
pub use index::{IndexError, SemanticIndex};
pub use retriever::build_context;
