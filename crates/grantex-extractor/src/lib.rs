//! Grantex Extraction Engine
//!
//! Converts retrieved grant-document context into validated, structured
//! field maps via schema-constrained language-model queries, and
//! assembles the per-task results into one grant record.
//!
//! # Architecture
//!
//! ```text
//! Pages → SemanticIndex → context → Extractor → LLM → validated fields
//!                                        ↑
//!                        Schema (format + validation, one definition)
//!
//! GrantAssembler: for each task key → retrieve → extract → merge
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use grantex_extractor::{EngineConfig, Extractor, GrantAssembler};
//! use grantex_llm::MockProvider;
//! use grantex_store::{MockEmbeddingModel, SemanticIndex};
//! use grantex_domain::PageUnit;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pages = vec![PageUnit::new("Grant Title: Example", "award.pdf", 0)];
//! let index = Arc::new(SemanticIndex::build(MockEmbeddingModel::new(128), pages)?);
//!
//! let provider = MockProvider::new("{}");
//! let extractor = Extractor::new(provider, EngineConfig::default());
//!
//! let assembler = GrantAssembler::new(index, extractor, 4);
//! let record = assembler.run().await?;
//!
//! println!("{}", record.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembler;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use assembler::GrantAssembler;
pub use config::EngineConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_response;
pub use prompt::PromptBuilder;
