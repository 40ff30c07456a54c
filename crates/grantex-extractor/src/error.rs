//! Error types for the extraction engine

use grantex_domain::SchemaError;
use thiserror::Error;

/// Errors that can occur during extraction and assembly
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Language-model backend failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Model output was not a parseable JSON object
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Parsed output failed schema validation
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaError),

    /// Context retrieval failure
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
