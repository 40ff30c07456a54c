//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or missing input
    #[error("Input error: {0}")]
    Input(String),

    /// Source file could not be read or parsed
    #[error("Failed to parse '{path}': {reason}")]
    Pdf {
        /// Path of the offending file
        path: String,
        /// Why parsing failed
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Index build or retrieval error
    #[error("Index error: {0}")]
    Index(#[from] grantex_store::IndexError),

    /// Extraction pipeline error
    #[error("Extraction error: {0}")]
    Extraction(#[from] grantex_extractor::ExtractorError),

    /// Runtime task error
    #[error("Internal error: {0}")]
    Internal(String),
}
