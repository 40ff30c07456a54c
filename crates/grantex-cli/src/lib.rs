//! Grantex CLI library.
//!
//! This library provides the core functionality for the grantex
//! command-line interface: argument definitions, input resolution and PDF
//! ingestion, configuration management, and output writing.

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::StatusLine;
