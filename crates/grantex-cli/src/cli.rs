//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Grantex - extract structured grant data from PDF award documents.
#[derive(Debug, Parser)]
#[command(name = "grantex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path(s) to one or more PDF files for the same grant
    pub files: Vec<PathBuf>,

    /// Number of nearest-neighbor pages to retrieve per similarity search
    #[arg(short, default_value_t = 4)]
    pub k: usize,

    /// Folder to search recursively for PDF files
    #[arg(short = 'f', long)]
    pub folder: Option<PathBuf>,

    /// Chat completion model name (overrides the MODEL environment variable)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Output file for the assembled grant record
    #[arg(short = 'o', long, default_value = "grant.json")]
    pub output: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_arguments() {
        let cli = Cli::parse_from(["grantex", "award.pdf", "budget.pdf"]);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.k, 4);
        assert_eq!(cli.output, PathBuf::from("grant.json"));
        assert!(cli.folder.is_none());
    }

    #[test]
    fn test_k_and_folder() {
        let cli = Cli::parse_from(["grantex", "-k", "7", "--folder", "grants/"]);
        assert_eq!(cli.k, 7);
        assert_eq!(cli.folder, Some(PathBuf::from("grants/")));
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_model_override() {
        let cli = Cli::parse_from(["grantex", "award.pdf", "-m", "gpt-4o-mini"]);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_output_override() {
        let cli = Cli::parse_from(["grantex", "award.pdf", "-o", "out/record.json"]);
        assert_eq!(cli.output, PathBuf::from("out/record.json"));
    }
}
