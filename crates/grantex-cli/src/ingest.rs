//! Input resolution and PDF page ingestion.

use crate::error::{CliError, Result};
use grantex_domain::PageUnit;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve the run's input files from explicit paths and/or a folder.
///
/// A folder is searched recursively for files with a case-insensitive
/// `.pdf` extension; entries are visited in name order at every level so
/// the traversal is deterministic for the same filesystem state. When the
/// folder yields nothing, the explicit file list is used instead. No
/// input at all is an error.
pub fn resolve_inputs(files: &[PathBuf], folder: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    if let Some(dir) = folder {
        if !dir.is_dir() {
            return Err(CliError::Input(format!(
                "Folder '{}' does not exist",
                dir.display()
            )));
        }
        collect_pdfs(dir, &mut inputs)?;
    }

    if inputs.is_empty() && !files.is_empty() {
        inputs = files.to_vec();
    }
    if inputs.is_empty() {
        return Err(CliError::Input(
            "Please specify a folder or one or more PDF files".into(),
        ));
    }

    Ok(inputs)
}

fn collect_pdfs(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_pdfs(&path, out)?;
        } else if has_pdf_extension(&path) {
            out.push(path);
        }
    }

    Ok(())
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Load all pages from the given files, in the order given.
///
/// Each page becomes a [`PageUnit`] tagged with its source path and
/// zero-based page index. Any file that cannot be read or parsed fails
/// the whole run; there is no per-file skip.
pub fn load_pages(paths: &[PathBuf]) -> Result<Vec<PageUnit>> {
    let mut pages = Vec::new();

    for path in paths {
        info!("Parsing '{}'", path.display());

        let page_texts = pdf_extract::extract_text_by_pages(path).map_err(|e| CliError::Pdf {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let source = path.display().to_string();
        for (page_index, text) in page_texts.into_iter().enumerate() {
            pages.push(PageUnit::new(text, source.clone(), page_index));
        }
    }

    info!("Loaded {} page(s) from {} file(s)", pages.len(), paths.len());
    Ok(pages)
}
