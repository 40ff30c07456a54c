//! Page-level source text units

/// One page of text extracted from a source document.
///
/// Page units are produced by the ingestor, are immutable afterward, and
/// are owned by the semantic index for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUnit {
    /// The page's extracted text content
    pub text: String,

    /// Path of the source file this page came from
    pub source_path: String,

    /// Zero-based page number within the source file
    pub page_index: usize,
}

impl PageUnit {
    /// Create a new page unit
    pub fn new(text: impl Into<String>, source_path: impl Into<String>, page_index: usize) -> Self {
        Self {
            text: text.into(),
            source_path: source_path.into(),
            page_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_unit_construction() {
        let page = PageUnit::new("Grant text", "award.pdf", 2);
        assert_eq!(page.text, "Grant text");
        assert_eq!(page.source_path, "award.pdf");
        assert_eq!(page.page_index, 2);
    }
}
