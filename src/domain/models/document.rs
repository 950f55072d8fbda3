//! Source document domain models
//!
//! A corpus document is parsed into one unit per page; chunking and
//! indexing never cross page boundaries, so provenance stays exact.

use serde::{Deserialize, Serialize};

/// A single page of extractable text from a source document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageUnit {
    /// Extracted page text
    pub content: String,

    /// Source file path, relative to the corpus root
    pub source_path: String,

    /// File name without directories
    pub filename: String,

    /// Page number within the source document (1-based)
    pub page_number: u32,
}

impl PageUnit {
    /// Create a new page unit
    pub fn new(
        content: impl Into<String>,
        source_path: impl Into<String>,
        filename: impl Into<String>,
        page_number: u32,
    ) -> Self {
        Self {
            content: content.into(),
            source_path: source_path.into(),
            filename: filename.into(),
            page_number,
        }
    }

    /// Returns true if the page has no indexable text
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
