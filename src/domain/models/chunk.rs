//! Text chunk domain models
//!
//! Chunks are the atomic unit stored in and retrieved from the vector
//! index. Every chunk carries the provenance of the page it came from.

use serde::{Deserialize, Serialize};

use crate::domain::models::PageUnit;

/// Provenance metadata attached to every chunk for citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkProvenance {
    /// Source file path, relative to the corpus root
    pub source_path: String,

    /// File name without directories
    pub filename: String,

    /// Page number within the source document (1-based)
    pub page_number: u32,
}

impl ChunkProvenance {
    /// Provenance copied from the page a chunk was derived from
    pub fn from_unit(unit: &PageUnit) -> Self {
        Self {
            source_path: unit.source_path.clone(),
            filename: unit.filename.clone(),
            page_number: unit.page_number,
        }
    }

    /// Render provenance as the metadata mapping stored with the record
    pub fn to_metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "source": self.source_path,
            "filename": self.filename,
            "page": self.page_number,
        })
    }
}

/// A bounded text fragment derived from a single source page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text (non-blank)
    pub content: String,

    /// Provenance of the source page
    pub provenance: ChunkProvenance,
}

impl Chunk {
    /// Create a chunk carrying the given page's provenance
    pub fn from_unit(content: impl Into<String>, unit: &PageUnit) -> Self {
        Self {
            content: content.into(),
            provenance: ChunkProvenance::from_unit(unit),
        }
    }

    /// Get a preview of the content (first 100 chars)
    pub fn preview(&self) -> String {
        let chars: Vec<char> = self.content.chars().collect();
        if chars.len() <= 100 {
            self.content.clone()
        } else {
            format!("{}...", chars[..100].iter().collect::<String>())
        }
    }
}
