//! Document loading infrastructure
//!
//! Source-tree discovery, PDF parsing and the local corpus-source
//! adapter used before ingestion.

pub mod pdf;

pub use pdf::PdfLoader;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::ports::CorpusSource;

/// Corpus source backed by an already-populated local directory
///
/// Acquisition proper (download, extraction) is an external
/// collaborator; this adapter only verifies the source-tree contract.
pub struct LocalCorpus {
    root: PathBuf,
}

impl LocalCorpus {
    /// Create a corpus source rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CorpusSource for LocalCorpus {
    async fn ensure_corpus_available(&self) -> Result<bool> {
        if !self.root.is_dir() {
            tracing::warn!(
                root = %self.root.display(),
                "corpus root does not exist"
            );
            return Ok(false);
        }

        Ok(true)
    }
}
