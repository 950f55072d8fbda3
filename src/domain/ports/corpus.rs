//! Corpus acquisition port
//!
//! Acquisition (archive download, extraction) is an external
//! collaborator; this core only requires that a successful call leaves a
//! readable source tree behind.

use anyhow::Result;
use async_trait::async_trait;

/// Collaborator interface for corpus acquisition
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Populate the source tree if needed
    ///
    /// # Returns
    /// * `Ok(true)` - The source tree is ready for ingestion
    /// * `Ok(false)` - Acquisition ran but the tree is still unusable
    /// * `Err(_)` - Acquisition failed outright
    async fn ensure_corpus_available(&self) -> Result<bool>;
}
