//! Document loader port

use std::path::Path;

use anyhow::Result;

use crate::domain::models::PageUnit;

/// Result of loading a source tree
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// One unit per page with extractable text, in page order per file
    pub units: Vec<PageUnit>,

    /// Matching files discovered under the root
    pub files_seen: usize,

    /// Files that failed to parse and were skipped
    pub files_skipped: usize,
}

/// Service interface for parsing source documents into page units
///
/// A per-file parse failure is logged and counted, never fatal to the
/// load; a missing root directory is an error.
pub trait DocumentLoader: Send + Sync {
    /// Recursively load all matching documents under `root`
    fn load(&self, root: &Path) -> Result<LoadOutcome>;
}
