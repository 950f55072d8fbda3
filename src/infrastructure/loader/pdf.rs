//! Page-oriented PDF loader
//!
//! Walks the source tree, parses each matching document with lopdf and
//! emits one `PageUnit` per page with extractable text. Image-only
//! pages are expected and skipped silently; a file that fails to parse
//! is logged and skipped without aborting the load.

use std::path::Path;

use anyhow::{bail, Result};
use walkdir::WalkDir;

use crate::domain::models::PageUnit;
use crate::domain::ports::{DocumentLoader, LoadOutcome};

/// Recursive PDF discovery and per-page text extraction
pub struct PdfLoader {
    extensions: Vec<String>,
}

impl PdfLoader {
    /// Create a loader for the given extensions (lowercase, no dots)
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|wanted| wanted == &ext)
            })
    }

    /// Extract one unit per page of a single document, in page order
    fn load_file(root: &Path, path: &Path) -> Result<Vec<PageUnit>> {
        let document = lopdf::Document::load(path)?;

        let source_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| source_path.clone());

        let mut units = Vec::new();

        // get_pages is a BTreeMap, so page numbers iterate in order
        for page_number in document.get_pages().keys() {
            let text = match document.extract_text(&[*page_number]) {
                Ok(text) => text,
                Err(err) => {
                    // image-only or unextractable page, not an error
                    tracing::debug!(
                        file = %source_path,
                        page = page_number,
                        error = %err,
                        "no extractable text on page"
                    );
                    continue;
                }
            };

            if text.trim().is_empty() {
                continue;
            }

            units.push(PageUnit::new(
                text,
                source_path.clone(),
                filename.clone(),
                *page_number,
            ));
        }

        Ok(units)
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, root: &Path) -> Result<LoadOutcome> {
        if !root.is_dir() {
            bail!("source root '{}' does not exist", root.display());
        }

        let mut outcome = LoadOutcome::default();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !self.matches_extension(path) {
                continue;
            }

            outcome.files_seen += 1;

            match Self::load_file(root, path) {
                Ok(mut units) => outcome.units.append(&mut units),
                Err(err) => {
                    tracing::warn!(
                        file = %path.display(),
                        error = %err,
                        "failed to parse document, skipping"
                    );
                    outcome.files_skipped += 1;
                }
            }
        }

        tracing::info!(
            root = %root.display(),
            files = outcome.files_seen,
            skipped = outcome.files_skipped,
            pages = outcome.units.len(),
            "loaded source tree"
        );

        Ok(outcome)
    }
}
