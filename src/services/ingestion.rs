//! Ingestion pipeline
//!
//! Orchestrates one batch ingestion run: load pages, chunk, embed the
//! whole batch in a single call, allocate ids from the collection's
//! persisted counter, and add everything to the index atomically.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::models::{Chunk, PageUnit, RecordBatch};
use crate::domain::ports::{DocumentLoader, EmbeddingProvider, VectorIndex};
use crate::infrastructure::vector::RecursiveChunker;

/// Counts reported after an ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    /// Identifier of this run, for log correlation
    pub run_id: Uuid,

    /// Matching files discovered under the source root
    pub files: usize,

    /// Files skipped because they failed to parse
    pub files_skipped: usize,

    /// Pages with extractable text
    pub pages: usize,

    /// Chunks produced from those pages
    pub chunks: usize,

    /// Vectors added to the index in this run
    pub vectors_indexed: usize,

    /// Collection record count after the run
    pub collection_count: usize,
}

/// Batch ingestion orchestrator
///
/// Runs sequentially: one corpus, one pass, no concurrent writers to
/// the index. The only performance lever is batch embedding, which is
/// preserved by embedding all chunk texts in one call.
pub struct IngestionPipeline {
    loader: Arc<dyn DocumentLoader>,
    chunker: RecursiveChunker,
    provider: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl IngestionPipeline {
    /// Create a new pipeline from its collaborators
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        chunker: RecursiveChunker,
        provider: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            loader,
            chunker,
            provider,
            index,
        }
    }

    /// Ingest every matching document under `root`
    pub async fn run(&self, root: &Path) -> Result<IngestionReport> {
        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, root = %root.display(), "starting ingestion run");

        let outcome = self
            .loader
            .load(root)
            .context("failed to load source documents")?;

        if outcome.units.is_empty() {
            bail!(
                "no extractable pages found under '{}' ({} files seen, {} skipped)",
                root.display(),
                outcome.files_seen,
                outcome.files_skipped
            );
        }

        let mut report = self.ingest_units(run_id, &outcome.units).await?;
        report.files = outcome.files_seen;
        report.files_skipped = outcome.files_skipped;

        Ok(report)
    }

    /// Chunk, embed and index a batch of already-loaded page units
    pub async fn ingest_units(
        &self,
        run_id: Uuid,
        units: &[PageUnit],
    ) -> Result<IngestionReport> {
        let chunks = self.chunker.split_units(units);
        if chunks.is_empty() {
            bail!("chunking produced no chunks from {} pages", units.len());
        }

        tracing::info!(%run_id, pages = units.len(), chunks = chunks.len(), "chunked corpus");

        let vectors_indexed = self.index_chunks(&chunks).await?;
        let collection_count = self.index.count().await?;

        let report = IngestionReport {
            run_id,
            files: distinct_sources(units),
            files_skipped: 0,
            pages: units.len(),
            chunks: chunks.len(),
            vectors_indexed,
            collection_count,
        };

        tracing::info!(
            %run_id,
            vectors = report.vectors_indexed,
            collection_count = report.collection_count,
            "ingestion run complete"
        );

        Ok(report)
    }

    /// Embed a chunk batch in one call and add it to the index
    async fn index_chunks(&self, chunks: &[Chunk]) -> Result<usize> {
        if !self.provider.state().is_loaded() {
            bail!("embedding model is unavailable (dimension 0); cannot index");
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();

        let embeddings = self
            .provider
            .embed_many(&texts)
            .await
            .context("embedding generation failed")?;

        if embeddings.len() != chunks.len() {
            bail!(
                "embedding count {} does not match chunk count {}; nothing indexed",
                embeddings.len(),
                chunks.len()
            );
        }

        let start = self
            .index
            .allocate_ids(chunks.len())
            .await
            .context("failed to allocate record ids")?;

        let batch = RecordBatch {
            ids: (0..chunks.len())
                .map(|i| format!("doc_{}", start + i as u64))
                .collect(),
            embeddings,
            documents: texts,
            metadatas: chunks
                .iter()
                .map(|chunk| chunk.provenance.to_metadata())
                .collect(),
        };

        let added = batch.len();
        self.index
            .add(batch)
            .await
            .context("failed to add records to the index")?;

        Ok(added)
    }
}

fn distinct_sources(units: &[PageUnit]) -> usize {
    let mut sources: Vec<&str> = units.iter().map(|u| u.source_path.as_str()).collect();
    sources.sort_unstable();
    sources.dedup();
    sources.len()
}
