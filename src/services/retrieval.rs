//! Retrieval service
//!
//! Embeds a query, searches the vector index and maps raw hits into
//! ranked results. Degraded states (no model, no index, empty
//! collection) yield an empty result list with a diagnosable status
//! instead of an error; results keep the index's similarity order and
//! are never re-ranked here.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::{Retrieval, RetrievalStatus, RetrievedChunk};
use crate::domain::ports::{EmbeddingProvider, VectorIndex};

/// Top-k similarity retriever
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    index: Option<Arc<dyn VectorIndex>>,
    default_k: usize,
}

impl Retriever {
    /// Create a retriever
    ///
    /// # Arguments
    /// * `provider` - Query embedding provider
    /// * `index` - Open index handle, or `None` when opening failed
    /// * `default_k` - Result count used by [`Self::retrieve_default`]
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        index: Option<Arc<dyn VectorIndex>>,
        default_k: usize,
    ) -> Self {
        Self {
            provider,
            index,
            default_k,
        }
    }

    /// Retrieve the configured default number of chunks
    pub async fn retrieve_default(&self, query: &str) -> Result<Retrieval> {
        self.retrieve(query, self.default_k).await
    }

    /// Retrieve the `k` most similar chunks for a query
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Retrieval> {
        if !self.provider.state().is_loaded() {
            tracing::warn!("retrieval skipped: embedding model unavailable");
            return Ok(Retrieval::empty(RetrievalStatus::EmbedderUnavailable));
        }

        let Some(index) = &self.index else {
            tracing::warn!("retrieval skipped: no open index");
            return Ok(Retrieval::empty(RetrievalStatus::IndexUnavailable));
        };

        let vector = self
            .provider
            .embed_one(query)
            .await
            .context("failed to embed query")?;

        if index.count().await? == 0 {
            tracing::debug!("retrieval against empty collection");
            return Ok(Retrieval::empty(RetrievalStatus::EmptyIndex));
        }

        let hits = index
            .search(&vector, k)
            .await
            .context("similarity search failed")?;

        tracing::debug!(query_len = query.len(), hits = hits.len(), "retrieved context");

        let results = hits
            .into_iter()
            .enumerate()
            .map(|(i, hit)| {
                let mut metadata = hit.metadata;
                if let Some(map) = metadata.as_object_mut() {
                    map.insert(
                        "distance".to_string(),
                        serde_json::json!(f64::from(hit.distance)),
                    );
                }

                RetrievedChunk {
                    content: hit.content,
                    metadata,
                    rank: i + 1,
                }
            })
            .collect();

        Ok(Retrieval {
            results,
            status: RetrievalStatus::Complete,
        })
    }
}
