//! Embedding provider port
//!
//! Defines the trait for providers that map text to fixed-dimension
//! dense vectors for semantic similarity search.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ModelState;

/// Service interface for embedding generation
///
/// A provider whose model failed to load stays constructible but reports
/// `ModelState::Unavailable`; in that state `dimension()` is 0 and both
/// embed operations return empty results instead of failing. Callers
/// check the state before relying on the output.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Availability of the underlying model (capability query)
    fn state(&self) -> ModelState;

    /// Vector dimension, constant for the lifetime of a loaded model;
    /// 0 when the model is unavailable
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text (query path)
    ///
    /// # Returns
    /// * `Ok(Vec<f32>)` - The embedding vector, empty when unavailable
    /// * `Err(_)` - On a transient embedding failure; not retried here
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts in one call (ingestion path)
    ///
    /// Length- and order-preserving: `result[i]` corresponds to
    /// `texts[i]`. Batch this rather than looping over `embed_one` for
    /// corpus-scale work.
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
