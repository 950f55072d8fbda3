//! Vector index port
//!
//! Persistent storage of (id, vector, text, metadata) records with
//! approximate nearest-neighbor search under a configured metric.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{DistanceMetric, RecordBatch, ScoredHit};

/// Vector index operation errors
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("index storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(
        "record batch is misaligned: {ids} ids, {embeddings} embeddings, \
         {documents} documents, {metadatas} metadata entries"
    )]
    BatchLengthMismatch {
        ids: usize,
        embeddings: usize,
        documents: usize,
        metadatas: usize,
    },

    #[error("embedding dimension mismatch: collection expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(
        "collection '{collection}' stores {stored}-dimensional vectors but the \
         configured model produces {requested}-dimensional vectors"
    )]
    CollectionDimensionMismatch {
        collection: String,
        stored: usize,
        requested: usize,
    },

    #[error(
        "collection '{collection}' was created with metric '{stored}' but \
         '{requested}' is configured"
    )]
    MetricMismatch {
        collection: String,
        stored: String,
        requested: String,
    },

    #[error("cannot open collection '{collection}' with a zero-dimension embedding model")]
    ZeroDimension { collection: String },

    #[error("corrupt embedding blob: {0} bytes is not a whole number of f32 values")]
    CorruptEmbedding(usize),

    #[error("collection metadata is corrupt: {0}")]
    CorruptMetadata(String),
}

/// Repository interface for the persistent vector collection
///
/// One handle per collection; the collection's dimension and distance
/// metric are fixed at creation and validated on every open.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Vector dimension the collection was created with
    fn dimension(&self) -> usize;

    /// Distance metric the collection was created with
    fn metric(&self) -> DistanceMetric;

    /// Number of records in the collection
    async fn count(&self) -> Result<usize, IndexError>;

    /// Atomically advance the persisted id counter by `n`
    ///
    /// # Returns
    /// * `Ok(u64)` - First id of the reserved range; ids `start..start+n`
    ///   are never handed out again, even across runs
    async fn allocate_ids(&self, n: usize) -> Result<u64, IndexError>;

    /// Insert a batch of records in a single transaction
    ///
    /// Fails as a whole — with nothing committed — when the batch columns
    /// disagree in length or any embedding's length differs from the
    /// collection dimension.
    async fn add(&self, batch: RecordBatch) -> Result<(), IndexError>;

    /// Top-k similarity search
    ///
    /// # Returns
    /// * `Ok(Vec<ScoredHit>)` - At most `k` hits ordered by ascending
    ///   distance; fewer when the collection holds fewer records
    /// * `Err(IndexError::DimensionMismatch)` - For a query vector whose
    ///   length differs from the collection dimension
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredHit>, IndexError>;
}
