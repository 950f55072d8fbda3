//! Domain models
//!
//! Pure data types shared across the ingestion and retrieval paths.

pub mod chunk;
pub mod config;
pub mod document;
pub mod embedding;
pub mod index;
pub mod retrieval;

pub use chunk::{Chunk, ChunkProvenance};
pub use config::{
    ChunkingConfig, Config, CorpusConfig, EmbeddingConfig, IndexConfig, LoggingConfig,
    RetrievalConfig,
};
pub use document::PageUnit;
pub use embedding::{DistanceMetric, EmbeddingModel, ModelState};
pub use index::{RecordBatch, ScoredHit};
pub use retrieval::{ContextPassage, Retrieval, RetrievalStatus, RetrievedChunk};
