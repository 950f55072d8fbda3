//! Archivist - Document Ingestion and Semantic Retrieval
//!
//! Archivist turns a tree of page-oriented documents into a persistent
//! vector collection and answers queries with the most similar chunks,
//! ready to ground an external LLM's answers.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure data models and port traits
//! - **Service Layer** (`services`): Ingestion and retrieval orchestration
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging,
//!   document loading, chunking, embeddings and the SQLite vector store
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use archivist::infrastructure::vector::{NgramEmbedder, SqliteVectorStore};
//! use archivist::services::Retriever;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Build a provider + index, then retrieve grounded context
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Chunk, ChunkProvenance, ChunkingConfig, Config, ContextPassage, CorpusConfig,
    DistanceMetric, EmbeddingConfig, EmbeddingModel, IndexConfig, LoggingConfig, ModelState,
    PageUnit, RecordBatch, Retrieval, RetrievalConfig, RetrievalStatus, RetrievedChunk,
    ScoredHit,
};
pub use domain::ports::{
    AnswerGenerator, CorpusSource, DocumentLoader, EmbeddingProvider, IndexError, LoadOutcome,
    VectorIndex,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::loader::{LocalCorpus, PdfLoader};
pub use infrastructure::vector::{NgramEmbedder, RecursiveChunker, SqliteVectorStore};
pub use services::{IngestionPipeline, IngestionReport, Retriever};
