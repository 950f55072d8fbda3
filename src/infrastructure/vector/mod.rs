//! Vector infrastructure components
//!
//! Implementations for text chunking, embedding generation and
//! persistent vector storage.

pub mod chunker;
pub mod embedding_service;
pub mod vector_store;

pub use chunker::RecursiveChunker;
pub use embedding_service::NgramEmbedder;
pub use vector_store::SqliteVectorStore;
