//! Service layer: ingestion and retrieval orchestration

pub mod ingestion;
pub mod retrieval;

pub use ingestion::{IngestionPipeline, IngestionReport};
pub use retrieval::Retriever;
