//! Retrieval result models
//!
//! Results are ephemeral: constructed per retrieval call, handed to the
//! caller (or the answer-generation collaborator), and discarded.

use serde::{Deserialize, Serialize};

/// A ranked chunk returned by the retriever
///
/// The raw distance is injected into the metadata mapping under
/// `"distance"` for downstream citation and debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Stored chunk text
    pub content: String,

    /// Stored metadata plus the injected `"distance"` entry
    pub metadata: serde_json::Value,

    /// Rank within the result list (1 = most similar)
    pub rank: usize,
}

impl RetrievedChunk {
    /// Raw distance to the query, read back from the metadata
    pub fn distance(&self) -> Option<f64> {
        self.metadata.get("distance").and_then(serde_json::Value::as_f64)
    }

    /// Source path from the provenance metadata
    pub fn source_path(&self) -> Option<&str> {
        self.metadata.get("source").and_then(serde_json::Value::as_str)
    }

    /// Page number from the provenance metadata
    pub fn page_number(&self) -> Option<u32> {
        self.metadata
            .get("page")
            .and_then(serde_json::Value::as_u64)
            .and_then(|page| u32::try_from(page).ok())
    }
}

/// Why a retrieval call returned without consulting the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStatus {
    /// The index was searched and the results are authoritative
    Complete,
    /// The embedding model is unavailable (dimension 0)
    EmbedderUnavailable,
    /// No index handle was opened
    IndexUnavailable,
    /// The collection holds no records
    EmptyIndex,
}

/// Outcome of one retrieval call
///
/// A degraded pipeline yields an empty result list plus a status the
/// caller can act on, instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrieval {
    /// Ranked results, most similar first
    pub results: Vec<RetrievedChunk>,

    /// Diagnosable condition for empty result lists
    pub status: RetrievalStatus,
}

impl Retrieval {
    /// An empty outcome carrying the reason retrieval was skipped
    pub fn empty(status: RetrievalStatus) -> Self {
        Self {
            results: Vec::new(),
            status,
        }
    }

    /// Ordered passages for the answer-generation collaborator
    pub fn passages(&self) -> Vec<ContextPassage> {
        self.results
            .iter()
            .map(|chunk| ContextPassage {
                text: chunk.content.clone(),
                source_path: chunk.source_path().unwrap_or("unknown").to_string(),
                page_number: chunk.page_number().unwrap_or(0),
            })
            .collect()
    }
}

/// One grounding passage handed to the answer-generation collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPassage {
    /// Chunk text
    pub text: String,

    /// Source file path for citation
    pub source_path: String,

    /// Page number for citation (0 when unknown)
    pub page_number: u32,
}
