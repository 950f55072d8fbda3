//! Vector index record models
//!
//! A record batch is four parallel vectors, mirroring the wire shape of
//! the underlying store's add operation. The alignment of the four is
//! validated by the index before anything is written.

use serde::{Deserialize, Serialize};

/// A batch of records to insert into the vector index
///
/// `ids[i]`, `embeddings[i]`, `documents[i]` and `metadatas[i]` describe
/// the same record. The index rejects misaligned batches as a whole.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    /// Record ids, unique within the collection (`doc_{n}`)
    pub ids: Vec<String>,

    /// Embedding vectors, one per record
    pub embeddings: Vec<Vec<f32>>,

    /// Raw chunk text, one per record
    pub documents: Vec<String>,

    /// Provenance metadata, one mapping per record
    pub metadatas: Vec<serde_json::Value>,
}

impl RecordBatch {
    /// Number of records described by the id column
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the batch holds no records
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if all four columns have the same length
    pub fn is_aligned(&self) -> bool {
        self.embeddings.len() == self.ids.len()
            && self.documents.len() == self.ids.len()
            && self.metadatas.len() == self.ids.len()
    }
}

/// A raw similarity-search hit from the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredHit {
    /// Record id
    pub id: String,

    /// Stored chunk text
    pub content: String,

    /// Stored metadata mapping
    pub metadata: serde_json::Value,

    /// Distance to the query vector (lower = more similar)
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(ids: usize, embeddings: usize, documents: usize, metadatas: usize) -> RecordBatch {
        RecordBatch {
            ids: (0..ids).map(|i| format!("doc_{i}")).collect(),
            embeddings: vec![vec![0.0; 3]; embeddings],
            documents: vec![String::from("text"); documents],
            metadatas: vec![serde_json::json!({}); metadatas],
        }
    }

    #[test]
    fn test_aligned_batch() {
        let b = batch(4, 4, 4, 4);
        assert_eq!(b.len(), 4);
        assert!(b.is_aligned());
        assert!(!b.is_empty());
    }

    #[test]
    fn test_misaligned_batch() {
        assert!(!batch(5, 5, 5, 4).is_aligned());
        assert!(!batch(5, 4, 5, 5).is_aligned());
        assert!(!batch(2, 5, 5, 5).is_aligned());
    }

    #[test]
    fn test_empty_batch() {
        let b = RecordBatch::default();
        assert!(b.is_empty());
        assert!(b.is_aligned());
    }
}
