//! Embedding domain models
//!
//! Model registry, provider availability state, and the distance metrics
//! the vector index can be configured with.

use serde::{Deserialize, Serialize};

/// Embedding models supported by the local provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingModel {
    /// Character n-gram feature hashing, 384 dimensions
    /// - Fully local and deterministic
    /// - Good default for corpus-scale ingestion on CPU
    NgramHash384,

    /// Character n-gram feature hashing, 768 dimensions
    /// - Lower collision rate at twice the storage cost
    NgramHash768,
}

impl EmbeddingModel {
    /// Returns the vector dimension for this model
    pub fn dimension(self) -> usize {
        match self {
            Self::NgramHash384 => 384,
            Self::NgramHash768 => 768,
        }
    }

    /// Stable configuration identifier for this model
    pub fn identifier(self) -> &'static str {
        match self {
            Self::NgramHash384 => "ngram-hash-384",
            Self::NgramHash768 => "ngram-hash-768",
        }
    }

    /// Resolve a configured model identifier; `None` for unknown ids
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id {
            "ngram-hash-384" => Some(Self::NgramHash384),
            "ngram-hash-768" => Some(Self::NgramHash768),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Availability of an embedding provider's model
///
/// A provider whose model failed to load degrades to `Unavailable` instead
/// of failing construction; callers query this state before embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Model loaded; all vectors have the given dimension
    Loaded {
        /// Vector dimension of the loaded model
        dimension: usize,
    },
    /// Model failed to load; embed operations return empty results
    Unavailable,
}

impl ModelState {
    /// Returns true if a model is loaded
    pub fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Vector dimension, 0 when no model is loaded
    pub fn dimension(self) -> usize {
        match self {
            Self::Loaded { dimension } => dimension,
            Self::Unavailable => 0,
        }
    }
}

/// Distance metric for similarity search (lower = more similar)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine distance: 1 - cosine similarity
    Cosine,
    /// Squared Euclidean (L2) distance
    Euclidean,
    /// Inner-product distance: 1 - dot product
    InnerProduct,
}

impl DistanceMetric {
    /// Stable token persisted in the collection metadata
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::InnerProduct => "inner_product",
        }
    }

    /// Parse a persisted metric token
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cosine" => Some(Self::Cosine),
            "euclidean" => Some(Self::Euclidean),
            "inner_product" => Some(Self::InnerProduct),
            _ => None,
        }
    }

    /// Distance between two vectors under this metric
    ///
    /// Mismatched lengths and zero-magnitude cosine inputs yield `f32::MAX`
    /// so such pairs sort last instead of poisoning the result order.
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return f32::MAX;
        }

        match self {
            Self::Cosine => cosine_distance(a, b),
            Self::Euclidean => a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum(),
            Self::InnerProduct => {
                let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
                1.0 - dot
            }
        }
    }
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::Cosine
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return f32::MAX;
    }

    // Cosine distance = 1 - cosine_similarity
    // where cosine_similarity = dot / (mag_a * mag_b)
    1.0 - (dot / (mag_a * mag_b))
}
