//! Local embedding service
//!
//! Maps text to fixed-dimension dense vectors with character n-gram
//! feature hashing: lowercased tokens contribute their 3..=5-grams and
//! the whole token into signed hash buckets, and the result is
//! L2-normalized. Deterministic, CPU-only, no model download.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{EmbeddingConfig, EmbeddingModel, ModelState};
use crate::domain::ports::EmbeddingProvider;

const NGRAM_MIN: usize = 3;
const NGRAM_MAX: usize = 5;

/// Feature-hashing embedding provider
///
/// Construction never fails: an unknown model identifier degrades the
/// provider to the `Unavailable` state, where `dimension()` is 0 and
/// embed operations return empty results. Callers check `state()`
/// before use.
pub struct NgramEmbedder {
    model: Option<EmbeddingModel>,
}

impl NgramEmbedder {
    /// Create a provider for a known model
    pub fn new(model: EmbeddingModel) -> Self {
        Self { model: Some(model) }
    }

    /// Create a provider from configuration, degrading on unknown models
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        match EmbeddingModel::from_identifier(&config.model) {
            Some(model) => {
                tracing::info!(
                    model = %model,
                    dimension = model.dimension(),
                    device = %config.device,
                    "embedding model loaded"
                );
                Self { model: Some(model) }
            }
            None => {
                tracing::error!(
                    model = %config.model,
                    "unknown embedding model, embeddings disabled"
                );
                Self { model: None }
            }
        }
    }

    /// A provider with no usable model, for degraded-path testing
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    /// Embed one text into a vector of the given dimension
    fn embed_text(dimension: usize, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; dimension];
        let lowered = text.to_lowercase();

        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            accumulate(&mut embedding, token.as_bytes());

            let chars: Vec<char> = token.chars().collect();
            for n in NGRAM_MIN..=NGRAM_MAX {
                if chars.len() < n {
                    break;
                }
                for window in chars.windows(n) {
                    let gram: String = window.iter().collect();
                    accumulate(&mut embedding, gram.as_bytes());
                }
            }
        }

        normalize(&mut embedding);
        embedding
    }
}

/// Add one hashed feature into its signed bucket
fn accumulate(embedding: &mut [f32], feature: &[u8]) {
    let hash = fnv1a(feature);
    let bucket = (hash % embedding.len() as u64) as usize;
    let sign = if (hash >> 32) & 1 == 0 { 1.0 } else { -1.0 };
    embedding[bucket] += sign;
}

/// FNV-1a. Hand-rolled: stored vectors must hash identically across
/// releases, which std's DefaultHasher does not guarantee.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Normalize to unit length (L2 norm = 1.0)
///
/// Accumulates in f64 to avoid error build-up over many dimensions; a
/// zero vector (no tokens) becomes a uniform small vector.
fn normalize(embedding: &mut [f32]) {
    let magnitude_f64: f64 = embedding
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt();
    let magnitude = magnitude_f64 as f32;

    if magnitude > 1e-10 {
        for val in embedding.iter_mut() {
            *val /= magnitude;
        }
    } else {
        let uniform_val = 1.0 / (embedding.len() as f32).sqrt();
        for val in embedding.iter_mut() {
            *val = uniform_val;
        }
    }
}

#[async_trait]
impl EmbeddingProvider for NgramEmbedder {
    fn state(&self) -> ModelState {
        self.model.map_or(ModelState::Unavailable, |m| ModelState::Loaded {
            dimension: m.dimension(),
        })
    }

    fn dimension(&self) -> usize {
        self.model.map_or(0, EmbeddingModel::dimension)
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let Some(model) = self.model else {
            tracing::warn!("embedding model unavailable, returning empty vector");
            return Ok(Vec::new());
        };

        Ok(Self::embed_text(model.dimension(), text))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let Some(model) = self.model else {
            tracing::warn!("embedding model unavailable, returning no vectors");
            return Ok(Vec::new());
        };

        Ok(texts
            .iter()
            .map(|text| Self::embed_text(model.dimension(), text))
            .collect())
    }
}
