use serde::{Deserialize, Serialize};

use crate::domain::models::DistanceMetric;

/// Main configuration structure for Archivist
///
/// Constructed once at startup and passed by reference into each
/// component's constructor; nothing reads ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Source corpus configuration
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding model configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Vector index configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            chunking: ChunkingConfig::default(),
            embedding: EmbeddingConfig::default(),
            index: IndexConfig::default(),
            retrieval: RetrievalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Source corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CorpusConfig {
    /// Root directory holding the source documents
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// File extensions to discover (lowercase, without dots)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_source_dir() -> String {
    "data/raw".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            extensions: default_extensions(),
        }
    }
}

/// Configuration for document chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Maximum size of each chunk in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between adjacent chunks in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Separators tried in priority order; an empty string means hard
    /// character splitting
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,
}

const fn default_chunk_size() -> usize {
    1000
}

const fn default_chunk_overlap() -> usize {
    200
}

fn default_separators() -> Vec<String> {
    vec!["\n\n".to_string(), "\n".to_string(), " ".to_string()]
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            separators: default_separators(),
        }
    }
}

impl ChunkingConfig {
    /// Validate the chunking configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err("chunk_overlap must be less than chunk_size".to_string());
        }

        if self.separators.is_empty() {
            return Err("separators cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Embedding model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Model identifier (see `EmbeddingModel::from_identifier`)
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Device preference; the local models are CPU-only and log this
    #[serde(default = "default_device")]
    pub device: String,
}

fn default_embedding_model() -> String {
    "ngram-hash-384".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            device: default_device(),
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IndexConfig {
    /// Directory holding the collection databases
    #[serde(default = "default_index_path")]
    pub path: String,

    /// Collection name; one logical corpus per collection
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Distance metric the collection is created with
    #[serde(default)]
    pub distance_metric: DistanceMetric,
}

fn default_index_path() -> String {
    "data/vectordb".to_string()
}

fn default_collection() -> String {
    "corpus_docs".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
            collection: default_collection(),
            distance_metric: DistanceMetric::default(),
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Default number of chunks returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

const fn default_top_k() -> usize {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional directory for daily-rotated log files
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_reference_deployment() {
        let config = Config::default();

        assert_eq!(config.corpus.source_dir, "data/raw");
        assert_eq!(config.corpus.extensions, vec!["pdf"]);
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.chunking.separators, vec!["\n\n", "\n", " "]);
        assert_eq!(config.embedding.model, "ngram-hash-384");
        assert_eq!(config.index.path, "data/vectordb");
        assert_eq!(config.index.collection, "corpus_docs");
        assert_eq!(config.index.distance_metric, DistanceMetric::Cosine);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_chunking_config_validation() {
        let valid = ChunkingConfig::default();
        assert!(valid.validate().is_ok());

        let invalid_size = ChunkingConfig {
            chunk_size: 0,
            ..ChunkingConfig::default()
        };
        assert!(invalid_size.validate().is_err());

        let invalid_overlap = ChunkingConfig {
            chunk_overlap: 1000,
            ..ChunkingConfig::default()
        };
        assert!(invalid_overlap.validate().is_err());

        let no_separators = ChunkingConfig {
            separators: vec![],
            ..ChunkingConfig::default()
        };
        assert!(no_separators.validate().is_err());
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let restored: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(restored.chunking.chunk_size, config.chunking.chunk_size);
        assert_eq!(restored.index.collection, config.index.collection);
        assert_eq!(restored.index.distance_metric, config.index.distance_metric);
    }
}
