use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunking config: {0}")]
    InvalidChunking(String),

    #[error("Invalid top_k: must be at least 1")]
    InvalidTopK,

    #[error("Corpus source_dir cannot be empty")]
    EmptySourceDir,

    #[error("Corpus extensions cannot be empty")]
    EmptyExtensions,

    #[error("Index path cannot be empty")]
    EmptyIndexPath,

    #[error("Collection name cannot be empty")]
    EmptyCollection,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .archivist/config.yaml (project config, created by init)
    /// 3. .archivist/local.yaml (project local overrides, optional)
    /// 4. Environment variables (ARCHIVIST_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".archivist/config.yaml"))
            .merge(Yaml::file(".archivist/local.yaml"))
            .merge(Env::prefixed("ARCHIVIST_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        config
            .chunking
            .validate()
            .map_err(ConfigError::InvalidChunking)?;

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }

        if config.corpus.source_dir.is_empty() {
            return Err(ConfigError::EmptySourceDir);
        }

        if config.corpus.extensions.is_empty() {
            return Err(ConfigError::EmptyExtensions);
        }

        if config.index.path.is_empty() {
            return Err(ConfigError::EmptyIndexPath);
        }

        if config.index.collection.is_empty() {
            return Err(ConfigError::EmptyCollection);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
