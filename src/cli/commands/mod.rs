//! CLI command implementations

pub mod ingest;
pub mod init;
pub mod query;
pub mod status;

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::domain::models::Config;
use crate::domain::ports::EmbeddingProvider;
use crate::infrastructure::vector::{NgramEmbedder, SqliteVectorStore};

/// Build the configured embedding provider
pub(crate) fn build_provider(config: &Config) -> Arc<NgramEmbedder> {
    Arc::new(NgramEmbedder::from_config(&config.embedding))
}

/// Open the configured collection, requiring a loaded model
pub(crate) async fn open_index(
    config: &Config,
    provider: &NgramEmbedder,
) -> Result<SqliteVectorStore> {
    if !provider.state().is_loaded() {
        bail!(
            "embedding model '{}' is unavailable; check the embedding.model setting",
            config.embedding.model
        );
    }

    let store = SqliteVectorStore::open_or_create(&config.index, provider.dimension()).await?;
    Ok(store)
}
