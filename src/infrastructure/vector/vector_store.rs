//! SQLite-backed vector store
//!
//! One database file per collection under the configured index path.
//! Embeddings are stored as little-endian f32 BLOBs next to the raw
//! chunk text and its JSON metadata; similarity search is a full scan
//! scored in Rust under the collection's distance metric.
//!
//! The collection's dimension and metric are part of its persisted
//! identity: they are written at creation and verified on every open.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::domain::models::{DistanceMetric, IndexConfig, RecordBatch, ScoredHit};
use crate::domain::ports::{IndexError, VectorIndex};

const META_DIMENSION: &str = "dimension";
const META_METRIC: &str = "distance_metric";
const META_CREATED_AT: &str = "created_at";
const META_NEXT_DOC_ID: &str = "next_doc_id";

/// Persistent vector collection over SQLite
pub struct SqliteVectorStore {
    pool: SqlitePool,
    collection: String,
    dimension: usize,
    metric: DistanceMetric,
}

impl SqliteVectorStore {
    /// Open a collection, creating it on first use
    ///
    /// Idempotent: an existing collection is reused after verifying that
    /// its stored dimension and metric match the configured ones; a
    /// mismatch fails fast rather than silently reusing an incompatible
    /// store.
    ///
    /// # Arguments
    /// * `config` - Index path, collection name and metric
    /// * `dimension` - Vector dimension of the active embedding model
    pub async fn open_or_create(
        config: &IndexConfig,
        dimension: usize,
    ) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::ZeroDimension {
                collection: config.collection.clone(),
            });
        }

        let dir = Path::new(&config.path);
        std::fs::create_dir_all(dir)?;

        let db_path = dir.join(format!("{}.db", config.collection));
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        // single connection: this store has one writer by design
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;

        let store = Self {
            pool,
            collection: config.collection.clone(),
            dimension,
            metric: config.distance_metric,
        };

        match store.read_identity().await? {
            Some((stored_dimension, stored_metric)) => {
                if stored_dimension != dimension {
                    return Err(IndexError::CollectionDimensionMismatch {
                        collection: store.collection.clone(),
                        stored: stored_dimension,
                        requested: dimension,
                    });
                }
                if stored_metric != config.distance_metric {
                    return Err(IndexError::MetricMismatch {
                        collection: store.collection.clone(),
                        stored: stored_metric.as_str().to_string(),
                        requested: config.distance_metric.as_str().to_string(),
                    });
                }
                tracing::debug!(
                    collection = %store.collection,
                    dimension,
                    metric = %stored_metric,
                    "reusing existing collection"
                );
            }
            None => {
                store.write_identity().await?;
                tracing::info!(
                    collection = %store.collection,
                    dimension,
                    metric = %config.distance_metric,
                    "created collection"
                );
            }
        }

        Ok(store)
    }

    async fn init_schema(pool: &SqlitePool) -> Result<(), IndexError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS collection_meta (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id        TEXT PRIMARY KEY,
                content   TEXT NOT NULL,
                metadata  TEXT NOT NULL,
                embedding BLOB NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Stored (dimension, metric) identity, `None` for a fresh collection
    async fn read_identity(&self) -> Result<Option<(usize, DistanceMetric)>, IndexError> {
        let rows = sqlx::query("SELECT key, value FROM collection_meta")
            .fetch_all(&self.pool)
            .await?;

        let mut meta = HashMap::new();
        for row in rows {
            let key: String = row.get("key");
            let value: String = row.get("value");
            meta.insert(key, value);
        }

        let Some(dimension_str) = meta.get(META_DIMENSION) else {
            return Ok(None);
        };

        let dimension: usize = dimension_str.parse().map_err(|_| {
            IndexError::CorruptMetadata(format!("invalid dimension '{dimension_str}'"))
        })?;

        let metric_str = meta.get(META_METRIC).ok_or_else(|| {
            IndexError::CorruptMetadata("distance_metric missing".to_string())
        })?;
        let metric = DistanceMetric::parse(metric_str).ok_or_else(|| {
            IndexError::CorruptMetadata(format!("unknown distance_metric '{metric_str}'"))
        })?;

        Ok(Some((dimension, metric)))
    }

    async fn write_identity(&self) -> Result<(), IndexError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in [
            (META_DIMENSION, self.dimension.to_string()),
            (META_METRIC, self.metric.as_str().to_string()),
            (META_CREATED_AT, chrono::Utc::now().to_rfc3339()),
            (META_NEXT_DOC_ID, "0".to_string()),
        ] {
            sqlx::query(
                "INSERT OR REPLACE INTO collection_meta (key, value) VALUES (?, ?)",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Collection name this store was opened with
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Serialize embedding vector to bytes for storage
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding vector from bytes
    fn bytes_to_embedding(bytes: &[u8]) -> Result<Vec<f32>, IndexError> {
        if bytes.len() % 4 != 0 {
            return Err(IndexError::CorruptEmbedding(bytes.len()));
        }

        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}

#[async_trait]
impl VectorIndex for SqliteVectorStore {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    async fn count(&self) -> Result<usize, IndexError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM chunks")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get("count");
        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn allocate_ids(&self, n: usize) -> Result<u64, IndexError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT value FROM collection_meta WHERE key = ?")
            .bind(META_NEXT_DOC_ID)
            .fetch_optional(&mut *tx)
            .await?;

        let start: u64 = match row {
            Some(row) => {
                let value: String = row.get("value");
                value.parse().map_err(|_| {
                    IndexError::CorruptMetadata(format!("invalid next_doc_id '{value}'"))
                })?
            }
            None => 0,
        };

        sqlx::query("INSERT OR REPLACE INTO collection_meta (key, value) VALUES (?, ?)")
            .bind(META_NEXT_DOC_ID)
            .bind((start + n as u64).to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(start)
    }

    async fn add(&self, batch: RecordBatch) -> Result<(), IndexError> {
        if !batch.is_aligned() {
            return Err(IndexError::BatchLengthMismatch {
                ids: batch.ids.len(),
                embeddings: batch.embeddings.len(),
                documents: batch.documents.len(),
                metadatas: batch.metadatas.len(),
            });
        }

        for embedding in &batch.embeddings {
            if embedding.len() != self.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dimension,
                    actual: embedding.len(),
                });
            }
        }

        if batch.is_empty() {
            return Ok(());
        }

        // all or nothing: one transaction for the whole batch
        let mut tx = self.pool.begin().await?;

        for i in 0..batch.len() {
            let metadata = serde_json::to_string(&batch.metadatas[i])?;

            sqlx::query(
                "INSERT INTO chunks (id, content, metadata, embedding) VALUES (?, ?, ?, ?)",
            )
            .bind(&batch.ids[i])
            .bind(&batch.documents[i])
            .bind(metadata)
            .bind(Self::embedding_to_bytes(&batch.embeddings[i]))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            collection = %self.collection,
            records = batch.len(),
            "added record batch"
        );

        Ok(())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredHit>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let rows = sqlx::query("SELECT id, content, metadata, embedding FROM chunks")
            .fetch_all(&self.pool)
            .await?;

        let mut hits = Vec::with_capacity(rows.len());

        for row in rows {
            let id: String = row.get("id");
            let content: String = row.get("content");
            let metadata_str: String = row.get("metadata");
            let embedding_bytes: Vec<u8> = row.get("embedding");

            let embedding = Self::bytes_to_embedding(&embedding_bytes)?;
            let distance = self.metric.distance(query, &embedding);

            let metadata = serde_json::from_str(&metadata_str)
                .unwrap_or_else(|_| serde_json::json!({}));

            hits.push(ScoredHit {
                id,
                content,
                metadata,
                distance,
            });
        }

        // Sort by distance (ascending) and take top results
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> IndexConfig {
        IndexConfig {
            path: dir.path().join("vectordb").to_string_lossy().to_string(),
            collection: "test_docs".to_string(),
            distance_metric: DistanceMetric::Cosine,
        }
    }

    fn unit_vector(dimension: usize, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dimension];
        v[axis] = 1.0;
        v
    }

    fn batch_of(vectors: Vec<Vec<f32>>) -> RecordBatch {
        let n = vectors.len();
        RecordBatch {
            ids: (0..n).map(|i| format!("doc_{i}")).collect(),
            embeddings: vectors,
            documents: (0..n).map(|i| format!("text {i}")).collect(),
            metadatas: (0..n)
                .map(|i| serde_json::json!({"source": "a.pdf", "page": i + 1}))
                .collect(),
        }
    }

    #[test]
    fn test_embedding_serialization() {
        let embedding = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let bytes = SqliteVectorStore::embedding_to_bytes(&embedding);
        let restored = SqliteVectorStore::bytes_to_embedding(&bytes).unwrap();

        assert_eq!(embedding.len(), restored.len());
        for (a, b) in embedding.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_corrupt_embedding_bytes_rejected() {
        let result = SqliteVectorStore::bytes_to_embedding(&[0u8; 7]);
        assert!(matches!(result, Err(IndexError::CorruptEmbedding(7))));
    }

    #[tokio::test]
    async fn test_open_creates_and_reopens() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let store = SqliteVectorStore::open_or_create(&config, 4).await.unwrap();
        assert_eq!(store.dimension(), 4);
        assert_eq!(store.metric(), DistanceMetric::Cosine);
        assert_eq!(store.count().await.unwrap(), 0);
        drop(store);

        // idempotent reopen with matching identity
        let reopened = SqliteVectorStore::open_or_create(&config, 4).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reopen_with_wrong_dimension_fails() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        SqliteVectorStore::open_or_create(&config, 4).await.unwrap();

        let result = SqliteVectorStore::open_or_create(&config, 8).await;
        assert!(matches!(
            result,
            Err(IndexError::CollectionDimensionMismatch {
                stored: 4,
                requested: 8,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_reopen_with_wrong_metric_fails() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        SqliteVectorStore::open_or_create(&config, 4).await.unwrap();

        let mut euclidean = test_config(&dir);
        euclidean.distance_metric = DistanceMetric::Euclidean;
        let result = SqliteVectorStore::open_or_create(&euclidean, 4).await;

        assert!(matches!(result, Err(IndexError::MetricMismatch { .. })));
    }

    #[tokio::test]
    async fn test_zero_dimension_rejected() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let result = SqliteVectorStore::open_or_create(&config, 0).await;
        assert!(matches!(result, Err(IndexError::ZeroDimension { .. })));
    }

    #[tokio::test]
    async fn test_add_and_count() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        let batch = batch_of(vec![unit_vector(3, 0), unit_vector(3, 1)]);
        store.add(batch).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_misaligned_batch_rejected_and_nothing_committed() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        // 5 vectors but only 4 metadata entries
        let mut batch = batch_of(vec![
            unit_vector(3, 0),
            unit_vector(3, 1),
            unit_vector(3, 2),
            unit_vector(3, 0),
            unit_vector(3, 1),
        ]);
        batch.metadatas.pop();

        let result = store.add(batch).await;
        assert!(matches!(
            result,
            Err(IndexError::BatchLengthMismatch {
                embeddings: 5,
                metadatas: 4,
                ..
            })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_wrong_dimension_vector_rejected() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        let batch = batch_of(vec![unit_vector(3, 0), vec![1.0, 0.0]]);
        let result = store.add(batch).await;

        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_orders_by_ascending_distance() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        let near = vec![0.9, 0.1, 0.0];
        let far = unit_vector(3, 1);
        let exact = unit_vector(3, 0);
        store
            .add(batch_of(vec![far, near, exact]))
            .await
            .unwrap();

        let hits = store.search(&unit_vector(3, 0), 3).await.unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, "doc_2"); // exact match first
        assert_eq!(hits[1].id, "doc_1");
        assert_eq!(hits[2].id, "doc_0");
        assert!(hits[0].distance <= hits[1].distance);
        assert!(hits[1].distance <= hits[2].distance);
    }

    #[tokio::test]
    async fn test_search_k_larger_than_collection() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        store
            .add(batch_of(vec![
                unit_vector(3, 0),
                unit_vector(3, 1),
                unit_vector(3, 2),
            ]))
            .await
            .unwrap();

        let hits = store.search(&unit_vector(3, 0), 10).await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn test_search_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        let hits = store.search(&unit_vector(3, 0), 5).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_query_dimension_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        let result = store.search(&[1.0, 0.0], 5).await;
        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[tokio::test]
    async fn test_metadata_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SqliteVectorStore::open_or_create(&test_config(&dir), 3)
            .await
            .unwrap();

        let batch = RecordBatch {
            ids: vec!["doc_0".to_string()],
            embeddings: vec![unit_vector(3, 0)],
            documents: vec!["chunk text".to_string()],
            metadatas: vec![serde_json::json!({
                "source": "guides/intro.pdf",
                "filename": "intro.pdf",
                "page": 7,
            })],
        };
        store.add(batch).await.unwrap();

        let hits = store.search(&unit_vector(3, 0), 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "chunk text");
        assert_eq!(hits[0].metadata["source"], "guides/intro.pdf");
        assert_eq!(hits[0].metadata["page"], 7);
    }

    #[tokio::test]
    async fn test_allocate_ids_monotonic_across_reopen() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let store = SqliteVectorStore::open_or_create(&config, 3).await.unwrap();
        assert_eq!(store.allocate_ids(5).await.unwrap(), 0);
        assert_eq!(store.allocate_ids(2).await.unwrap(), 5);
        drop(store);

        let reopened = SqliteVectorStore::open_or_create(&config, 3).await.unwrap();
        assert_eq!(reopened.allocate_ids(1).await.unwrap(), 7);
    }
}
