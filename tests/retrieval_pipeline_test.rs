//! End-to-end tests for the ingestion and retrieval pipeline.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;
use uuid::Uuid;

use archivist::domain::models::{
    ChunkingConfig, DistanceMetric, EmbeddingModel, IndexConfig, PageUnit, RecordBatch,
    RetrievalStatus,
};
use archivist::domain::ports::{DocumentLoader, EmbeddingProvider, IndexError, LoadOutcome, VectorIndex};
use archivist::infrastructure::vector::{NgramEmbedder, RecursiveChunker, SqliteVectorStore};
use archivist::services::{IngestionPipeline, Retriever};

struct NoopLoader;

impl DocumentLoader for NoopLoader {
    fn load(&self, _root: &Path) -> Result<LoadOutcome> {
        Ok(LoadOutcome::default())
    }
}

fn index_config(dir: &TempDir) -> IndexConfig {
    IndexConfig {
        path: dir.path().join("vectordb").to_string_lossy().to_string(),
        collection: "corpus_docs".to_string(),
        distance_metric: DistanceMetric::Cosine,
    }
}

async fn open_store(dir: &TempDir, dimension: usize) -> Arc<SqliteVectorStore> {
    Arc::new(
        SqliteVectorStore::open_or_create(&index_config(dir), dimension)
            .await
            .unwrap(),
    )
}

fn units_from(texts: &[&str]) -> Vec<PageUnit> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            PageUnit::new(
                *text,
                "corpus/docs.pdf",
                "docs.pdf",
                u32::try_from(i).unwrap() + 1,
            )
        })
        .collect()
}

async fn ingest_texts(
    store: Arc<SqliteVectorStore>,
    provider: Arc<NgramEmbedder>,
    texts: &[&str],
) {
    let pipeline = IngestionPipeline::new(
        Arc::new(NoopLoader),
        RecursiveChunker::new(ChunkingConfig::default()).unwrap(),
        provider,
        store,
    );

    pipeline
        .ingest_units(Uuid::new_v4(), &units_from(texts))
        .await
        .unwrap();
}

const CORPUS: [&str; 3] = [
    "Orion soft offers VPN solutions.",
    "zVirt is a virtualization platform.",
    "Metrics module collects 119 metrics.",
];

#[tokio::test]
async fn metrics_question_returns_metrics_chunk_first() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;

    let retriever = Retriever::new(provider, Some(store), 5);
    let retrieval = retriever
        .retrieve("What does the Metrics module collect?", 1)
        .await
        .unwrap();

    assert_eq!(retrieval.status, RetrievalStatus::Complete);
    assert_eq!(retrieval.results.len(), 1);
    assert_eq!(
        retrieval.results[0].content,
        "Metrics module collects 119 metrics."
    );
}

#[tokio::test]
async fn identical_query_is_the_closest_match() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;

    let retriever = Retriever::new(provider, Some(store), 5);
    let retrieval = retriever
        .retrieve("zVirt is a virtualization platform.", 3)
        .await
        .unwrap();

    assert_eq!(retrieval.results.len(), 3);
    assert_eq!(
        retrieval.results[0].content,
        "zVirt is a virtualization platform."
    );

    // the exact-content hit has the smallest distance of the batch
    let top_distance = retrieval.results[0].distance().unwrap();
    assert!(top_distance.abs() < 1e-5);
    for other in &retrieval.results[1..] {
        assert!(other.distance().unwrap() >= top_distance);
    }
}

#[tokio::test]
async fn search_with_k_beyond_collection_returns_all_ordered() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;

    let query = provider.embed_one("virtualization platform").await.unwrap();
    let hits = store.search(&query, 10).await.unwrap();

    assert_eq!(hits.len(), 3);
    for pair in hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[tokio::test]
async fn misaligned_add_fails_and_leaves_count_unchanged() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;
    let before = store.count().await.unwrap();

    let texts: Vec<String> = (0..5).map(|i| format!("chunk number {i}")).collect();
    let embeddings = provider.embed_many(&texts).await.unwrap();

    // 5 vectors but only 4 metadata entries
    let batch = RecordBatch {
        ids: (0..5).map(|i| format!("doc_{}", 100 + i)).collect(),
        embeddings,
        documents: texts,
        metadatas: (0..4).map(|i| serde_json::json!({"page": i + 1})).collect(),
    };

    let result = store.add(batch).await;
    assert!(matches!(
        result,
        Err(IndexError::BatchLengthMismatch { .. })
    ));
    assert_eq!(store.count().await.unwrap(), before);
}

#[tokio::test]
async fn retrieval_on_empty_collection_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    let retriever = Retriever::new(provider, Some(store), 5);
    let retrieval = retriever.retrieve("anything at all", 5).await.unwrap();

    assert!(retrieval.results.is_empty());
    assert_eq!(retrieval.status, RetrievalStatus::EmptyIndex);
}

#[tokio::test]
async fn reingestion_appends_with_fresh_ids() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;
    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;

    // no deduplication, and the persisted counter keeps ids distinct
    assert_eq!(store.count().await.unwrap(), 6);
}

#[tokio::test]
async fn provenance_round_trips_through_the_index() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(NgramEmbedder::new(EmbeddingModel::NgramHash384));
    let store = open_store(&dir, provider.dimension()).await;

    ingest_texts(Arc::clone(&store), Arc::clone(&provider), &CORPUS).await;

    let retriever = Retriever::new(provider, Some(store), 5);
    let retrieval = retriever.retrieve("VPN solutions", 1).await.unwrap();

    let chunk = &retrieval.results[0];
    assert_eq!(chunk.source_path(), Some("corpus/docs.pdf"));
    assert_eq!(chunk.page_number(), Some(1));
    assert!(chunk.distance().is_some());

    let passages = retrieval.passages();
    assert_eq!(passages[0].source_path, "corpus/docs.pdf");
    assert_eq!(passages[0].page_number, 1);
}
