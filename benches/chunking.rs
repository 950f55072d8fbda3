//! Chunking throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use archivist::domain::models::ChunkingConfig;
use archivist::infrastructure::vector::RecursiveChunker;

fn paragraph_text(paragraphs: usize) -> String {
    let sentence = "The quick brown fox jumps over the lazy dog and keeps going. ";
    let paragraph = sentence.repeat(8);
    vec![paragraph; paragraphs].join("\n\n")
}

fn bench_chunking(c: &mut Criterion) {
    let chunker = RecursiveChunker::new(ChunkingConfig::default()).unwrap();

    let small = paragraph_text(4);
    let large = paragraph_text(64);

    c.bench_function("split_text_small_page", |b| {
        b.iter(|| chunker.split_text(black_box(&small)));
    });

    c.bench_function("split_text_large_page", |b| {
        b.iter(|| chunker.split_text(black_box(&large)));
    });

    let tight = RecursiveChunker::new(ChunkingConfig {
        chunk_size: 200,
        chunk_overlap: 40,
        separators: vec!["\n\n".into(), "\n".into(), " ".into()],
    })
    .unwrap();

    c.bench_function("split_text_tight_chunks", |b| {
        b.iter(|| tight.split_text(black_box(&large)));
    });
}

criterion_group!(benches, bench_chunking);
criterion_main!(benches);
