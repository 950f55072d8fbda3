//! `archivist ingest` - run the ingestion pipeline

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::models::Config;
use crate::domain::ports::CorpusSource;
use crate::infrastructure::loader::{LocalCorpus, PdfLoader};
use crate::infrastructure::vector::RecursiveChunker;
use crate::services::IngestionPipeline;

/// Arguments for the ingest command
#[derive(Args)]
pub struct IngestArgs {
    /// Override the configured source directory
    #[arg(long)]
    pub source: Option<PathBuf>,
}

/// Load, chunk, embed and index the corpus
pub async fn execute(args: &IngestArgs, config: &Config, json: bool) -> Result<()> {
    let root = args
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.corpus.source_dir));

    let corpus = LocalCorpus::new(root.clone());
    if !corpus.ensure_corpus_available().await? {
        bail!(
            "source corpus at '{}' is not available; populate it first",
            root.display()
        );
    }

    let provider = super::build_provider(config);
    let index = Arc::new(super::open_index(config, &provider).await?);

    let pipeline = IngestionPipeline::new(
        Arc::new(PdfLoader::new(config.corpus.extensions.clone())),
        RecursiveChunker::new(config.chunking.clone())?,
        provider,
        index,
    );

    let spinner = if json {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message(format!("ingesting corpus from {}", root.display()));
        spinner.enable_steady_tick(Duration::from_millis(120));
        Some(spinner)
    };

    let result = pipeline.run(&root).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Ingestion complete.");
        println!(
            "  files: {} ({} skipped)",
            report.files, report.files_skipped
        );
        println!("  pages: {}", report.pages);
        println!("  chunks: {}", report.chunks);
        println!("  vectors indexed: {}", report.vectors_indexed);
        println!(
            "  collection size: {}",
            console::style(report.collection_count).green()
        );
    }

    Ok(())
}
