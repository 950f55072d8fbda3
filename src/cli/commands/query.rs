//! `archivist query` - retrieve relevant chunks for a query

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::domain::models::{Config, Retrieval, RetrievalStatus};
use crate::services::Retriever;

/// Arguments for the query command
#[derive(Args)]
pub struct QueryArgs {
    /// The query text
    pub query: String,

    /// Number of chunks to retrieve (defaults to retrieval.top_k)
    #[arg(long, short = 'k')]
    pub top_k: Option<usize>,
}

/// Embed the query and print the top-k most similar chunks
pub async fn execute(args: &QueryArgs, config: &Config, json: bool) -> Result<()> {
    let provider = super::build_provider(config);

    // an unopenable index degrades to an empty result with a status,
    // matching the retriever's contract
    let index = match super::open_index(config, &provider).await {
        Ok(store) => Some(Arc::new(store) as Arc<dyn crate::domain::ports::VectorIndex>),
        Err(err) => {
            tracing::warn!(error = %err, "could not open index");
            None
        }
    };

    let retriever = Retriever::new(provider, index, config.retrieval.top_k);
    let k = args.top_k.unwrap_or(config.retrieval.top_k);
    let retrieval = retriever.retrieve(&args.query, k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&retrieval)?);
        return Ok(());
    }

    match retrieval.status {
        RetrievalStatus::Complete => print_results(&retrieval),
        RetrievalStatus::EmbedderUnavailable => {
            println!("No results: the embedding model is unavailable.");
        }
        RetrievalStatus::IndexUnavailable => {
            println!("No results: the vector index could not be opened.");
        }
        RetrievalStatus::EmptyIndex => {
            println!("No results: the collection is empty. Run 'archivist ingest' first.");
        }
    }

    Ok(())
}

fn print_results(retrieval: &Retrieval) {
    if retrieval.results.is_empty() {
        println!("No matching chunks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Source", "Page", "Distance", "Preview"]);

    for chunk in &retrieval.results {
        table.add_row(vec![
            chunk.rank.to_string(),
            chunk.source_path().unwrap_or("unknown").to_string(),
            chunk
                .page_number()
                .map_or_else(|| "?".to_string(), |page| page.to_string()),
            chunk
                .distance()
                .map_or_else(|| "?".to_string(), |distance| format!("{distance:.4}")),
            preview(&chunk.content),
        ]);
    }

    println!("{table}");
}

fn preview(content: &str) -> String {
    let flattened = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = flattened.chars().collect();
    if chars.len() <= 80 {
        flattened
    } else {
        format!("{}...", chars[..80].iter().collect::<String>())
    }
}
