//! Command-line interface
//!
//! Thin glue over the core services: every command loads the immutable
//! configuration, builds the components it needs and prints either
//! human-readable or `--json` output.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Archivist: document ingestion and semantic retrieval
#[derive(Parser)]
#[command(name = "archivist", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Load configuration from a specific file instead of .archivist/
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init(commands::init::InitArgs),
    /// Ingest the document corpus into the vector index
    Ingest(commands::ingest::IngestArgs),
    /// Query the index for relevant chunks
    Query(commands::query::QueryArgs),
    /// Show collection status
    Status(commands::status::StatusArgs),
}

/// Print an error and exit non-zero
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        eprintln!(
            "{}",
            serde_json::json!({ "error": format!("{err:#}") })
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
