//! Archivist CLI entry point.

use clap::Parser;

use archivist::cli::{Cli, Commands};
use archivist::infrastructure::config::ConfigLoader;
use archivist::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            archivist::cli::handle_error(err, cli.json);
            return;
        }
    };

    let _guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(err) => {
            archivist::cli::handle_error(err, cli.json);
            return;
        }
    };

    let result = match &cli.command {
        Commands::Init(args) => archivist::cli::commands::init::execute(args, cli.json),
        Commands::Ingest(args) => {
            archivist::cli::commands::ingest::execute(args, &config, cli.json).await
        }
        Commands::Query(args) => {
            archivist::cli::commands::query::execute(args, &config, cli.json).await
        }
        Commands::Status(args) => {
            archivist::cli::commands::status::execute(args, &config, cli.json).await
        }
    };

    if let Err(err) = result {
        archivist::cli::handle_error(err, cli.json);
    }
}
