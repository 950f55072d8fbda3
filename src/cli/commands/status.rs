//! `archivist status` - show collection status

use anyhow::Result;
use clap::Args;

use crate::domain::models::Config;
use crate::domain::ports::VectorIndex;

/// Arguments for the status command
#[derive(Args)]
pub struct StatusArgs {}

/// Print the collection's identity and record count
pub async fn execute(_args: &StatusArgs, config: &Config, json: bool) -> Result<()> {
    let provider = super::build_provider(config);
    let store = super::open_index(config, &provider).await?;
    let count = store.count().await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "collection": store.collection(),
                "count": count,
                "dimension": store.dimension(),
                "distance_metric": store.metric().as_str(),
            })
        );
    } else {
        println!("Collection: {}", store.collection());
        println!("  records: {}", console::style(count).green());
        println!("  dimension: {}", store.dimension());
        println!("  distance metric: {}", store.metric());
    }

    Ok(())
}
