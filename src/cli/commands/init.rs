//! `archivist init` - write a default configuration file

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::domain::models::Config;

/// Arguments for the init command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Write the default configuration to .archivist/config.yaml
pub fn execute(args: &InitArgs, json: bool) -> Result<()> {
    let dir = Path::new(".archivist");
    let path = dir.join("config.yaml");

    if path.exists() && !args.force {
        bail!(
            "configuration already exists at {}; use --force to overwrite",
            path.display()
        );
    }

    std::fs::create_dir_all(dir).context("failed to create .archivist directory")?;

    let yaml = serde_yaml::to_string(&Config::default())
        .context("failed to serialize default configuration")?;
    std::fs::write(&path, yaml).context("failed to write configuration file")?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "written": path.display().to_string() })
        );
    } else {
        println!("Wrote default configuration to {}", path.display());
    }

    Ok(())
}
