//! CLI for fishbake.

mod commands;

use anyhow::Result;
use clap::Parser;
use fishbake_core::config;
use std::path::PathBuf;

use commands::run_bake_command;

/// Bake encyclopedia photo URLs into the embedded fish dataset.
#[derive(Debug, Parser)]
#[command(name = "fishbake")]
#[command(about = "Bake encyclopedia photo URLs into an embedded fish dataset", long_about = None)]
pub struct Cli {
    /// Dataset file to rewrite. Defaults to `data_path` from config.toml.
    pub path: Option<PathBuf>,

    /// Resolve and report without rewriting the file.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let path = cli.path.unwrap_or_else(|| cfg.data_path.clone());
        run_bake_command(&cfg, &path, cli.dry_run)
    }
}

#[cfg(test)]
mod tests;
