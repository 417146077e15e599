//! `fishbake [PATH]` – resolve images for every record and rewrite the dataset.

use anyhow::Result;
use fishbake_core::bake::{run_bake, BakeOptions};
use fishbake_core::config::FishbakeConfig;
use fishbake_core::dataset::ArrayFrame;
use fishbake_core::http::CurlFetcher;
use fishbake_core::resolver::ImageResolver;
use std::path::Path;

pub fn run_bake_command(cfg: &FishbakeConfig, path: &Path, dry_run: bool) -> Result<()> {
    let frame = ArrayFrame::new(&cfg.binding);
    let resolver = ImageResolver::from_config(CurlFetcher::from_config(cfg), cfg);
    let opts = BakeOptions {
        dry_run,
        ..BakeOptions::from_config(cfg)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = run_bake(path, &frame, &resolver, &opts, &mut out)?;
    tracing::info!(
        "bake finished: {} of {} records with images, {} skipped, written={}",
        report.found,
        report.total,
        report.skipped,
        report.written
    );
    Ok(())
}
