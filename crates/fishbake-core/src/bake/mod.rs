//! The bake run: parse the dataset, resolve every record, rewrite the file.
//!
//! Records are resolved strictly one after another. Batching only decides
//! when the progress line is refreshed and when the run pauses to stay
//! polite to the API.

mod progress;

pub use progress::BakeProgress;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::FishbakeConfig;
use crate::dataset::{parse_dataset, render_array, splice, write_atomic, ArrayFrame};
use crate::http::JsonFetch;
use crate::resolver::ImageResolver;

/// Conditions that end a run with a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    /// The dataset framing is absent; nothing was fetched.
    #[error("could not find `{binding} = [...];` in {}", .path.display())]
    ArrayNotFound { binding: String, path: PathBuf },
    /// Every record came back empty; the API is most likely unreachable.
    #[error("no images fetched for {total} records (API unreachable?); {} left unchanged", .path.display())]
    NoImagesFound { total: usize, path: PathBuf },
}

/// Knobs for one run.
#[derive(Debug, Clone)]
pub struct BakeOptions {
    pub batch_size: usize,
    pub batch_delay: Duration,
    /// Resolve and report, but do not rewrite the file.
    pub dry_run: bool,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            batch_size: 4,
            batch_delay: Duration::from_millis(250),
            dry_run: false,
        }
    }
}

impl BakeOptions {
    pub fn from_config(cfg: &FishbakeConfig) -> Self {
        Self {
            batch_size: cfg.batch_size,
            batch_delay: cfg.batch_delay(),
            dry_run: false,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeReport {
    pub total: usize,
    pub found: usize,
    pub failed: usize,
    /// Entries dropped because they did not parse.
    pub skipped: usize,
    /// False for dry runs.
    pub written: bool,
}

/// Runs the whole bake against `path`, printing progress to `out`.
///
/// The file is only rewritten when at least one image was found and
/// `opts.dry_run` is off.
pub fn run_bake<F, W>(
    path: &Path,
    frame: &ArrayFrame,
    resolver: &ImageResolver<F>,
    opts: &BakeOptions,
    out: &mut W,
) -> Result<BakeReport>
where
    F: JsonFetch,
    W: Write,
{
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read dataset {}", path.display()))?;

    let parsed = parse_dataset(&text, frame).ok_or_else(|| BakeError::ArrayNotFound {
        binding: frame.binding().to_string(),
        path: path.to_path_buf(),
    })?;

    for entry in &parsed.skipped {
        writeln!(out, "  Skipping unparseable entry #{}: {}", entry.index, entry.preview)?;
    }

    let span = parsed.span.clone();
    let skipped = parsed.skipped.len();
    let mut records = parsed.records;
    let total = records.len();

    writeln!(out, "Found {} fish in dataset", total)?;
    writeln!(out, "Fetching encyclopedia thumbnails...\n")?;
    tracing::info!(
        "baking {} records from {} (batch size {}, skipped {})",
        total,
        path.display(),
        opts.batch_size,
        skipped
    );

    let mut progress = BakeProgress::new(total);
    let batch_count = total.div_ceil(opts.batch_size.max(1));

    for (i, batch) in records.chunks_mut(opts.batch_size.max(1)).enumerate() {
        let results: Vec<Option<String>> = batch
            .iter()
            .map(|r| resolver.resolve(r.genus(), r.species(), r.common_name()))
            .collect();

        for (record, result) in batch.iter_mut().zip(results) {
            progress.record(result.is_some());
            record.set_image_url(result.as_deref());
        }

        write!(out, "\r  {}", progress.line())?;
        out.flush()?;

        if i + 1 < batch_count && !opts.batch_delay.is_zero() {
            std::thread::sleep(opts.batch_delay);
        }
    }

    writeln!(out, "\n\nImages found: {} / {}", progress.found, total)?;
    tracing::info!("resolved {} of {} records", progress.found, total);

    if progress.found == 0 {
        return Err(BakeError::NoImagesFound {
            total,
            path: path.to_path_buf(),
        }
        .into());
    }

    let report = BakeReport {
        total,
        found: progress.found,
        failed: progress.failed,
        skipped,
        written: !opts.dry_run,
    };

    if opts.dry_run {
        writeln!(out, "\nDry run: {} not modified", path.display())?;
        return Ok(report);
    }

    let array = render_array(frame.binding(), &records)?;
    let patched = splice(&text, span, &array);
    write_atomic(path, &patched)?;
    tracing::info!("rewrote {} ({} bytes)", path.display(), patched.len());

    writeln!(out, "\nUpdated {}", path.display())?;
    writeln!(
        out,
        "{} species now have pre-baked images, zero API calls at runtime.",
        progress.found
    )?;

    Ok(report)
}
