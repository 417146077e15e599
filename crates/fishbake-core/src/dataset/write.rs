//! Serialize records back into the array literal and rewrite the file.
//!
//! Rows are compact (`["a","b"]`, no space after commas). A dataset last
//! written with `", "` separators changes on every line the first time it is
//! rebaked; later runs are stable.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

use super::record::SpeciesRecord;

/// Renders `<binding> = [\n  [...],\n  [...]\n];` with compact, non-ASCII-preserving JSON rows.
pub fn render_array(binding: &str, records: &[SpeciesRecord]) -> Result<String> {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let row = serde_json::to_string(record.fields()).context("serialize record")?;
        lines.push(format!("  {}", row));
    }
    Ok(format!("{} = [\n{}\n];", binding, lines.join(",\n")))
}

/// Replaces `span` in `text` with `replacement`, leaving every other byte intact.
pub fn splice(text: &str, span: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - span.len() + replacement.len());
    out.push_str(&text[..span.start]);
    out.push_str(replacement);
    out.push_str(&text[span.end..]);
    out
}

/// Writes `contents` to a temp file beside `path`, then renames it over `path`.
///
/// Symlinks are followed so the link survives and the real file is replaced;
/// the replaced file's permissions carry over to the new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("write temp file for {}", path.display()))?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("copy permissions of {}", target.display()))?;
    }
    tmp.persist(&target)
        .with_context(|| format!("replace {}", target.display()))?;
    Ok(())
}
