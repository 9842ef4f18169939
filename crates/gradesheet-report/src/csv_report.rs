//! CSV output for flattened question rows and statistics tables.
//!
//! The header row comes from the fields of the first record. An empty
//! collection produces no file at all, not even a header.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write `rows` as CSV to `path`.
///
/// Returns `false` without touching the filesystem when `rows` is empty.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<bool> {
    if rows.is_empty() {
        tracing::debug!("no rows for {}, skipping", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write CSV row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush CSV file {}", path.display()))?;

    tracing::info!("CSV written to {} ({} rows)", path.display(), rows.len());
    Ok(true)
}
