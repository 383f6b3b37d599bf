//! JSONL and CSV writers for collected commit rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::models::CommitRow;

/// Write one JSON object per line, keys in field declaration order,
/// non-ASCII preserved. Returns the number of rows written.
pub fn write_jsonl(rows: &[CommitRow], path: &Path) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Write a header row plus one record per commit, with standard CSV
/// quoting. The header is written even when there are no rows. Returns the
/// number of data rows written.
pub fn write_csv(rows: &[CommitRow], path: &Path) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(CommitRow::FIELDS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}
