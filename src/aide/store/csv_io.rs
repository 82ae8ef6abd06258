use super::Record;
use crate::error::{AideError, Result};
use std::fs;
use std::path::Path;

/// Write `records` to `path` as CSV, header first, overwriting the file.
///
/// The header is written explicitly so an empty collection still yields a
/// valid (header-only) file.
pub fn write_records<R: Record>(path: &Path, records: &[R]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(AideError::Io)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(R::CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(AideError::Io)?;
    Ok(())
}

/// Read every row of a CSV file into records, matching columns by header name.
/// Fails on the first malformed row.
pub fn read_records<R: Record>(path: &Path) -> Result<Vec<R>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<R>() {
        records.push(row?);
    }
    Ok(records)
}
