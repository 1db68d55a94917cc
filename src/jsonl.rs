//! JSON Lines persistence for section sequences.
//!
//! One record per line, in document order, with the field set of [`SectionRecord`].

use crate::error::ReconcileError;
use crate::section::SectionRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write records as JSON Lines.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_records<'a, W, I>(mut writer: W, records: I) -> Result<(), ReconcileError>
where
    W: Write,
    I: IntoIterator<Item = &'a SectionRecord>,
{
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a JSON Lines file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_records_file<'a, I>(path: &Path, records: I) -> Result<(), ReconcileError>
where
    I: IntoIterator<Item = &'a SectionRecord>,
{
    write_records(BufWriter::new(File::create(path)?), records)
}

/// Read JSON Lines records, skipping blank lines.
///
/// # Errors
///
/// Returns [`ReconcileError::Json`] naming the first line that is not a valid record, or an I/O
/// error.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<SectionRecord>, ReconcileError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ReconcileError::Json {
            line_number: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Read a JSON Lines file of records.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or holds an invalid record.
pub fn read_records_file(path: &Path) -> Result<Vec<SectionRecord>, ReconcileError> {
    read_records(BufReader::new(File::open(path)?))
}

#[cfg(test)]
#[path = "tests/jsonl.rs"]
mod tests;
