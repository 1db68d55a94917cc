//! Field-level schema check for JSON Lines section files.
//!
//! This runs on raw JSON values rather than on decoded records, so a file with a missing field or
//! a wrongly typed one still yields a count of what is wrong instead of stopping at the first
//! undecodable line.

use crate::error::ReconcileError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Fields every record must carry.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "section_id",
    "title",
    "page",
    "level",
    "parent_id",
    "full_path",
    "doc_title",
    "tags",
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Outcome of checking one JSON Lines file.
pub struct SchemaReport {
    /// Non-blank lines examined.
    pub total_records: usize,
    /// Records with every field present and correctly typed.
    pub valid_records: usize,
    /// Records with missing fields, wrong types, or invalid JSON.
    pub invalid_records: usize,
    /// Every missing field name, once per record it is missing from.
    pub missing_fields: Vec<String>,
    /// False once any record has a wrongly typed field.
    pub field_types_valid: bool,
    /// Human-readable description of each invalid record.
    pub errors: Vec<String>,
}

fn type_matches(field: &str, value: &Value) -> bool {
    match field {
        "page" | "level" => value.is_u64(),
        "parent_id" => value.is_string() || value.is_null(),
        "tags" => value.as_array().is_some_and(|tags| tags.iter().all(Value::is_string)),
        _ => value.is_string(),
    }
}

fn type_errors(record: &Map<String, Value>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter_map(|&field| {
            let value = record.get(field)?;
            (!type_matches(field, value)).then(|| format!("{field}: unexpected value {value}"))
        })
        .collect()
}

/// Check every line of a JSON Lines stream against the record schema.
///
/// # Errors
///
/// Returns an error only if reading fails; malformed lines are counted as invalid records.
pub fn check<R: BufRead>(reader: R) -> Result<SchemaReport, ReconcileError> {
    let mut report = SchemaReport {
        field_types_valid: true,
        ..SchemaReport::default()
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        report.total_records += 1;
        let record_number = idx + 1;

        let record = match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                report.invalid_records += 1;
                report
                    .errors
                    .push(format!("Record {record_number}: not a JSON object"));
                continue;
            }
            Err(e) => {
                report.invalid_records += 1;
                report
                    .errors
                    .push(format!("Record {record_number}: invalid JSON: {e}"));
                continue;
            }
        };

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !record.contains_key(**field))
            .map(|field| (*field).to_string())
            .collect();
        if !missing.is_empty() {
            report.invalid_records += 1;
            report.errors.push(format!(
                "Record {record_number}: missing fields {}",
                missing.join(", ")
            ));
            report.missing_fields.extend(missing);
            continue;
        }

        let wrong = type_errors(&record);
        if !wrong.is_empty() {
            report.field_types_valid = false;
            report.invalid_records += 1;
            report.errors.push(format!(
                "Record {record_number}: type errors: {}",
                wrong.join(", ")
            ));
            continue;
        }

        report.valid_records += 1;
    }

    Ok(report)
}

/// Check a JSON Lines file against the record schema.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn check_file(path: &Path) -> Result<SchemaReport, ReconcileError> {
    check(BufReader::new(File::open(path)?))
}

#[cfg(test)]
#[path = "tests/schema.rs"]
mod tests;
