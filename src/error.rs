//! Failures that abort a reconciliation run.
//!
//! Almost nothing in this crate is an error: lines that are not headings are skipped and
//! structural problems are collected as [`Defect`](crate::defect::Defect)s. What remains here is
//! the small set of conditions under which there is nothing to reconcile, plus the I/O and JSON
//! failures of the persistence layer.

use crate::section::Provenance;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
/// Conditions that stop a run outright instead of being recorded as defects.
pub enum ReconcileError {
    /// A whole pass received no text, which means upstream extraction failed.
    #[error("no input lines supplied for the {provenance} pass")]
    EmptyInput {
        /// The pass that was left without input.
        provenance: Provenance,
    },
    /// Page numbers are 1-based; page 0 can only come from a broken extractor.
    #[error("page numbers start at 1, got page 0 for line {line:?}")]
    ZeroPage {
        /// The raw line that carried the invalid page.
        line: String,
    },
    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A JSONL line could not be decoded into a section record.
    #[error("invalid record on line {line_number}: {source}")]
    Json {
        /// 1-based line number within the JSONL input.
        line_number: usize,
        /// Underlying decoder failure.
        source: serde_json::Error,
    },
    /// Serialising a record or report failed.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
