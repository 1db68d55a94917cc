//! Run metadata written next to the section files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Summary of one `parse` run.
pub struct RunMetadata {
    /// Title stamped on every record.
    pub doc_title: String,
    /// Records in the table of contents sequence.
    pub total_toc_sections: usize,
    /// Records in the body sequence.
    pub total_sections: usize,
    /// When the run finished.
    pub processing_date: DateTime<Utc>,
    /// Page text file the run read.
    pub source_file: String,
}

impl RunMetadata {
    #[must_use]
    /// Metadata stamped with the current time.
    pub fn now(
        doc_title: &str,
        total_toc_sections: usize,
        total_sections: usize,
        source_file: &str,
    ) -> Self {
        Self {
            doc_title: doc_title.to_string(),
            total_toc_sections,
            total_sections,
            processing_date: Utc::now(),
            source_file: source_file.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/metadata.rs"]
mod tests;
