//! Assembling classifier hits into a section sequence.
//!
//! The builder is the only place records are created from extracted text. It derives level and
//! parent from each identifier and resolves repeated identifiers, but it never invents a parent
//! that the text did not mention: a missing container is left for the validator to report.

use crate::defect::Defect;
use crate::formats::Candidate;
use crate::section::{Provenance, SectionId, SectionRecord, SectionSequence};
use std::collections::HashMap;
use tracing::debug;

/// Accumulates candidates from one pass into a [`SectionSequence`].
pub struct SequenceBuilder {
    provenance: Provenance,
    doc_title: String,
    records: Vec<SectionRecord>,
    positions: HashMap<SectionId, usize>,
    defects: Vec<Defect>,
}

impl SequenceBuilder {
    #[must_use]
    /// Start an empty sequence for `provenance`, stamping each record with `doc_title`.
    pub fn new(provenance: Provenance, doc_title: &str) -> Self {
        Self {
            provenance,
            doc_title: doc_title.to_string(),
            records: Vec::new(),
            positions: HashMap::new(),
            defects: Vec::new(),
        }
    }

    /// Add the next candidate in document order.
    ///
    /// A repeated identifier replaces the earlier record, in the earlier record's position, only
    /// when its page is strictly greater. Anything else is discarded and recorded as a duplicate
    /// so a worse reading never overwrites a better one.
    pub fn push(&mut self, candidate: Candidate) {
        let Candidate {
            section_id,
            title,
            page,
        } = candidate;

        if let Some(&idx) = self.positions.get(&section_id) {
            let kept_page = self.records[idx].page;
            if page > kept_page {
                debug!(
                    provenance = %self.provenance,
                    section = %section_id,
                    from = kept_page,
                    to = page,
                    "updating repeated section"
                );
                self.records[idx] = SectionRecord::new(section_id, &title, page, &self.doc_title);
            } else {
                debug!(
                    provenance = %self.provenance,
                    section = %section_id,
                    kept_page,
                    discarded_page = page,
                    "discarding repeated section"
                );
                self.defects.push(Defect::DuplicateIdentifier {
                    section_id,
                    kept_page,
                    discarded_page: page,
                });
            }
            return;
        }

        self.positions.insert(section_id.clone(), self.records.len());
        self.records
            .push(SectionRecord::new(section_id, &title, page, &self.doc_title));
    }

    #[must_use]
    /// Finish the pass, returning the sequence and any duplicate defects.
    pub fn finish(self) -> (SectionSequence, Vec<Defect>) {
        (
            SectionSequence::from_records(self.provenance, self.records),
            self.defects,
        )
    }
}

/// Build a sequence from an ordered list of classifier hits.
#[must_use]
pub fn build_sequence(
    provenance: Provenance,
    doc_title: &str,
    candidates: impl IntoIterator<Item = Candidate>,
) -> (SectionSequence, Vec<Defect>) {
    let mut builder = SequenceBuilder::new(provenance, doc_title);
    for candidate in candidates {
        builder.push(candidate);
    }
    builder.finish()
}

#[cfg(test)]
#[path = "tests/builder.rs"]
mod tests;
