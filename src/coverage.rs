//! Coverage reconciliation between the table of contents and the body scan.
//!
//! The table of contents is treated as the statement of intended structure. Coverage is the share
//! of its entries the body scan located; extra sections found only in the body are reported but
//! never folded into the ratio, so over-segmentation cannot mask under-extraction.

use crate::defect::{Defect, DriftField};
use crate::report::ReconciliationReport;
use crate::section::{SectionId, SectionRecord, SectionSequence};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Identifier-level alignment of two sequences.
pub struct Alignment {
    /// Identifiers present in both sequences, in identifier order.
    pub common: Vec<SectionId>,
    /// Identifiers declared in the table of contents but not found in the body.
    pub toc_only: Vec<SectionId>,
    /// Identifiers found in the body but not declared in the table of contents.
    pub body_only: Vec<SectionId>,
    /// Title and page disagreements between common sections.
    pub drift: Vec<Defect>,
}

impl Alignment {
    #[must_use]
    /// `common / total_toc`, or 0 when the table of contents is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage_ratio(&self) -> f64 {
        let total_toc = self.common.len() + self.toc_only.len();
        if total_toc == 0 {
            0.0
        } else {
            self.common.len() as f64 / total_toc as f64
        }
    }
}

/// Lowercase and collapse runs of whitespace so layout noise does not count as drift.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn presence(sequence: &SectionSequence) -> BTreeMap<&SectionId, &SectionRecord> {
    let mut map = BTreeMap::new();
    for record in sequence {
        // First occurrence wins, matching the builder.
        map.entry(&record.section_id).or_insert(record);
    }
    map
}

/// Align two sequences by identifier and compare the sections they share.
#[must_use]
pub fn align(toc: &SectionSequence, body: &SectionSequence) -> Alignment {
    let toc_map = presence(toc);
    let body_map = presence(body);
    let toc_ids: BTreeSet<&SectionId> = toc_map.keys().copied().collect();
    let body_ids: BTreeSet<&SectionId> = body_map.keys().copied().collect();

    let mut drift = Vec::new();
    let mut common = Vec::new();
    for &id in toc_ids.intersection(&body_ids) {
        let (t, b) = (toc_map[id], body_map[id]);
        if normalize_title(&t.title) != normalize_title(&b.title) {
            drift.push(Defect::ContentDrift {
                section_id: id.clone(),
                field: DriftField::Title,
                toc_value: t.title.clone(),
                body_value: b.title.clone(),
            });
        }
        if t.page != b.page {
            drift.push(Defect::ContentDrift {
                section_id: id.clone(),
                field: DriftField::Page,
                toc_value: t.page.to_string(),
                body_value: b.page.to_string(),
            });
        }
        common.push(id.clone());
    }

    Alignment {
        common,
        toc_only: toc_ids.difference(&body_ids).map(|&id| id.clone()).collect(),
        body_only: body_ids.difference(&toc_ids).map(|&id| id.clone()).collect(),
        drift,
    }
}

/// Reconcile two validated sequences into a report.
///
/// `toc_defects` and `body_defects` are the builder and validator findings for each pass; they
/// are merged with the reconciliation's own drift findings.
#[must_use]
pub fn reconcile(
    toc: &SectionSequence,
    toc_defects: &[Defect],
    body: &SectionSequence,
    body_defects: &[Defect],
) -> ReconciliationReport {
    let alignment = align(toc, body);
    ReconciliationReport::assemble(toc, body, &alignment, toc_defects, body_defects)
}

#[cfg(test)]
#[path = "tests/coverage.rs"]
mod tests;
