//! The reconciliation report handed to downstream renderers.
//!
//! Field names follow the established report schema (`total_spec`, `spec_only`,
//! `coverage_percentage`), where "spec" means the body scan. A report is built once per run and
//! exposes read-only accessors only.

use crate::coverage::Alignment;
use crate::defect::{Defect, DefectSource, DriftField, SourcedDefect};
use crate::section::{SectionId, SectionSequence};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A record whose level disagrees with its identifier.
pub struct LevelInconsistency {
    /// The offending identifier.
    pub identifier: SectionId,
    /// Component count of the identifier.
    pub expected_level: usize,
    /// Level stored on the record.
    pub actual_level: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A common section whose title or page differs between the two passes.
pub struct ParentChildMismatch {
    /// The common identifier.
    pub identifier: SectionId,
    /// Attribute that differs.
    pub field: DriftField,
    /// Value in the table of contents.
    pub toc_value: String,
    /// Value found in the body.
    pub body_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A section present in only one of the two passes.
pub struct UnmatchedSection {
    /// Identifier of the section.
    pub section_id: SectionId,
    /// Its title in the pass that found it.
    pub title: String,
    /// Its page in the pass that found it.
    pub page: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
/// How deep the declared table of contents goes.
pub struct LevelDistribution {
    /// Top-level entries.
    pub level_1: usize,
    /// Second-level entries.
    pub level_2: usize,
    /// Entries at depth three or more.
    pub level_3_plus: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Aggregate result of reconciling the table of contents with the body scan.
pub struct ReconciliationReport {
    total_toc: usize,
    total_spec: usize,
    common: usize,
    toc_only: usize,
    spec_only: usize,
    coverage_percentage: f64,
    orphaned_sections: Vec<SectionId>,
    level_inconsistencies: Vec<LevelInconsistency>,
    parent_child_mismatches: Vec<ParentChildMismatch>,
    toc_only_sections: Vec<UnmatchedSection>,
    spec_only_sections: Vec<UnmatchedSection>,
    toc_levels: LevelDistribution,
    structural_defects: Vec<SourcedDefect>,
    #[serde(skip)]
    coverage_ratio: f64,
}

fn unmatched(ids: &[SectionId], sequence: &SectionSequence) -> Vec<UnmatchedSection> {
    ids.iter()
        .filter_map(|id| sequence.get(id))
        .map(|r| UnmatchedSection {
            section_id: r.section_id.clone(),
            title: r.title.clone(),
            page: r.page,
        })
        .collect()
}

impl ReconciliationReport {
    #[must_use]
    /// Merge an alignment with both passes' defect lists.
    pub fn assemble(
        toc: &SectionSequence,
        body: &SectionSequence,
        alignment: &Alignment,
        toc_defects: &[Defect],
        body_defects: &[Defect],
    ) -> Self {
        let structural_defects: Vec<SourcedDefect> = toc_defects
            .iter()
            .map(|d| (DefectSource::from(toc.provenance()), d))
            .chain(
                body_defects
                    .iter()
                    .map(|d| (DefectSource::from(body.provenance()), d)),
            )
            .chain(
                alignment
                    .drift
                    .iter()
                    .map(|d| (DefectSource::Reconciliation, d)),
            )
            .map(|(source, defect)| SourcedDefect {
                source,
                defect: defect.clone(),
            })
            .collect();

        let mut orphaned = BTreeSet::new();
        let mut level_inconsistencies = Vec::new();
        let mut parent_child_mismatches = Vec::new();
        for sourced in &structural_defects {
            match &sourced.defect {
                Defect::Orphan { section_id, .. } => {
                    orphaned.insert(section_id.clone());
                }
                Defect::LevelInconsistency {
                    section_id,
                    expected_level,
                    actual_level,
                } => level_inconsistencies.push(LevelInconsistency {
                    identifier: section_id.clone(),
                    expected_level: *expected_level,
                    actual_level: *actual_level,
                }),
                Defect::ContentDrift {
                    section_id,
                    field,
                    toc_value,
                    body_value,
                } => parent_child_mismatches.push(ParentChildMismatch {
                    identifier: section_id.clone(),
                    field: *field,
                    toc_value: toc_value.clone(),
                    body_value: body_value.clone(),
                }),
                _ => {}
            }
        }

        let mut toc_levels = LevelDistribution::default();
        for record in toc {
            match record.section_id.level() {
                1 => toc_levels.level_1 += 1,
                2 => toc_levels.level_2 += 1,
                _ => toc_levels.level_3_plus += 1,
            }
        }

        let coverage_ratio = alignment.coverage_ratio();
        Self {
            total_toc: alignment.common.len() + alignment.toc_only.len(),
            total_spec: alignment.common.len() + alignment.body_only.len(),
            common: alignment.common.len(),
            toc_only: alignment.toc_only.len(),
            spec_only: alignment.body_only.len(),
            coverage_percentage: coverage_ratio * 100.0,
            orphaned_sections: orphaned.into_iter().collect(),
            level_inconsistencies,
            parent_child_mismatches,
            toc_only_sections: unmatched(&alignment.toc_only, toc),
            spec_only_sections: unmatched(&alignment.body_only, body),
            toc_levels,
            structural_defects,
            coverage_ratio,
        }
    }

    #[must_use]
    /// Distinct identifiers in the table of contents.
    pub fn total_toc(&self) -> usize {
        self.total_toc
    }

    #[must_use]
    /// Distinct identifiers found by the body scan.
    pub fn total_body(&self) -> usize {
        self.total_spec
    }

    #[must_use]
    /// Identifiers present in both passes.
    pub fn common(&self) -> usize {
        self.common
    }

    #[must_use]
    /// Identifiers declared in the table of contents but never found in the body.
    pub fn toc_only(&self) -> usize {
        self.toc_only
    }

    #[must_use]
    /// Identifiers found in the body but not declared in the table of contents.
    pub fn body_only(&self) -> usize {
        self.spec_only
    }

    #[must_use]
    /// `common / total_toc`, 0 for an empty table of contents.
    pub fn coverage_ratio(&self) -> f64 {
        self.coverage_ratio
    }

    #[must_use]
    /// The coverage ratio as a percentage.
    pub fn coverage_percentage(&self) -> f64 {
        self.coverage_percentage
    }

    #[must_use]
    /// Records, from either pass, whose parent was never found.
    pub fn orphaned_sections(&self) -> &[SectionId] {
        &self.orphaned_sections
    }

    #[must_use]
    /// Records whose level disagrees with their identifier.
    pub fn level_inconsistencies(&self) -> &[LevelInconsistency] {
        &self.level_inconsistencies
    }

    #[must_use]
    /// Title and page drift between common sections.
    pub fn parent_child_mismatches(&self) -> &[ParentChildMismatch] {
        &self.parent_child_mismatches
    }

    #[must_use]
    /// Details of the table of contents entries missing from the body.
    pub fn toc_only_sections(&self) -> &[UnmatchedSection] {
        &self.toc_only_sections
    }

    #[must_use]
    /// Details of the body sections missing from the table of contents.
    pub fn body_only_sections(&self) -> &[UnmatchedSection] {
        &self.spec_only_sections
    }

    #[must_use]
    /// Depth profile of the table of contents.
    pub fn toc_levels(&self) -> LevelDistribution {
        self.toc_levels
    }

    #[must_use]
    /// Every defect from both passes and from reconciliation.
    pub fn structural_defects(&self) -> &[SourcedDefect] {
        &self.structural_defects
    }

    /// Emit the headline numbers through `tracing`.
    pub fn log_summary(&self) {
        info!(
            toc = self.total_toc,
            spec = self.total_spec,
            common = self.common,
            toc_only = self.toc_only,
            spec_only = self.spec_only,
            "coverage {:.1}%",
            self.coverage_percentage
        );
        if self.toc_only > 0 {
            warn!(
                "{} sections found in the table of contents but not in the body",
                self.toc_only
            );
        }
        if self.spec_only > 0 {
            warn!(
                "{} sections found in the body but not in the table of contents",
                self.spec_only
            );
        }
        if !self.structural_defects.is_empty() {
            warn!("{} structural defects recorded", self.structural_defects.len());
        }
    }
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
