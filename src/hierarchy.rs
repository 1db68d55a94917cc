//! Structural validation of a completed section sequence.
//!
//! Validation is a read-only pass: it never edits records and never stops early. However
//! malformed the input, the caller gets back the full list of defects for the sequence.

use crate::defect::{Defect, PageRef};
use crate::section::{SectionId, SectionRecord, SectionSequence};
use serde::Serialize;
use std::collections::HashMap;

/// Check a sequence for orphans, level and parent inconsistencies, page order and numbering gaps.
///
/// Record-level findings come first, in document order, followed by numbering gaps.
#[must_use]
pub fn validate(sequence: &SectionSequence) -> Vec<Defect> {
    let lookup: HashMap<&SectionId, &SectionRecord> =
        sequence.iter().map(|r| (&r.section_id, r)).collect();

    let mut defects = Vec::new();
    let mut previous: Option<&SectionRecord> = None;

    for record in sequence {
        check_parentage(record, &lookup, &mut defects);

        let expected_level = record.section_id.level();
        if record.level != expected_level {
            defects.push(Defect::LevelInconsistency {
                section_id: record.section_id.clone(),
                expected_level,
                actual_level: record.level,
            });
        }

        if let Some(prev) = previous {
            if record.page < prev.page {
                defects.push(Defect::OrderError {
                    previous: PageRef {
                        section_id: prev.section_id.clone(),
                        page: prev.page,
                    },
                    current: PageRef {
                        section_id: record.section_id.clone(),
                        page: record.page,
                    },
                });
            }
        }
        previous = Some(record);
    }

    defects.extend(numbering_gaps(sequence));
    defects
}

fn check_parentage(
    record: &SectionRecord,
    lookup: &HashMap<&SectionId, &SectionRecord>,
    defects: &mut Vec<Defect>,
) {
    let expected_parent = record.section_id.parent();
    if record.parent_id != expected_parent {
        defects.push(Defect::ParentIdMismatch {
            section_id: record.section_id.clone(),
            declared_parent: record.parent_id.clone(),
            expected_parent,
        });
    }

    let Some(parent_id) = &record.parent_id else {
        return;
    };
    match lookup.get(parent_id) {
        None => defects.push(Defect::Orphan {
            section_id: record.section_id.clone(),
            missing_parent: parent_id.clone(),
        }),
        Some(parent) if parent.level + 1 != record.level => defects.push(Defect::ParentLevel {
            section_id: record.section_id.clone(),
            parent_id: parent_id.clone(),
            level: record.level,
            parent_level: parent.level,
        }),
        Some(_) => {}
    }
}

/// Forward jumps of more than one between consecutive siblings.
///
/// Siblings share the parent implied by their identifiers; descendants listed between two
/// siblings do not separate them. A sibling numbered lower than its predecessor is a renumbering
/// rather than a gap and is left alone.
fn numbering_gaps(sequence: &SectionSequence) -> Vec<Defect> {
    let mut last_child: HashMap<Option<SectionId>, &SectionId> = HashMap::new();
    let mut gaps = Vec::new();

    for record in sequence {
        let id = &record.section_id;
        if let Some(prev) = last_child.insert(id.parent(), id) {
            if id.last() > prev.last().saturating_add(1) {
                gaps.push(Defect::NumberingGap {
                    previous: prev.clone(),
                    next: id.clone(),
                    depth: id.level(),
                });
            }
        }
    }
    gaps
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Per-sequence hierarchy findings in the shape of the validation summary.
pub struct HierarchySummary {
    /// Number of records examined.
    pub total_sections: usize,
    /// Records whose parent is missing.
    pub orphaned_sections: usize,
    /// Records whose level disagrees with their identifier.
    pub level_inconsistencies: usize,
    /// Records whose parent is not one level shallower, or whose stored parent is wrong.
    pub parent_child_mismatches: usize,
    /// Every defect found.
    pub defects: Vec<Defect>,
}

impl HierarchySummary {
    #[must_use]
    /// Validate `sequence` and tally the findings.
    pub fn of(sequence: &SectionSequence) -> Self {
        let defects = validate(sequence);
        let count = |pred: fn(&Defect) -> bool| defects.iter().filter(|d| pred(d)).count();
        Self {
            total_sections: sequence.len(),
            orphaned_sections: count(|d| matches!(d, Defect::Orphan { .. })),
            level_inconsistencies: count(|d| matches!(d, Defect::LevelInconsistency { .. })),
            parent_child_mismatches: count(|d| {
                matches!(
                    d,
                    Defect::ParentLevel { .. } | Defect::ParentIdMismatch { .. }
                )
            }),
            defects,
        }
    }
}

#[cfg(test)]
#[path = "tests/hierarchy.rs"]
mod tests;
