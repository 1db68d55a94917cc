//! Structural defects: everything the engine noticed but could not reconcile.
//!
//! Defects are data, not errors. Builders, validators and the reconciler each append to their own
//! list and the report merges them at the end.

use crate::section::{Provenance, SectionId};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A record's position in a sequence, named by identifier and page.
pub struct PageRef {
    /// Identifier of the record.
    pub section_id: SectionId,
    /// Page the record starts on.
    pub page: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Which attribute of a common section differs between the two passes.
pub enum DriftField {
    /// Normalised titles differ.
    Title,
    /// Start pages differ.
    Page,
}

impl fmt::Display for DriftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DriftField::Title => "title",
            DriftField::Page => "page",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One structural finding.
pub enum Defect {
    /// The declared parent never appears in the sequence.
    Orphan {
        /// The record whose parent is missing.
        section_id: SectionId,
        /// The parent identifier that was not found.
        missing_parent: SectionId,
    },
    /// The stored level disagrees with the identifier's component count.
    LevelInconsistency {
        /// The offending record.
        section_id: SectionId,
        /// Component count of the identifier.
        expected_level: usize,
        /// Level stored on the record.
        actual_level: usize,
    },
    /// The stored parent is not the identifier minus its last component.
    ParentIdMismatch {
        /// The offending record.
        section_id: SectionId,
        /// Parent stored on the record.
        declared_parent: Option<SectionId>,
        /// Parent implied by the identifier.
        expected_parent: Option<SectionId>,
    },
    /// The parent exists but is not exactly one level shallower.
    ParentLevel {
        /// The child record.
        section_id: SectionId,
        /// Its parent.
        parent_id: SectionId,
        /// Level stored on the child.
        level: usize,
        /// Level stored on the parent.
        parent_level: usize,
    },
    /// Pages decrease from one record to the next.
    OrderError {
        /// The earlier record in document order.
        previous: PageRef,
        /// The record whose page went backwards.
        current: PageRef,
    },
    /// Consecutive siblings skip one or more numbers.
    NumberingGap {
        /// The sibling before the gap.
        previous: SectionId,
        /// The sibling after the gap.
        next: SectionId,
        /// Depth at which the gap occurs.
        depth: usize,
    },
    /// A repeated identifier that would not improve on the record already kept.
    DuplicateIdentifier {
        /// The repeated identifier.
        section_id: SectionId,
        /// Page of the retained first occurrence.
        kept_page: u32,
        /// Page of the discarded occurrence.
        discarded_page: u32,
    },
    /// A section found by both passes disagrees on title or page.
    ContentDrift {
        /// The common identifier.
        section_id: SectionId,
        /// Attribute that differs.
        field: DriftField,
        /// Value in the table of contents.
        toc_value: String,
        /// Value found in the body.
        body_value: String,
    },
}

impl Defect {
    #[must_use]
    /// The identifier the defect is primarily about.
    pub fn section_id(&self) -> &SectionId {
        match self {
            Defect::Orphan { section_id, .. }
            | Defect::LevelInconsistency { section_id, .. }
            | Defect::ParentIdMismatch { section_id, .. }
            | Defect::ParentLevel { section_id, .. }
            | Defect::DuplicateIdentifier { section_id, .. }
            | Defect::ContentDrift { section_id, .. } => section_id,
            Defect::OrderError { current, .. } => &current.section_id,
            Defect::NumberingGap { next, .. } => next,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// The stage that reported a defect.
pub enum DefectSource {
    /// Building or validating the table of contents sequence.
    Toc,
    /// Building or validating the body sequence.
    Body,
    /// Comparing the two sequences.
    Reconciliation,
}

impl From<Provenance> for DefectSource {
    fn from(provenance: Provenance) -> Self {
        match provenance {
            Provenance::Toc => DefectSource::Toc,
            Provenance::Body => DefectSource::Body,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A defect labelled with the stage it was found in.
pub struct SourcedDefect {
    /// Stage that produced the defect.
    pub source: DefectSource,
    /// The finding itself.
    #[serde(flatten)]
    pub defect: Defect,
}
