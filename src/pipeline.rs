//! End-to-end reconciliation run.
//!
//! Classification, building and validation happen twice, once for the table of contents region and
//! once for the whole body. The two passes share nothing, so they run on separate rayon workers and
//! only meet again in the coverage reconciler.

use crate::builder::build_sequence;
use crate::classifier::LineClassifier;
use crate::coverage;
use crate::defect::Defect;
use crate::error::ReconcileError;
use crate::hierarchy;
use crate::input::PageLine;
use crate::report::ReconciliationReport;
use crate::section::{Provenance, SectionRecord, SectionSequence};
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Text for both passes, as delivered by the extraction step.
pub struct DocumentInput {
    /// Lines from the declared table of contents region.
    pub toc: Vec<PageLine>,
    /// Every line of the document, in reading order.
    pub body: Vec<PageLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The sequence produced by one pass and everything found wrong with it.
pub struct PassOutcome {
    /// Records in document order.
    pub sequence: SectionSequence,
    /// Duplicate defects from building followed by validator defects.
    pub defects: Vec<Defect>,
}

impl PassOutcome {
    #[must_use]
    /// Validate an already-built sequence, keeping defects found while building it.
    pub fn validated(sequence: SectionSequence, mut defects: Vec<Defect>) -> Self {
        defects.extend(hierarchy::validate(&sequence));
        Self { sequence, defects }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Result of a full run: both sequences and the report comparing them.
pub struct Reconciliation {
    /// Sequence parsed from the table of contents.
    pub toc: SectionSequence,
    /// Sequence found by scanning the body.
    pub body: SectionSequence,
    /// Coverage and defect report.
    pub report: ReconciliationReport,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Run settings shared by both passes.
pub struct Engine {
    /// Title stamped on every record.
    pub doc_title: String,
    /// Whether the body scan accepts headings without a trailing page number.
    pub body_bare_headings: bool,
}

impl Engine {
    #[must_use]
    /// An engine stamping records with `doc_title` and accepting bare body headings.
    pub fn new(doc_title: impl Into<String>) -> Self {
        Self {
            doc_title: doc_title.into(),
            body_bare_headings: true,
        }
    }

    #[must_use]
    /// Run one pass: classify, build and validate.
    pub fn run_pass(&self, provenance: Provenance, lines: &[PageLine]) -> PassOutcome {
        let classifier = match provenance {
            Provenance::Toc => LineClassifier::toc(),
            Provenance::Body => LineClassifier::body(self.body_bare_headings),
        };
        let candidates = classifier.classify_all(lines);
        let (sequence, defects) = build_sequence(provenance, &self.doc_title, candidates);
        let outcome = PassOutcome::validated(sequence, defects);
        info!(
            %provenance,
            lines = lines.len(),
            sections = outcome.sequence.len(),
            defects = outcome.defects.len(),
            "pass complete"
        );
        outcome
    }

    /// Run both passes in parallel and reconcile them.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::EmptyInput`] if either pass has no lines at all.
    pub fn run(&self, input: &DocumentInput) -> Result<Reconciliation, ReconcileError> {
        ensure_input(Provenance::Toc, !input.toc.is_empty())?;
        ensure_input(Provenance::Body, !input.body.is_empty())?;

        let (toc, body) = rayon::join(
            || self.run_pass(Provenance::Toc, &input.toc),
            || self.run_pass(Provenance::Body, &input.body),
        );
        Ok(finish(toc, body))
    }
}

fn ensure_input(provenance: Provenance, present: bool) -> Result<(), ReconcileError> {
    if present {
        Ok(())
    } else {
        Err(ReconcileError::EmptyInput { provenance })
    }
}

fn finish(toc: PassOutcome, body: PassOutcome) -> Reconciliation {
    let report = coverage::reconcile(&toc.sequence, &toc.defects, &body.sequence, &body.defects);
    report.log_summary();
    Reconciliation {
        toc: toc.sequence,
        body: body.sequence,
        report,
    }
}

/// Reconcile records read back from previously written JSONL files.
///
/// Stored levels and parents are taken as they are, so the validator can catch files that were
/// edited or produced by another tool.
///
/// # Errors
///
/// Returns [`ReconcileError::EmptyInput`] if either file held no records.
pub fn reconcile_records(
    toc: Vec<SectionRecord>,
    body: Vec<SectionRecord>,
) -> Result<Reconciliation, ReconcileError> {
    ensure_input(Provenance::Toc, !toc.is_empty())?;
    ensure_input(Provenance::Body, !body.is_empty())?;

    let toc = PassOutcome::validated(SectionSequence::from_records(Provenance::Toc, toc), Vec::new());
    let body =
        PassOutcome::validated(SectionSequence::from_records(Provenance::Body, body), Vec::new());
    Ok(finish(toc, body))
}

#[cfg(test)]
#[path = "tests/pipeline.rs"]
mod tests;
