//! tocsmith: rebuild the section tree of a specification document and check it against itself.
//!
//! A document declares its structure twice: once in the table of contents and once through the
//! numbered headings in its body. Each is extracted independently from page text, turned into a
//! [`SectionSequence`](section::SectionSequence), validated, and finally reconciled into a
//! [`ReconciliationReport`](report::ReconciliationReport) that says how much of the declared
//! structure the body scan confirmed and what it could not make sense of.

pub mod builder;
pub mod classifier;
pub mod config;
pub mod coverage;
pub mod defect;
pub mod error;
pub mod formats;
pub mod hierarchy;
pub mod input;
pub mod jsonl;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod section;

pub use error::ReconcileError;
pub use pipeline::{DocumentInput, Engine, Reconciliation};
pub use report::ReconciliationReport;
pub use section::{Provenance, SectionId, SectionRecord, SectionSequence};
