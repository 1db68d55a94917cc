//! Section representation for headings recovered from specification text.
//!
//! A section is identified by a dotted numeric identifier such as `2.1.2`. The identifier alone
//! fixes the section's depth and its parent, so [`SectionRecord::new`] derives `level`,
//! `parent_id` and `full_path` from it rather than accepting them from callers. Records read back
//! from JSONL keep whatever values the file holds, which is why the hierarchy validator still
//! re-checks them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid section identifier {0:?}")]
/// Rejection of text that is not a dotted sequence of positive integers.
pub struct InvalidSectionId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Dotted numeric section identifier, e.g. `2.1.2`.
///
/// Ordering is component-wise, so `1 < 1.1 < 1.2 < 1.10 < 2`.
pub struct SectionId(Vec<u32>);

impl SectionId {
    #[must_use]
    /// Components from outermost to innermost.
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    /// Nesting depth, which is the number of components (1 for top-level sections).
    pub fn level(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    /// The identifier with its last component removed, or `None` at depth 1.
    pub fn parent(&self) -> Option<SectionId> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(SectionId(rest.to_vec())),
            _ => None,
        }
    }

    #[must_use]
    /// Innermost component, used to detect numbering gaps between siblings.
    pub fn last(&self) -> u32 {
        self.0.last().copied().unwrap_or_default()
    }
}

impl FromStr for SectionId {
    type Err = InvalidSectionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSectionId(s.to_string());
        let components = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                match part.parse::<u32>() {
                    Ok(0) | Err(_) => Err(invalid()),
                    Ok(n) => Ok(n),
                }
            })
            .collect::<Result<Vec<u32>, _>>()?;
        Ok(SectionId(components))
    }
}

impl TryFrom<String> for SectionId {
    type Error = InvalidSectionId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which pass over the document produced a sequence.
pub enum Provenance {
    /// Parsed from the declared table of contents.
    Toc,
    /// Derived by scanning the whole document body for headings.
    Body,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provenance::Toc => "toc",
            Provenance::Body => "body",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One recognised section, serialised as one JSONL line in document order.
pub struct SectionRecord {
    /// Title of the document this section belongs to, constant across a sequence.
    pub doc_title: String,
    /// Dotted identifier, unique within a sequence.
    pub section_id: SectionId,
    /// Heading text with the numbering stripped.
    pub title: String,
    /// 1-based page where the section starts.
    pub page: u32,
    /// Nesting depth (1 for top-level).
    pub level: usize,
    /// Identifier of the containing section, absent at depth 1.
    pub parent_id: Option<SectionId>,
    /// `"{section_id} {title}"`.
    pub full_path: String,
    /// Labels from an external tagging step, passed through untouched.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SectionRecord {
    #[must_use]
    /// Build a record whose derived fields all agree with `section_id`.
    pub fn new(section_id: SectionId, title: &str, page: u32, doc_title: &str) -> Self {
        let title = title.trim().to_string();
        Self {
            doc_title: doc_title.to_string(),
            level: section_id.level(),
            parent_id: section_id.parent(),
            full_path: format!("{section_id} {title}"),
            section_id,
            title,
            page,
            tags: Vec::new(),
        }
    }

    #[must_use]
    /// Attach tags supplied by an external tagging collaborator.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Ordered list of records from a single pass.
///
/// Sequences are never merged; reconciliation reads two of them side by side.
pub struct SectionSequence {
    provenance: Provenance,
    records: Vec<SectionRecord>,
}

impl SectionSequence {
    #[must_use]
    /// Wrap records that are already in document order.
    pub fn from_records(provenance: Provenance, records: Vec<SectionRecord>) -> Self {
        Self {
            provenance,
            records,
        }
    }

    #[must_use]
    /// The pass that produced this sequence.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    #[must_use]
    /// Records in document order.
    pub fn records(&self) -> &[SectionRecord] {
        &self.records
    }

    #[must_use]
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    /// Whether the pass recognised no sections at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, SectionRecord> {
        self.records.iter()
    }

    #[must_use]
    /// Look up a record by identifier.
    pub fn get(&self, id: &SectionId) -> Option<&SectionRecord> {
        self.records.iter().find(|r| &r.section_id == id)
    }
}

impl<'a> IntoIterator for &'a SectionSequence {
    type Item = &'a SectionRecord;
    type IntoIter = std::slice::Iter<'a, SectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
