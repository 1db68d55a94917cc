//! Heading surface forms recognised by the line classifier.
//!
//! Each form is an independent matcher for one way a heading can be laid out on a line of
//! extracted text. The classifier owns an ordered list of them and the first form that matches a
//! line wins, so every form can be tested in isolation and the priority order lives in one place.

pub mod bare;
pub mod dotted_leader;
pub mod spaced;
pub mod tabbed;

use crate::section::SectionId;

/// Pattern for a dotted identifier anchored at the start of a line.
pub(crate) const ID_PATTERN: &str = r"^\s*(\d+(?:\.\d+)*)";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A line recognised as a heading, before it is placed in a sequence.
pub struct Candidate {
    /// Parsed dotted identifier.
    pub section_id: SectionId,
    /// Trimmed heading text.
    pub title: String,
    /// Page the heading refers to or was found on.
    pub page: u32,
}

/// One way a heading can be laid out on a line.
pub trait HeadingForm: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;
    /// Match `line`, found on `source_page`, against this form.
    fn match_line(&self, line: &str, source_page: u32) -> Option<Candidate>;
}

/// Validate the captured pieces of a heading, rejecting anything that is not a real heading.
pub(crate) fn candidate(id: &str, title: &str, page: u32) -> Option<Candidate> {
    let section_id = id.parse::<SectionId>().ok()?;
    let title = title.trim();
    if page == 0 || title.chars().all(|c| c == '.' || c.is_whitespace()) {
        return None;
    }
    Some(Candidate {
        section_id,
        title: title.to_string(),
        page,
    })
}

/// Parse a trailing page token; zero and overflowing values are not pages.
pub(crate) fn page_number(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|&page| page >= 1)
}

#[cfg(test)]
#[path = "tests/formats.rs"]
mod tests;
