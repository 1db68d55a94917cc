//! Line classification: deciding which raw text lines are section headings.
//!
//! The classifier tries its surface forms in a fixed priority order and the first match wins.
//! Lines that match nothing are simply not headings, so this layer never fails.

use crate::formats::bare::BareHeadingForm;
use crate::formats::dotted_leader::DottedLeaderForm;
use crate::formats::spaced::SpacedForm;
use crate::formats::tabbed::TabbedForm;
use crate::formats::{Candidate, HeadingForm};
use crate::input::PageLine;
use tracing::debug;

/// Ordered set of heading forms with first-match-wins semantics.
pub struct LineClassifier {
    forms: Vec<Box<dyn HeadingForm>>,
}

impl LineClassifier {
    #[must_use]
    /// Classifier for the table of contents region: dotted leader, simple spacing, tabs.
    pub fn toc() -> Self {
        Self {
            forms: vec![
                Box::new(DottedLeaderForm),
                Box::new(SpacedForm),
                Box::new(TabbedForm),
            ],
        }
    }

    #[must_use]
    /// Classifier for the body scan.
    ///
    /// The table of contents forms are tried first and keep the page printed at the end of the
    /// line. The bare `<id> <Title>` form can be enabled as a final fallback; it has no page of its
    /// own and takes the page the line was found on.
    pub fn body(bare_headings: bool) -> Self {
        let mut forms: Vec<Box<dyn HeadingForm>> = vec![
            Box::new(DottedLeaderForm),
            Box::new(SpacedForm),
            Box::new(TabbedForm),
        ];
        if bare_headings {
            forms.push(Box::new(BareHeadingForm));
        }
        Self { forms }
    }

    #[must_use]
    /// Names of the configured forms, in priority order.
    pub fn form_names(&self) -> Vec<&'static str> {
        self.forms.iter().map(|form| form.name()).collect()
    }

    #[must_use]
    /// Classify one line found on `source_page`.
    pub fn classify(&self, line: &str, source_page: u32) -> Option<Candidate> {
        let (form, hit) = self.forms.iter().find_map(|form| {
            form.match_line(line, source_page)
                .map(|hit| (form.name(), hit))
        })?;
        debug!(form, section = %hit.section_id, page = hit.page, "heading");
        Some(hit)
    }

    #[must_use]
    /// Classify an ordered stream of page lines, keeping only the headings.
    pub fn classify_all<'a, I>(&self, lines: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = &'a PageLine>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.classify(line.text(), line.page()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/classifier.rs"]
mod tests;
