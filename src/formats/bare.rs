//! Headings as they appear in the document body: `2.1.2 Title`, with no page reference.
//!
//! A body heading sits on the page where its section starts, so the page comes from the line's
//! location rather than from the text. Requiring a capitalised title keeps numbered list items
//! and wrapped sentences that start with a number from being read as headings.

use crate::formats::{candidate, Candidate, HeadingForm, ID_PATTERN};
use regex::Regex;
use std::sync::LazyLock;

static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ID_PATTERN}\s+(\p{{Lu}}.*)$")).expect("bare heading pattern compiles")
});

/// Identifier followed by a title starting with an uppercase letter.
pub struct BareHeadingForm;

impl HeadingForm for BareHeadingForm {
    fn name(&self) -> &'static str {
        "bare-heading"
    }

    fn match_line(&self, line: &str, source_page: u32) -> Option<Candidate> {
        let caps = BARE.captures(line)?;
        candidate(&caps[1], &caps[2], source_page)
    }
}
