//! Entries separated by plain spaces: `2.1.2 Title 53`.

use crate::formats::{candidate, page_number, Candidate, HeadingForm, ID_PATTERN};
use regex::Regex;
use std::sync::LazyLock;

// Separators are literal spaces so tab-separated lines fall through to the tabbed form.
static SPACED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ID_PATTERN} +([^\t]*[^\s]) +(\d+) *$"))
        .expect("spaced heading pattern compiles")
});

/// Identifier, title, and the page as the last space-delimited token.
pub struct SpacedForm;

impl HeadingForm for SpacedForm {
    fn name(&self) -> &'static str {
        "simple-spacing"
    }

    fn match_line(&self, line: &str, _source_page: u32) -> Option<Candidate> {
        let caps = SPACED.captures(line)?;
        candidate(&caps[1], &caps[2], page_number(&caps[3])?)
    }
}
