//! Table of contents entries with a dotted leader: `2.1.2 Title ........ 53`.

use crate::formats::{candidate, page_number, Candidate, HeadingForm, ID_PATTERN};
use regex::Regex;
use std::sync::LazyLock;

// The lazy title stops at the first leader run that reaches the page number, so the whole run
// is consumed as leader and never leaks into the title.
static DOTTED_LEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ID_PATTERN}\s+(.+?)\s*\.(?:\s*\.){{2,}}\s*(\d+)\s*$"))
        .expect("dotted leader pattern compiles")
});

/// Identifier, title, a run of three or more periods, then the page number.
pub struct DottedLeaderForm;

impl HeadingForm for DottedLeaderForm {
    fn name(&self) -> &'static str {
        "dotted-leader"
    }

    fn match_line(&self, line: &str, _source_page: u32) -> Option<Candidate> {
        let caps = DOTTED_LEADER.captures(line)?;
        candidate(&caps[1], &caps[2], page_number(&caps[3])?)
    }
}
