//! Tab-separated entries: `2.1.2<TAB>Title<TAB>53`.

use crate::formats::{candidate, page_number, Candidate, HeadingForm, ID_PATTERN};
use regex::Regex;
use std::sync::LazyLock;

static TABBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{ID_PATTERN} *\t+([^\t]+)\t+ *(\d+)[ \t]*$"))
        .expect("tabbed heading pattern compiles")
});

/// Three fields divided by literal tab characters.
pub struct TabbedForm;

impl HeadingForm for TabbedForm {
    fn name(&self) -> &'static str {
        "tab-separated"
    }

    fn match_line(&self, line: &str, _source_page: u32) -> Option<Candidate> {
        let caps = TABBED.captures(line)?;
        candidate(&caps[1], &caps[2], page_number(&caps[3])?)
    }
}
