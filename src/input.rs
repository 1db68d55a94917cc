//! Page text supplied by the text-extraction step.
//!
//! Extraction itself happens elsewhere; this module only accepts its output. On disk that output
//! is a plain text file with one page per form-feed-separated chunk (the layout `pdftotext`
//! produces). From it we locate the table of contents region and the document title, and flatten
//! pages into the `(page, line)` stream the classifier consumes.

use crate::error::ReconcileError;
use crate::formats::ID_PATTERN;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const PAGE_BREAK: char = '\x0c';

// How many leading lines of a page may carry a "Contents" banner.
const TOC_BANNER_LINES: usize = 5;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{ID_PATTERN}\s+")).expect("numbered line pattern compiles"));

#[derive(Clone, Debug, PartialEq, Eq)]
/// One line of extracted text and the 1-based page it was found on.
///
/// Only [`PageLine::new`] builds one, so the page is never 0.
pub struct PageLine {
    page: u32,
    text: String,
}

impl PageLine {
    /// Pair a line with its page.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::ZeroPage`] if `page` is 0.
    pub fn new(page: u32, text: impl Into<String>) -> Result<Self, ReconcileError> {
        let text = text.into();
        if page == 0 {
            return Err(ReconcileError::ZeroPage { line: text });
        }
        Ok(Self { page, text })
    }

    #[must_use]
    /// Page number, always at least 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    /// Raw line text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Split extracted text into pages on form feeds.
///
/// A trailing form feed does not start an extra empty page.
#[must_use]
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// Read a form-feed-separated page text file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_pages(path: &Path) -> Result<Vec<String>, ReconcileError> {
    let text = fs::read_to_string(path)?;
    Ok(split_pages(&text))
}

/// Flatten the given 1-based pages into a line stream, skipping blank lines.
///
/// Page numbers past the end of `pages` are ignored.
#[must_use]
pub fn page_lines(pages: &[String], page_numbers: impl IntoIterator<Item = usize>) -> Vec<PageLine> {
    let mut lines = Vec::new();
    for number in page_numbers {
        let Some(text) = number.checked_sub(1).and_then(|idx| pages.get(idx)) else {
            continue;
        };
        let Ok(page) = u32::try_from(number) else {
            continue;
        };
        lines.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| PageLine {
                    page,
                    text: line.to_string(),
                }),
        );
    }
    lines
}

/// Every line of every page, in reading order.
#[must_use]
pub fn all_lines(pages: &[String]) -> Vec<PageLine> {
    page_lines(pages, 1..=pages.len())
}

/// Find the pages that make up the table of contents.
///
/// Only the first `scan_pages` pages are considered. A page qualifies when one of its first few
/// non-empty lines mentions "contents", or when at least `min_numbered` of its lines start with a
/// dotted section identifier.
#[must_use]
pub fn detect_toc_pages(pages: &[String], scan_pages: usize, min_numbered: usize) -> Vec<usize> {
    pages
        .iter()
        .take(scan_pages)
        .enumerate()
        .filter(|(_, text)| {
            let lines: Vec<&str> = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            let has_banner = lines
                .iter()
                .take(TOC_BANNER_LINES)
                .any(|l| l.to_lowercase().contains("contents"));
            has_banner || lines.iter().filter(|l| NUMBERED_LINE.is_match(l)).count() >= min_numbered
        })
        .map(|(idx, _)| idx + 1)
        .collect()
}

/// Find the document title on the first `scan_pages` pages.
///
/// The title is the first line that contains every keyword, compared case-insensitively. With no
/// keywords there is nothing to look for and `None` is returned.
#[must_use]
pub fn detect_doc_title(pages: &[String], keywords: &[String], scan_pages: usize) -> Option<String> {
    if keywords.is_empty() {
        return None;
    }
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    pages
        .iter()
        .take(scan_pages)
        .flat_map(|page| page.lines())
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            keywords.iter().all(|k| lower.contains(k.as_str()))
        })
        .map(str::to_string)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
