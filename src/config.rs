//! Configuration to acknowledge per-project preferences as well as set defaults.
//!
//! Specifically, we try to find a tocsmith.toml, and if present we load settings from there.
//! This provides the fallback document title, title detection keywords and the limits used to
//! find the table of contents region.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// Run preferences loaded from tocsmith.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "Untitled Specification".to_string())]
    /// Title stamped on records when none is detected or given on the command line.
    pub doc_title: String,
    #[facet(default = Vec::new())]
    /// Words that must all appear in a line for it to be taken as the document title.
    pub title_keywords: Vec<String>,
    #[facet(default = 3)]
    /// Leading pages searched for the document title.
    pub title_scan_pages: usize,
    #[facet(default = 20)]
    /// Leading pages searched for the table of contents.
    pub toc_scan_pages: usize,
    #[facet(default = 3)]
    /// Numbered lines that mark a page as part of the table of contents without a banner.
    pub toc_min_numbered_lines: usize,
    #[facet(default = true)]
    /// Whether the body scan accepts `<id> <Title>` lines with no page number.
    pub body_bare_headings: bool,
    #[facet(default = "spec".to_string())]
    /// Prefix for the files written by `parse`.
    pub output_prefix: String,
}

impl Config {
    #[must_use]
    /// Load configuration from tocsmith.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("tocsmith.toml") {
            if let Some(config) = Self::parse(&contents) {
                return config;
            }
        }
        Self::parse("").unwrap()
    }

    #[must_use]
    /// Parse TOML settings, filling unset fields with defaults.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
