//! Table-of-contents extraction from markdown bodies

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.+)$").expect("valid heading regex"));
static NON_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid anchor regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid dash regex"));

/// A section heading (levels 2-4)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub title: String,
    /// In-page anchor, e.g. "#security-considerations"
    pub url: String,
    pub depth: usize,
}

/// Extract `##`..`####` headings in document order
pub fn extract_headings(content: &str) -> Vec<Heading> {
    content
        .lines()
        .filter_map(|line| {
            let caps = HEADING.captures(line)?;
            let title = caps[2].trim().to_string();
            Some(Heading {
                url: format!("#{}", anchor(&title)),
                depth: caps[1].len(),
                title,
            })
        })
        .collect()
}

fn anchor(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = NON_ANCHOR.replace_all(&lower, "");
    let dashed = WHITESPACE.replace_all(&stripped, "-");
    DASHES.replace_all(&dashed, "-").into_owned()
}
