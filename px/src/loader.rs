//! Proposal file discovery and parsing
//!
//! Files are discovered in the configured directory (non-recursive), filtered
//! by extension and filename prefix, then split into a YAML front-matter block
//! and a markdown body:
//!
//! ```text
//! ---
//! lp: 42
//! title: Quantum-safe signatures
//! status: Draft
//! created: 2024-01-15
//! ---
//! ## Abstract
//! ...
//! ```
//!
//! A bad file never aborts a batch: [`Loader::load_all`] logs the failure once
//! and moves on to the next file.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::document::{Document, Metadata, ProposalType, Status};
use crate::error::LoadError;

static TRAILING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*$").expect("valid number regex"));

/// Key reserved for the resolved proposal number in serialized metadata
const NUMBER_KEY: &str = "number";

const DELIMITER: &str = "---";

/// Reads proposal files from the configured directory
pub struct Loader<'a> {
    config: &'a Config,

    /// `<prefix>(\d+)`, used when front matter carries no number
    filename_number: Option<Regex>,
}

impl<'a> Loader<'a> {
    /// Create a loader for the given configuration
    pub fn new(config: &'a Config) -> Self {
        debug!(dir = ?config.proposals_dir, prefix = %config.file_prefix, "Loader::new: called");
        let pattern = format!("{}(\\d+)", regex::escape(&config.file_prefix));
        let filename_number = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(%pattern, error = %e, "Failed to build filename number pattern");
                None
            }
        };
        Self { config, filename_number }
    }

    /// Directory proposals are read from
    pub fn dir(&self) -> &Path {
        &self.config.proposals_dir
    }

    /// List proposal filenames in discovery order
    ///
    /// Discovery order is filename order. An unreadable directory is logged and
    /// treated as an empty corpus.
    pub fn discover(&self) -> Vec<String> {
        debug!(dir = ?self.dir(), "discover: called");
        let mut files = Vec::new();

        let walker = WalkDir::new(self.dir())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    error!(dir = ?self.dir(), error = %e, "Error reading proposals directory");
                    return Vec::new();
                }
                Err(e) => {
                    debug!(error = %e, "discover: skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                debug!(path = ?entry.path(), "discover: skipping non-UTF-8 filename");
                continue;
            };

            if self.config.has_extension(name) && name.starts_with(&self.config.file_prefix) {
                files.push(name.to_string());
            }
        }

        debug!(count = files.len(), "discover: complete");
        files
    }

    /// Slugs of every discovered file, without parsing any of them
    pub fn slugs(&self) -> Vec<Vec<String>> {
        self.discover().iter().map(|name| self.slug_for(name)).collect()
    }

    /// Load and parse every discovered file, skipping failures
    pub fn load_all(&self) -> Vec<Document> {
        debug!("load_all: called");
        let files = self.discover();
        let mut documents = Vec::with_capacity(files.len());
        let mut failed = 0usize;

        for filename in &files {
            match self.load(filename) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    failed += 1;
                    warn!(%filename, error = %e, cause = ?std::error::Error::source(&e), "Failed to load proposal file");
                }
            }
        }

        info!(loaded = documents.len(), failed, "Loaded proposals");
        documents
    }

    /// Load one file, by name relative to the proposals directory
    pub fn load(&self, filename: &str) -> Result<Document, LoadError> {
        debug!(%filename, "load: called");
        let path = self.dir().join(filename);
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        self.parse(filename, &text).map_err(|e| e.with_path(path))
    }

    /// Load the file a slug points at, trying each configured extension in order
    pub fn load_slug<S: AsRef<str>>(&self, slug: &[S]) -> Result<Document, LoadError> {
        let joined = slug.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join("/");
        debug!(slug = %joined, "load_slug: called");

        let valid = !slug.is_empty()
            && slug.iter().all(|seg| {
                let seg = seg.as_ref();
                !seg.is_empty() && seg != "." && seg != ".." && !seg.contains(['/', '\\'])
            });
        if !valid {
            return Err(LoadError::InvalidSlug { slug: joined });
        }

        let mut last_err = None;
        for ext in &self.config.extensions {
            let filename = format!("{}.{}", joined, ext);
            match self.load(&filename) {
                Ok(doc) => return Ok(doc),
                Err(e) => {
                    if !e.is_not_found() {
                        warn!(%filename, error = %e, "Failed to load proposal file");
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or(LoadError::InvalidSlug { slug: joined }))
    }

    /// Parse file text into a document; `filename` supplies slug and fallbacks
    pub fn parse(&self, filename: &str, text: &str) -> Result<Document, LoadError> {
        let path = PathBuf::from(filename);
        let (header, body) = split_front_matter(text).ok_or_else(|| LoadError::UnterminatedFrontMatter {
            path: path.clone(),
        })?;

        let mapping = match header {
            Some(header) => parse_header(header, &path)?,
            None => Mapping::new(),
        };

        let mut fields = BTreeMap::new();
        for (key, value) in mapping {
            let Some(key) = key_string(&key) else {
                debug!(?key, "parse: skipping unsupported front-matter key");
                continue;
            };
            fields.insert(key, normalize_dates(value));
        }

        let number = self.resolve_number(filename, &fields);
        let metadata = build_metadata(filename, &self.config.short_name_key(), number, fields);
        let stem = self.config.strip_extension(filename);

        Ok(Document {
            slug: self.slug_for(filename),
            title: metadata.title.clone().unwrap_or_else(|| stem.to_string()),
            description: metadata.description.clone(),
            content: body.to_string(),
            metadata,
        })
    }

    /// Resolve the proposal number: short-name key, then `rfc`, then filename
    fn resolve_number(&self, filename: &str, fields: &BTreeMap<String, Value>) -> Option<u32> {
        let key = self.config.short_name_key();
        if let Some(n) = fields.get(&key).and_then(number_value) {
            return Some(n);
        }
        if let Some(n) = fields.get("rfc").and_then(number_value) {
            return Some(n);
        }
        let from_filename = self
            .filename_number
            .as_ref()
            .and_then(|re| re.captures(filename))
            .and_then(|caps| caps[1].parse().ok());
        if from_filename.is_none() {
            debug!(%filename, "resolve_number: no proposal number found");
        }
        from_filename
    }

    fn slug_for(&self, filename: &str) -> Vec<String> {
        self.config
            .strip_extension(filename)
            .split('/')
            .map(str::to_string)
            .collect()
    }
}

impl LoadError {
    fn with_path(self, path: PathBuf) -> Self {
        match self {
            Self::FrontMatter { source, .. } => Self::FrontMatter { path, source },
            Self::UnterminatedFrontMatter { .. } => Self::UnterminatedFrontMatter { path },
            Self::NotAMapping { .. } => Self::NotAMapping { path },
            other => other,
        }
    }
}

/// Split text into an optional front-matter header and the body
///
/// Returns `None` when an opening delimiter is never closed.
pub fn split_front_matter(text: &str) -> Option<(Option<&str>, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Some((None, text));
    };
    if first.trim_end() != DELIMITER {
        return Some((None, text));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Some((Some(header), body));
        }
        offset += line.len();
    }

    None
}

fn parse_header(header: &str, path: &Path) -> Result<Mapping, LoadError> {
    if header.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(header).map_err(|source| LoadError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Rewrite date and timestamp strings as `YYYY-MM-DD`; other values pass through
pub fn normalize_dates(value: Value) -> Value {
    match value {
        Value::String(s) => match parse_date(&s) {
            Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            None => Value::String(s),
        },
        other => other,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Cheap reject before trying the formats
    if s.len() < 10 || !s.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc().date());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    None
}

fn number_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A string value that is not blank; blank values count as missing
fn text_value(value: Value) -> Option<String> {
    string_value(value).filter(|s| !s.trim().is_empty())
}

fn string_list(value: Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.into_iter().filter_map(string_value).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        other => string_value(other).into_iter().collect(),
    }
}

/// Number of a proposal reference: `12`, `"12"`, `LP-12` or `lp-12`
fn reference_number(value: &Value) -> Option<u32> {
    number_value(value).or_else(|| match value {
        Value::String(s) => TRAILING_NUMBER.captures(s).and_then(|caps| caps[1].parse().ok()),
        _ => None,
    })
}

fn reference_in(part: &str) -> Option<u32> {
    reference_number(&Value::String(part.to_string()))
}

/// Parse `requires` references; the flag is false when any entry had no number
fn number_list(value: &Value) -> (Vec<u32>, bool) {
    let parts: Vec<Option<u32>> = match value {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items.iter().map(reference_number).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(reference_in)
            .collect(),
        other => vec![reference_number(other)],
    };
    let complete = parts.iter().all(Option::is_some);
    (parts.into_iter().flatten().collect(), complete)
}

/// Lift known keys out of the raw front matter; the rest lands in `extra`
fn build_metadata(
    filename: &str,
    number_key: &str,
    number: Option<u32>,
    mut fields: BTreeMap<String, Value>,
) -> Metadata {
    // The canonical key is re-synthesized from the resolved number
    fields.remove(number_key);
    if let Some(raw) = fields.remove(NUMBER_KEY) {
        warn!(%filename, ?raw, "Ignoring front-matter key reserved for the resolved number");
    }

    let mut take = |key: &str| fields.remove(key);

    let title = take("title").and_then(text_value);
    let description = take("description").and_then(text_value);
    let status = take("status").and_then(text_value).map(Status::from);
    let proposal_type = take("type").and_then(text_value).map(ProposalType::from);
    let category = take("category").and_then(text_value);
    let author = take("author").map(string_list).filter(|a| !a.is_empty()).map(|a| a.join(", "));
    let created = take("created").and_then(string_value);
    let updated = take("updated").and_then(string_value);
    let raw_requires = take("requires");
    let tags = take("tags").map(string_list).unwrap_or_default();
    let discussions_to = take("discussions-to").and_then(string_value);
    let replaces = take("replaces").and_then(string_value);
    let superseded_by = take("superseded-by").and_then(string_value);

    // Unparseable references stay in `extra` verbatim
    let requires = match raw_requires {
        Some(raw) => {
            let (requires, complete) = number_list(&raw);
            if !complete {
                debug!(%filename, ?raw, "build_metadata: keeping unparsed requires");
                fields.insert("requires".to_string(), raw);
            }
            requires
        }
        None => Vec::new(),
    };

    Metadata {
        number,
        title,
        description,
        status,
        proposal_type,
        category,
        author,
        created,
        updated,
        requires,
        tags,
        discussions_to,
        replaces,
        superseded_by,
        extra: fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &Path) -> Config {
        Config {
            short_name: "LP".to_string(),
            file_prefix: "lp-".to_string(),
            proposals_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_front_matter() {
        let (header, body) = split_front_matter("---\ntitle: X\n---\nBody\n").unwrap();
        assert_eq!(header, Some("title: X\n"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let (header, body) = split_front_matter("# Just text\n").unwrap();
        assert!(header.is_none());
        assert_eq!(body, "# Just text\n");
    }

    #[test]
    fn test_split_unterminated() {
        assert!(split_front_matter("---\ntitle: X\nno end\n").is_none());
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let (header, body) = split_front_matter("\u{feff}---\r\nlp: 3\r\n---\r\nBody").unwrap();
        assert_eq!(header, Some("lp: 3\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_normalize_dates() {
        let d = |s: &str| normalize_dates(Value::String(s.to_string()));
        assert_eq!(d("2024-01-15"), Value::String("2024-01-15".to_string()));
        assert_eq!(d("2024-01-15T10:30:00Z"), Value::String("2024-01-15".to_string()));
        assert_eq!(d("2024-01-15 10:30:00"), Value::String("2024-01-15".to_string()));
        assert_eq!(d("Draft"), Value::String("Draft".to_string()));
        assert_eq!(d("2024-13-45"), Value::String("2024-13-45".to_string()));
        assert_eq!(normalize_dates(Value::Bool(true)), Value::Bool(true));
    }

    #[test]
    fn test_parse_full_front_matter() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let text = r#"---
lp: 42
title: Quantum-safe signatures
description: ML-DSA for validators
status: Last Call
type: Standards Track
category: Core
author: [Alice, Bob]
created: 2024-01-15
updated: 2024-02-01T08:00:00Z
requires: [1, 7]
tags: [crypto, pq]
discussions-to: https://forum.example/42
license: CC0
---
## Abstract
Signatures.
"#;
        let doc = loader.parse("lp-42.md", text).unwrap();

        assert_eq!(doc.slug, vec!["lp-42"]);
        assert_eq!(doc.number(), Some(42));
        assert_eq!(doc.title, "Quantum-safe signatures");
        assert_eq!(doc.description.as_deref(), Some("ML-DSA for validators"));
        assert_eq!(doc.content, "## Abstract\nSignatures.\n");
        assert_eq!(doc.metadata.status, Some(Status::LastCall));
        assert_eq!(doc.metadata.proposal_type, Some(ProposalType::StandardsTrack));
        assert_eq!(doc.metadata.author.as_deref(), Some("Alice, Bob"));
        assert_eq!(doc.metadata.created.as_deref(), Some("2024-01-15"));
        assert_eq!(doc.metadata.updated.as_deref(), Some("2024-02-01"));
        assert_eq!(doc.metadata.requires, vec![1, 7]);
        assert_eq!(doc.metadata.tags, vec!["crypto", "pq"]);
        assert_eq!(doc.metadata.discussions_to.as_deref(), Some("https://forum.example/42"));
        assert_eq!(doc.metadata.extra.get("license"), Some(&Value::String("CC0".to_string())));
        assert!(!doc.metadata.extra.contains_key("lp"));
    }

    #[test]
    fn test_number_precedence() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        // Short-name key beats rfc and filename
        let doc = loader.parse("lp-1.md", "---\nlp: 10\nrfc: 20\n---\n").unwrap();
        assert_eq!(doc.number(), Some(10));

        // rfc beats filename
        let doc = loader.parse("lp-1.md", "---\nrfc: 20\n---\n").unwrap();
        assert_eq!(doc.number(), Some(20));
        assert_eq!(doc.metadata.extra.get("rfc"), Some(&Value::Number(20u64.into())));

        // Filename as last resort
        let doc = loader.parse("lp-0300.md", "---\ntitle: T\n---\n").unwrap();
        assert_eq!(doc.number(), Some(300));

        // Numeric strings are accepted
        let doc = loader.parse("lp-1.md", "---\nlp: \"77\"\n---\n").unwrap();
        assert_eq!(doc.number(), Some(77));

        // Unusable value falls through to the filename
        let doc = loader.parse("lp-5.md", "---\nlp: soon\n---\n").unwrap();
        assert_eq!(doc.number(), Some(5));
    }

    #[test]
    fn test_unresolved_number() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let doc = loader.parse("lp-draft.md", "No front matter here.").unwrap();
        assert_eq!(doc.number(), None);
        assert_eq!(doc.display_number(), crate::UNKNOWN_NUMBER);
        assert_eq!(doc.title, "lp-draft");
        assert_eq!(doc.content, "No front matter here.");
    }

    #[test]
    fn test_parse_failures() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let err = loader.parse("lp-1.md", "---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, LoadError::FrontMatter { .. }));

        let err = loader.parse("lp-1.md", "---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, LoadError::NotAMapping { .. }));

        let err = loader.parse("lp-1.md", "---\ntitle: x\n").unwrap_err();
        assert!(matches!(err, LoadError::UnterminatedFrontMatter { .. }));
    }

    #[test]
    fn test_empty_front_matter() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let doc = loader.parse("lp-9.md", "---\n---\nBody").unwrap();
        assert_eq!(doc.number(), Some(9));
        assert_eq!(doc.content, "Body");
    }

    #[test]
    fn test_tags_and_requires_shapes() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let doc = loader
            .parse("lp-2.md", "---\ntags: evm, bridge\nrequires: \"1, 4, x\"\n---\n")
            .unwrap();
        assert_eq!(doc.metadata.tags, vec!["evm", "bridge"]);
        assert_eq!(doc.metadata.requires, vec![1, 4]);
        assert_eq!(
            doc.metadata.extra.get("requires"),
            Some(&Value::String("1, 4, x".to_string()))
        );

        let doc = loader.parse("lp-2.md", "---\nrequires: 3\n---\n").unwrap();
        assert_eq!(doc.metadata.requires, vec![3]);
    }

    #[test]
    fn test_requires_accepts_prefixed_references() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let doc = loader.parse("lp-3.md", "---\nrequires: [LP-1, LP-2]\n---\n").unwrap();
        assert_eq!(doc.metadata.requires, vec![1, 2]);
        assert!(!doc.metadata.extra.contains_key("requires"));

        let doc = loader.parse("lp-4.md", "---\nrequires: lp-12\n---\n").unwrap();
        assert_eq!(doc.metadata.requires, vec![12]);
        assert!(!doc.metadata.extra.contains_key("requires"));

        let doc = loader.parse("lp-5.md", "---\nrequires: [LP-1, tbd]\n---\n").unwrap();
        assert_eq!(doc.metadata.requires, vec![1]);
        assert!(doc.metadata.extra.contains_key("requires"));
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let text = "---\ntitle: \"\"\ndescription: \"  \"\nstatus: \"\"\ntype: \"\"\ncategory: \"\"\n---\n";
        let doc = loader.parse("lp-1.md", text).unwrap();

        assert_eq!(doc.title, "lp-1");
        assert_eq!(doc.description, None);
        assert_eq!(doc.metadata.status, None);
        assert_eq!(doc.metadata.proposal_type, None);
        assert_eq!(doc.metadata.category, None);
        assert_eq!(doc.metadata.status_label(), "Unknown");
        assert_eq!(doc.metadata.type_label(), "Unknown");
    }

    #[test]
    fn test_number_key_is_reserved() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let doc = loader.parse("lp-7.md", "---\nnumber: draft-a\n---\n").unwrap();
        assert_eq!(doc.number(), Some(7));
        assert!(!doc.metadata.extra.contains_key("number"));

        let json = serde_json::to_string(&doc.metadata).unwrap();
        assert_eq!(json.matches("\"number\"").count(), 1);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["number"], 7);
    }

    #[test]
    fn test_discover_filters_prefix_and_extension() {
        let temp = TempDir::new().unwrap();
        for name in ["lp-2.md", "lp-1.mdx", "lp-3.txt", "README.md", "hip-4.md"] {
            fs::write(temp.path().join(name), "---\n---\n").unwrap();
        }
        fs::create_dir(temp.path().join("lp-dir.md")).unwrap();

        let config = config(temp.path());
        let loader = Loader::new(&config);

        assert_eq!(loader.discover(), vec!["lp-1.mdx", "lp-2.md"]);
        assert_eq!(loader.slugs(), vec![vec!["lp-1".to_string()], vec!["lp-2".to_string()]]);
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp.path().join("does-not-exist"));
        let loader = Loader::new(&config);

        assert!(loader.discover().is_empty());
        assert!(loader.load_all().is_empty());
    }

    #[test]
    fn test_load_all_skips_bad_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lp-1.md"), "---\ntitle: Good\n---\n").unwrap();
        fs::write(temp.path().join("lp-2.md"), "---\ntitle: [broken\n---\n").unwrap();
        fs::write(temp.path().join("lp-3.md"), "---\ntitle: Also good\n---\n").unwrap();

        let config = config(temp.path());
        let loader = Loader::new(&config);
        let docs = loader.load_all();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "Good");
        assert_eq!(docs[1].title, "Also good");
    }

    #[test]
    fn test_load_slug_extension_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lp-5.md"), "---\ntitle: Markdown\n---\n").unwrap();
        fs::write(temp.path().join("lp-5.mdx"), "---\ntitle: MDX\n---\n").unwrap();
        fs::write(temp.path().join("lp-6.mdx"), "---\ntitle: Only MDX\n---\n").unwrap();

        let config = config(temp.path());
        let loader = Loader::new(&config);

        assert_eq!(loader.load_slug(&["lp-5"]).unwrap().title, "Markdown");
        assert_eq!(loader.load_slug(&["lp-6"]).unwrap().title, "Only MDX");
        assert!(loader.load_slug(&["lp-7"]).unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_slug_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let loader = Loader::new(&config);

        let empty: [&str; 0] = [];
        assert!(matches!(loader.load_slug(&empty), Err(LoadError::InvalidSlug { .. })));
        assert!(matches!(loader.load_slug(&["..", "secret"]), Err(LoadError::InvalidSlug { .. })));
        assert!(matches!(loader.load_slug(&["a/b"]), Err(LoadError::InvalidSlug { .. })));
    }

    #[test]
    fn test_load_error_carries_full_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lp-1.md"), "---\nopen: true\n").unwrap();

        let config = config(temp.path());
        let loader = Loader::new(&config);

        match loader.load("lp-1.md").unwrap_err() {
            LoadError::UnterminatedFrontMatter { path } => assert_eq!(path, temp.path().join("lp-1.md")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
