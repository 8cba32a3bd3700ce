//! Proposal index configuration types and loading
//!
//! A deployment (LPs, HIPs, ZIPs, ...) is described entirely by a [`Config`]
//! value: where the proposal files live, how they are named, and which numeric
//! ranges map to which thematic categories.
//!
//! ```yaml
//! name: Lux Proposals
//! short-name: LP
//! proposals-dir: ../LPs
//! file-prefix: lp-
//! categories:
//!   - slug: core
//!     name: Core Architecture
//!     short-desc: Network fundamentals
//!     range: [0, 99]
//! ```

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Main proposal index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Full collection name (e.g. "Lux Proposals")
    pub name: String,

    /// Short name (e.g. "LP"); lower-cased it is the identifier key in front matter
    pub short_name: String,

    /// Page title for the collection
    pub title: String,

    /// One-line description of the collection
    pub description: String,

    /// Public URL of the rendered portal
    pub base_url: String,

    /// Source repository URL
    pub repo_url: String,

    /// Directory containing the proposal files
    pub proposals_dir: PathBuf,

    /// Filename prefix every proposal file starts with (e.g. "lp-")
    pub file_prefix: String,

    /// Accepted extensions, in lookup order, without the leading dot
    pub extensions: Vec<String>,

    /// Numeric-range categories
    pub categories: Vec<CategoryConfig>,

    /// Search endpoint limits
    pub search: SearchConfig,

    /// Navigation tree projection
    pub navigation: NavigationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Improvement Proposals".to_string(),
            short_name: "RFC".to_string(),
            title: "Improvement Proposals".to_string(),
            description: String::new(),
            base_url: String::new(),
            repo_url: String::new(),
            proposals_dir: PathBuf::from("rfcs"),
            file_prefix: "rfc-".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            categories: Vec::new(),
            search: SearchConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .proposals.yml
        let local_config = PathBuf::from(".proposals.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/proposal-index/proposals.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("proposal-index").join("proposals.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate configuration before use
    ///
    /// Overlapping category ranges are allowed; a document in the overlap shows
    /// up in every matching category.
    pub fn validate(&self) -> Result<()> {
        if self.short_name.trim().is_empty() {
            return Err(eyre::eyre!("short-name must not be empty"));
        }

        if self.extensions.is_empty() {
            return Err(eyre::eyre!("At least one file extension must be configured"));
        }

        let mut slugs = HashSet::new();
        for cat in &self.categories {
            if cat.low() > cat.high() {
                return Err(eyre::eyre!(
                    "Category '{}' has an inverted range [{}, {}]",
                    cat.slug,
                    cat.low(),
                    cat.high()
                ));
            }
            if !slugs.insert(cat.slug.as_str()) {
                return Err(eyre::eyre!("Duplicate category slug: {}", cat.slug));
            }
        }

        for (i, a) in self.categories.iter().enumerate() {
            for b in &self.categories[i + 1..] {
                if a.low() <= b.high() && b.low() <= a.high() {
                    tracing::debug!(first = %a.slug, second = %b.slug, "Config::validate: overlapping category ranges");
                }
            }
        }

        Ok(())
    }

    /// Front-matter key holding the proposal number (e.g. "lp")
    pub fn short_name_key(&self) -> String {
        self.short_name.to_lowercase()
    }

    /// Check whether a filename has one of the configured extensions
    pub fn has_extension(&self, filename: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| filename.len() > ext.len() + 1 && filename.ends_with(&format!(".{}", ext)))
    }

    /// Strip a configured extension from a filename, if present
    pub fn strip_extension<'a>(&self, filename: &'a str) -> &'a str {
        for ext in &self.extensions {
            if let Some(stem) = filename.strip_suffix(ext.as_str()).and_then(|s| s.strip_suffix('.')) {
                return stem;
            }
        }
        filename
    }
}

/// A numeric range of proposals grouped under one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryConfig {
    /// URL-safe identifier (e.g. "core")
    pub slug: String,

    /// Display name
    pub name: String,

    /// Short description used in navigation
    #[serde(default)]
    pub short_desc: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Inclusive [low, high] range of proposal numbers
    pub range: [u32; 2],

    /// Icon hint for the presentation layer
    #[serde(default)]
    pub icon: String,

    /// Color hint for the presentation layer
    #[serde(default)]
    pub color: String,

    /// Optional external link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learn_more: Option<String>,

    /// Topics covered by this category
    #[serde(default)]
    pub key_topics: Vec<String>,
}

impl CategoryConfig {
    pub fn low(&self) -> u32 {
        self.range[0]
    }

    pub fn high(&self) -> u32 {
        self.range[1]
    }

    /// Inclusive range membership
    pub fn contains(&self, number: u32) -> bool {
        number >= self.low() && number <= self.high()
    }
}

/// Limits applied by the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Queries shorter than this (in characters) return no results
    pub min_query_len: usize,

    /// Maximum results returned per query
    pub max_results: usize,

    /// Characters of body content included in each result
    pub excerpt_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: crate::MIN_QUERY_LEN,
            max_results: crate::MAX_SEARCH_RESULTS,
            excerpt_len: crate::EXCERPT_LEN,
        }
    }
}

/// Shape of the navigation tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationConfig {
    /// Maximum leaf entries per category folder
    pub max_leaves: usize,

    /// Titles longer than this (in characters) are truncated with "..."
    pub title_width: usize,

    /// URL of the docs root; document URLs hang off it
    pub docs_url: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_leaves: 20,
            title_width: 40,
            docs_url: "/docs".to_string(),
        }
    }
}
