//! ProposalIndex - indexing and query layer for improvement proposals
//!
//! Loads a directory of numbered proposal files (`lp-42.md`, `hip-7.mdx`, ...)
//! with YAML front matter, sorts them by proposal number, groups them into
//! numeric-range categories and answers filter and search queries for a
//! documentation portal.
//!
//! # Architecture
//!
//! ```text
//! proposals dir ──> Loader ──> CorpusIndex ──> Source ──> presentation layer
//!                  (parse)    (sort/filter/     (façade)
//!                              categorize)
//! ```
//!
//! Nothing is cached between calls: every [`Source`] query re-reads the
//! directory, so the façade is safe to share across concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! use proposal_index::{Config, SearchEndpoint, Source};
//!
//! let source = Source::new(Config::load(None)?);
//! let stats = source.stats();
//! let doc = source.get_by_path(&["lp-42"]);
//! let hits = SearchEndpoint::new(&source).query("consensus");
//! ```

pub mod category;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod loader;
pub mod search;
pub mod source;
pub mod toc;

pub use category::{Category, CategoryStats};
pub use config::{CategoryConfig, Config, NavigationConfig, SearchConfig};
pub use document::{Document, Metadata, ProposalType, Status};
pub use error::LoadError;
pub use index::{CorpusIndex, DocumentFilter, Stats};
pub use loader::Loader;
pub use search::{SearchEndpoint, SearchResult, StructuredData};
pub use source::{PageTree, Source, TreeNode};
pub use toc::{Heading, extract_headings};

/// Sentinel number shown for proposals whose number cannot be resolved
pub const UNKNOWN_NUMBER: u32 = 9999;

/// Stats bucket for a missing status or type
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Shortest query the search endpoint answers
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum hits returned by the search endpoint
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Body characters included in a search hit
pub const EXCERPT_LEN: usize = 200;
