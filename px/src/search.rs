//! Search endpoint for interactive callers
//!
//! Wraps [`Source::search`] with the boundary rules: short queries return
//! nothing, results are capped, and each hit carries only what a result list
//! needs to display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Document, ProposalType, Status};
use crate::source::Source;

/// Display metadata attached to a search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredData {
    pub number: Option<u32>,
    pub status: Option<Status>,
    #[serde(rename = "type")]
    pub proposal_type: Option<ProposalType>,
    pub category: Option<String>,
}

/// One formatted search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Slug joined with '/'
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub title: String,
    pub description: String,
    /// Leading excerpt of the body
    pub content: String,
    #[serde(rename = "structuredData")]
    pub structured: StructuredData,
}

/// Query boundary used by search boxes and the `px search` command
pub struct SearchEndpoint<'a> {
    source: &'a Source,
}

impl<'a> SearchEndpoint<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self { source }
    }

    /// Run a query; too-short queries yield an empty list, not an error
    pub fn query(&self, query: &str) -> Vec<SearchResult> {
        let limits = &self.source.config().search;
        if query.chars().count() < limits.min_query_len {
            debug!(%query, min = limits.min_query_len, "SearchEndpoint::query: query too short");
            return Vec::new();
        }

        self.source
            .search(query)
            .iter()
            .take(limits.max_results)
            .map(|doc| self.format(doc))
            .collect()
    }

    fn format(&self, doc: &Document) -> SearchResult {
        let excerpt: String = doc.content.chars().take(self.source.config().search.excerpt_len).collect();
        SearchResult {
            id: doc.slug_path(),
            kind: "page".to_string(),
            url: self.source.doc_url(doc),
            title: doc.title.clone(),
            description: doc.description.clone().unwrap_or_default(),
            content: format!("{}...", excerpt),
            structured: StructuredData {
                number: doc.number(),
                status: doc.metadata.status.clone(),
                proposal_type: doc.metadata.proposal_type.clone(),
                category: doc.metadata.category.clone(),
            },
        }
    }
}
