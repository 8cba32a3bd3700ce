//! In-memory corpus index
//!
//! A [`CorpusIndex`] is a snapshot of the proposals directory taken at
//! construction. It is cheap to throw away: the façade builds a fresh one for
//! every query, so nothing here needs invalidation or locking.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::category::Category;
use crate::config::{CategoryConfig, Config};
use crate::document::Document;
use crate::loader::Loader;

/// Aggregate counts over the corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    /// Keyed by literal status; missing status counts under "Unknown"
    pub by_status: BTreeMap<String, usize>,
    /// Keyed by literal type; missing type counts under "Unknown"
    pub by_type: BTreeMap<String, usize>,
}

/// Conjunction of optional case-insensitive exact-match criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub status: Option<String>,
    pub proposal_type: Option<String>,
    /// Free-text `category` front-matter field
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl DocumentFilter {
    pub fn matches(&self, doc: &Document) -> bool {
        let meta = &doc.metadata;
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|s| meta.status.as_ref().is_some_and(|v| v.matches(s)));
        let type_ok = self
            .proposal_type
            .as_deref()
            .is_none_or(|t| meta.proposal_type.as_ref().is_some_and(|v| v.matches(t)));
        let category_ok = self.category.as_deref().is_none_or(|c| {
            meta.category
                .as_ref()
                .is_some_and(|v| v.to_lowercase() == c.to_lowercase())
        });
        let tag_ok = self.tag.as_deref().is_none_or(|t| meta.has_tag(t));
        status_ok && type_ok && category_ok && tag_ok
    }
}

/// Sorted snapshot of every loadable proposal
pub struct CorpusIndex<'a> {
    config: &'a Config,
    documents: Vec<Document>,
}

impl<'a> CorpusIndex<'a> {
    /// Read the proposals directory and build an index
    pub fn load(config: &'a Config) -> Self {
        debug!("CorpusIndex::load: called");
        let documents = Loader::new(config).load_all();
        Self::from_documents(config, documents)
    }

    /// Build an index from already-parsed documents (given in discovery order)
    pub fn from_documents(config: &'a Config, mut documents: Vec<Document>) -> Self {
        // Stable: equal numbers keep discovery order
        documents.sort_by_key(Document::sort_key);
        debug!(count = documents.len(), "CorpusIndex::from_documents: sorted");
        Self { config, documents }
    }

    /// All documents, ascending by number, unresolved numbers last
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    /// Documents matching every criterion of `filter`, in index order
    pub fn matching(&self, filter: &DocumentFilter) -> Vec<&Document> {
        debug!(?filter, "matching: called");
        self.filter(|doc| filter.matches(doc))
    }

    pub fn by_status(&self, status: &str) -> Vec<&Document> {
        self.matching(&DocumentFilter {
            status: Some(status.to_string()),
            ..Default::default()
        })
    }

    pub fn by_type(&self, proposal_type: &str) -> Vec<&Document> {
        self.matching(&DocumentFilter {
            proposal_type: Some(proposal_type.to_string()),
            ..Default::default()
        })
    }

    /// Filter on the free-text `category` front-matter field (not the numeric ranges)
    pub fn by_category_name(&self, name: &str) -> Vec<&Document> {
        self.matching(&DocumentFilter {
            category: Some(name.to_string()),
            ..Default::default()
        })
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Document> {
        self.matching(&DocumentFilter {
            tag: Some(tag.to_string()),
            ..Default::default()
        })
    }

    fn filter(&self, pred: impl Fn(&Document) -> bool) -> Vec<&Document> {
        self.documents.iter().filter(|doc| pred(doc)).collect()
    }

    /// Documents whose number falls in the category's range
    ///
    /// Unresolved numbers never match.
    pub fn in_range(&self, category: &CategoryConfig) -> Vec<&Document> {
        self.filter(|doc| doc.number().is_some_and(|n| category.contains(n)))
    }

    /// Populate one configured category
    pub fn populate(&self, category: &CategoryConfig) -> Category {
        Category {
            config: category.clone(),
            documents: self.in_range(category).into_iter().cloned().collect(),
        }
    }

    /// Every configured category with its documents, in configuration order
    ///
    /// Ranges are not required to be disjoint; a document in an overlap appears
    /// in each matching category.
    pub fn categorize(&self) -> Vec<Category> {
        debug!(categories = self.config.categories.len(), "categorize: called");
        self.config.categories.iter().map(|cat| self.populate(cat)).collect()
    }

    /// Same as [`categorize`](Self::categorize), including empty categories
    pub fn categorize_all(&self) -> Vec<Category> {
        self.categorize()
    }

    /// Categories with at least one document
    pub fn categorized_non_empty(&self) -> Vec<Category> {
        self.categorize().into_iter().filter(|cat| !cat.is_empty()).collect()
    }

    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            total: self.documents.len(),
            ..Default::default()
        };
        for doc in &self.documents {
            *stats
                .by_status
                .entry(doc.metadata.status_label().to_string())
                .or_default() += 1;
            *stats.by_type.entry(doc.metadata.type_label().to_string()).or_default() += 1;
        }
        debug!(total = stats.total, "stats: complete");
        stats
    }

    /// Every tag in use, case preserved, de-duplicated and sorted
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .documents
            .iter()
            .flat_map(|doc| doc.metadata.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_string).collect()
    }

    /// Newest documents by `created` date; undated documents are skipped
    pub fn recent(&self, limit: usize) -> Vec<&Document> {
        let mut dated: Vec<&Document> = self.filter(|doc| doc.metadata.created.is_some());
        // Normalized dates sort correctly as strings; stable sort keeps index order on ties
        dated.sort_by(|a, b| b.metadata.created.cmp(&a.metadata.created));
        dated.truncate(limit);
        dated
    }
}
