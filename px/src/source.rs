//! Query façade consumed by the presentation layer
//!
//! [`Source`] owns only its configuration. Every call re-reads the proposals
//! directory, so concurrent callers never share mutable state and edits on
//! disk show up on the next query.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Category;
use crate::config::{CategoryConfig, Config};
use crate::document::Document;
use crate::index::{CorpusIndex, Stats};
use crate::loader::Loader;

/// Root of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTree {
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// Node of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Page {
        name: String,
        url: String,
    },
    Folder {
        name: String,
        description: String,
        children: Vec<TreeNode>,
    },
}

/// Read-only query surface over a proposals directory
#[derive(Debug, Clone)]
pub struct Source {
    config: Config,
}

impl Source {
    pub fn new(config: Config) -> Self {
        debug!(dir = ?config.proposals_dir, "Source::new: called");
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn short_name(&self) -> &str {
        &self.config.short_name
    }

    /// Fresh snapshot of the corpus, for callers that run several queries at once
    pub fn index(&self) -> CorpusIndex<'_> {
        CorpusIndex::load(&self.config)
    }

    /// All documents, ascending by number
    pub fn all(&self) -> Vec<Document> {
        self.index().into_documents()
    }

    /// Resolve a slug to its document, trying each configured extension in order
    pub fn get_by_path<S: AsRef<str>>(&self, slug: &[S]) -> Option<Document> {
        match Loader::new(&self.config).load_slug(slug) {
            Ok(doc) => Some(doc),
            Err(e) => {
                debug!(error = %e, "get_by_path: not found");
                None
            }
        }
    }

    /// Slugs of every proposal file, for static page generation
    pub fn slugs(&self) -> Vec<Vec<String>> {
        Loader::new(&self.config).slugs()
    }

    /// Case-insensitive substring filter over title, description, body and tags
    ///
    /// Results keep index order; there is no ranking. Minimum query length is
    /// the caller's concern (see [`crate::search::SearchEndpoint`]).
    pub fn search(&self, query: &str) -> Vec<Document> {
        debug!(%query, "search: called");
        let needle = query.to_lowercase();
        let results: Vec<Document> = self
            .index()
            .into_documents()
            .into_iter()
            .filter(|doc| doc.matches_query(&needle))
            .collect();
        debug!(%query, count = results.len(), "search: complete");
        results
    }

    pub fn stats(&self) -> Stats {
        self.index().stats()
    }

    pub fn all_tags(&self) -> Vec<String> {
        self.index().all_tags()
    }

    pub fn by_status(&self, status: &str) -> Vec<Document> {
        self.index().by_status(status).into_iter().cloned().collect()
    }

    pub fn by_type(&self, proposal_type: &str) -> Vec<Document> {
        self.index().by_type(proposal_type).into_iter().cloned().collect()
    }

    pub fn by_category_name(&self, name: &str) -> Vec<Document> {
        self.index().by_category_name(name).into_iter().cloned().collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<Document> {
        self.index().by_tag(tag).into_iter().cloned().collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<Document> {
        self.index().recent(limit).into_iter().cloned().collect()
    }

    pub fn categorize(&self) -> Vec<Category> {
        self.index().categorize()
    }

    pub fn categorize_all(&self) -> Vec<Category> {
        self.index().categorize_all()
    }

    pub fn categorized_non_empty(&self) -> Vec<Category> {
        self.index().categorized_non_empty()
    }

    /// Look up a category by its slug and attach its current documents
    pub fn category_by_slug(&self, slug: &str) -> Option<Category> {
        debug!(%slug, "category_by_slug: called");
        let cat = self.config.categories.iter().find(|c| c.slug == slug)?;
        Some(self.index().populate(cat))
    }

    /// Case-insensitive lookup of a category's configuration by display name
    pub fn category_by_name(&self, name: &str) -> Option<&CategoryConfig> {
        let name = name.to_lowercase();
        self.config.categories.iter().find(|c| c.name.to_lowercase() == name)
    }

    pub fn all_category_slugs(&self) -> Vec<String> {
        self.config.categories.iter().map(|c| c.slug.clone()).collect()
    }

    /// URL of a document page
    pub fn doc_url(&self, doc: &Document) -> String {
        format!("{}/{}", self.config.navigation.docs_url, doc.slug_path())
    }

    /// Sidebar projection: an overview page plus one folder per non-empty category
    pub fn navigation_tree(&self) -> PageTree {
        debug!("navigation_tree: called");
        let nav = &self.config.navigation;

        let mut children = vec![TreeNode::Page {
            name: "Overview".to_string(),
            url: nav.docs_url.clone(),
        }];

        for cat in self.categorized_non_empty() {
            let leaves = cat
                .documents
                .iter()
                .take(nav.max_leaves)
                .map(|doc| TreeNode::Page {
                    name: format!(
                        "{}-{}: {}",
                        self.config.short_name,
                        doc.display_number(),
                        truncate(&doc.title, nav.title_width)
                    ),
                    url: self.doc_url(doc),
                })
                .collect();

            children.push(TreeNode::Folder {
                name: cat.config.name,
                description: cat.config.short_desc,
                children: leaves,
            });
        }

        PageTree {
            name: self.config.name.clone(),
            children,
        }
    }
}

/// Cut to `width` characters, marking the cut with "..."
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
