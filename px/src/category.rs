//! Categories populated with their matching documents

use serde::{Deserialize, Serialize};

use crate::config::CategoryConfig;
use crate::document::{Document, Status};

/// A configured category together with the documents in its range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub config: CategoryConfig,

    /// Matching documents in index order
    pub documents: Vec<Document>,
}

impl Category {
    pub fn slug(&self) -> &str {
        &self.config.slug
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Status breakdown of the category's documents
    pub fn stats(&self) -> CategoryStats {
        let mut stats = CategoryStats {
            total: self.documents.len(),
            ..Default::default()
        };
        for doc in &self.documents {
            match doc.metadata.status {
                Some(Status::Final) => stats.final_count += 1,
                Some(Status::Review) => stats.review += 1,
                Some(Status::Draft) => stats.draft += 1,
                _ => stats.other += 1,
            }
        }
        stats
    }
}

/// Per-category counts for summary displays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    #[serde(rename = "final")]
    pub final_count: usize,
    pub review: usize,
    pub draft: usize,
    /// Everything that is not Final, Review or Draft, including missing status
    pub other: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Metadata;

    fn doc(number: u32, status: Option<Status>) -> Document {
        Document {
            slug: vec![format!("lp-{}", number)],
            title: format!("LP {}", number),
            description: None,
            content: String::new(),
            metadata: Metadata {
                number: Some(number),
                status,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_category_stats() {
        let category = Category {
            config: CategoryConfig {
                slug: "core".to_string(),
                name: "Core".to_string(),
                short_desc: String::new(),
                description: String::new(),
                range: [0, 99],
                icon: String::new(),
                color: String::new(),
                learn_more: None,
                key_topics: Vec::new(),
            },
            documents: vec![
                doc(1, Some(Status::Final)),
                doc(2, Some(Status::Final)),
                doc(3, Some(Status::Draft)),
                doc(4, Some(Status::Review)),
                doc(5, Some(Status::Withdrawn)),
                doc(6, None),
            ],
        };

        let stats = category.stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.final_count, 2);
        assert_eq!(stats.draft, 1);
        assert_eq!(stats.review, 1);
        assert_eq!(stats.other, 2);
        assert_eq!(category.slug(), "core");
        assert!(!category.is_empty());
    }
}
