//! Proposal document types
//!
//! A [`Document`] is one proposal file: its slug, title, body and the typed
//! [`Metadata`] parsed from its front matter. Documents are plain values; they
//! are rebuilt from disk on every query and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::toc::{Heading, extract_headings};

/// Lifecycle status of a proposal
///
/// Values outside the known set are kept verbatim in [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Draft,
    Review,
    LastCall,
    Final,
    Withdrawn,
    Stagnant,
    Superseded,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Review => "Review",
            Self::LastCall => "Last Call",
            Self::Final => "Final",
            Self::Withdrawn => "Withdrawn",
            Self::Stagnant => "Stagnant",
            Self::Superseded => "Superseded",
            Self::Other(s) => s,
        }
    }

    /// Case-insensitive comparison against a status name
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().to_lowercase() == name.to_lowercase()
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Draft" => Self::Draft,
            "Review" => Self::Review,
            "Last Call" => Self::LastCall,
            "Final" => Self::Final,
            "Withdrawn" => Self::Withdrawn,
            "Stagnant" => Self::Stagnant,
            "Superseded" => Self::Superseded,
            _ => Self::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Proposal type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProposalType {
    StandardsTrack,
    Meta,
    Informational,
    Other(String),
}

impl ProposalType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StandardsTrack => "Standards Track",
            Self::Meta => "Meta",
            Self::Informational => "Informational",
            Self::Other(s) => s,
        }
    }

    /// Case-insensitive comparison against a type name
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().to_lowercase() == name.to_lowercase()
    }
}

impl From<String> for ProposalType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Standards Track" => Self::StandardsTrack,
            "Meta" => Self::Meta,
            "Informational" => Self::Informational,
            _ => Self::Other(s),
        }
    }
}

impl From<ProposalType> for String {
    fn from(kind: ProposalType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed front matter of a proposal
///
/// Known keys are lifted into fields; everything else is kept verbatim in
/// `extra` so new metadata fields survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Resolved proposal number; `None` when neither front matter nor filename yields one
    pub number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub proposal_type: Option<ProposalType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Creation date as `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Last update as `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Numbers of the proposals this one depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(rename = "discussions-to", default, skip_serializing_if = "Option::is_none")]
    pub discussions_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces: Option<String>,

    #[serde(rename = "superseded-by", default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,

    /// Unrecognized keys, preserved as written
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Metadata {
    /// Status as a stats bucket: the literal value, or "Unknown" when missing
    pub fn status_label(&self) -> &str {
        self.status.as_ref().map(Status::as_str).unwrap_or(crate::UNKNOWN_LABEL)
    }

    /// Type as a stats bucket: the literal value, or "Unknown" when missing
    pub fn type_label(&self) -> &str {
        self.proposal_type
            .as_ref()
            .map(ProposalType::as_str)
            .unwrap_or(crate::UNKNOWN_LABEL)
    }

    /// Case-insensitive exact tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// One parsed proposal file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Path segments identifying the document (filename without extension)
    pub slug: Vec<String>,

    /// Front-matter title, or the filename stem when absent
    pub title: String,

    pub description: Option<String>,

    /// Body text after the front matter
    pub content: String,

    pub metadata: Metadata,
}

impl Document {
    /// Resolved proposal number, if any
    pub fn number(&self) -> Option<u32> {
        self.metadata.number
    }

    /// Proposal number with unresolved documents mapped to the sentinel
    pub fn display_number(&self) -> u32 {
        self.metadata.number.unwrap_or(crate::UNKNOWN_NUMBER)
    }

    /// Ordering key: resolved numbers ascending, unresolved after all of them
    pub fn sort_key(&self) -> (bool, u32) {
        match self.metadata.number {
            Some(n) => (false, n),
            None => (true, crate::UNKNOWN_NUMBER),
        }
    }

    /// Slug joined with '/'
    pub fn slug_path(&self) -> String {
        self.slug.join("/")
    }

    /// Section headings of the body, for a table of contents
    pub fn headings(&self) -> Vec<Heading> {
        extract_headings(&self.content)
    }

    /// Case-insensitive substring match over title, description, body and tags
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.metadata.tags.join(" ").to_lowercase().contains(needle)
    }
}
