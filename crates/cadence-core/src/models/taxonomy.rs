//! Subject taxonomy references.
//!
//! The taxonomy itself is owned by the surrounding application; goals only
//! point into it and the engine reads node names for review guidance.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Level of a taxonomy node. Subjects hang off disciplines, topics off
/// subjects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Discipline,
    Subject,
    Topic,
}

impl TaxonomyKind {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKind::Discipline => "discipline",
            TaxonomyKind::Subject => "subject",
            TaxonomyKind::Topic => "topic",
        }
    }

    /// The kind a node of this kind must hang off, if any.
    pub fn parent_kind(&self) -> Option<TaxonomyKind> {
        match self {
            TaxonomyKind::Discipline => None,
            TaxonomyKind::Subject => Some(TaxonomyKind::Discipline),
            TaxonomyKind::Topic => Some(TaxonomyKind::Subject),
        }
    }
}

impl FromStr for TaxonomyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discipline" => Ok(TaxonomyKind::Discipline),
            "subject" => Ok(TaxonomyKind::Subject),
            "topic" => Ok(TaxonomyKind::Topic),
            _ => Err(format!("Invalid taxonomy kind: {s}")),
        }
    }
}

/// A single node of the subject taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxonomyNode {
    pub id: u64,
    pub kind: TaxonomyKind,
    pub name: String,
    pub parent_id: Option<u64>,
}

/// Where in the taxonomy a goal sits. Topic is optional.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaxonomyRef {
    pub discipline_id: u64,
    pub subject_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<u64>,
}
