//! Goal model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{GoalStatus, GoalType, TaxonomyRef};
use crate::engine::numbering::GoalNumber;

/// Whether a goal was authored or generated from a completed study goal.
///
/// Review chains are one level deep: a generated review never originates
/// further reviews.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    /// Authored by a person or imported
    Origin,
    /// Generated review of the goal `parent_id`
    GeneratedReview { parent_id: u64 },
}

/// A single schedulable unit of study, practice, or review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier for the goal
    pub id: u64,

    /// ID of the owning plan
    pub plan_id: u64,

    /// Authored or generated
    #[serde(flatten)]
    pub kind: GoalKind,

    /// Study, practice questions, or review
    pub goal_type: GoalType,

    /// Lifecycle state
    pub status: GoalStatus,

    /// Discipline/subject/topic this goal covers
    pub taxonomy: TaxonomyRef,

    /// Calendar day the goal is scheduled on
    pub scheduled_date: Date,

    /// 1-based position among the goals of the same day
    pub position: u32,

    /// Planned duration in minutes
    pub planned_minutes: u32,

    /// Time actually spent, recorded on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_seconds: Option<u32>,

    /// Day the goal was completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<Date>,

    /// Free-text study guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,

    /// Exempt from automatic redistribution
    #[serde(default)]
    pub fixed: bool,

    /// Left on an overbooked day because no room was found in the horizon
    #[serde(default)]
    pub needs_review: bool,

    /// Why the goal was omitted (set only when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omission_reason: Option<String>,

    /// Fingerprint of discipline, subject, topic, type and duration
    pub content_hash: String,

    /// Stable number assigned at creation
    pub number: GoalNumber,

    /// Timestamp when the goal was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the goal was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Goal {
    /// True for generated reviews.
    pub fn auto_generated(&self) -> bool {
        matches!(self.kind, GoalKind::GeneratedReview { .. })
    }

    /// The origin goal of a generated review.
    pub fn parent_id(&self) -> Option<u64> {
        match self.kind {
            GoalKind::GeneratedReview { parent_id } => Some(parent_id),
            GoalKind::Origin => None,
        }
    }

    /// Mirrors the `Omitted` status.
    pub fn is_omitted(&self) -> bool {
        self.status == GoalStatus::Omitted
    }

    /// Display number such as `#007` or `#007.2`.
    pub fn display_number(&self) -> String {
        self.number.display_number()
    }

    /// Plan-wide sortable key.
    pub fn order_key(&self) -> String {
        self.number.order_key()
    }

    /// Minutes this goal takes out of its day's capacity.
    ///
    /// Pending goals count their planned duration, done goals their actual
    /// duration rounded up to whole minutes, omitted goals nothing.
    pub fn consumed_minutes(&self) -> u32 {
        match self.status {
            GoalStatus::Pending => self.planned_minutes,
            GoalStatus::Done => self
                .actual_seconds
                .map_or(self.planned_minutes, |secs| secs.div_ceil(60)),
            GoalStatus::Omitted => 0,
        }
    }

    /// Whether a completed goal of this kind spawns a review chain.
    pub fn spawns_reviews(&self) -> bool {
        self.goal_type == GoalType::Study && self.kind == GoalKind::Origin
    }
}
