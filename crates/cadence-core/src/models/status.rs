//! Status and type enumerations for plans and goals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan is being followed and accepts new goals
    #[default]
    Active,

    /// Plan is on hold; its goals stay where they are
    Paused,

    /// Plan has finished
    Completed,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "paused" => Ok(PlanStatus::Paused),
            "completed" => Ok(PlanStatus::Completed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Paused => "paused",
            PlanStatus::Completed => "completed",
        }
    }
}

/// Lifecycle state of a goal. `Done` and `Omitted` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Scheduled and waiting to be studied
    #[default]
    Pending,

    /// Studied; actual duration recorded
    Done,

    /// Skipped with a recorded reason
    Omitted,
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(GoalStatus::Pending),
            "done" => Ok(GoalStatus::Done),
            "omitted" => Ok(GoalStatus::Omitted),
            _ => Err(format!("Invalid goal status: {s}")),
        }
    }
}

impl GoalStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "pending",
            GoalStatus::Done => "done",
            GoalStatus::Omitted => "omitted",
        }
    }

    /// Whether the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GoalStatus::Pending)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use cadence_core::models::GoalStatus;
    ///
    /// assert_eq!(GoalStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(GoalStatus::Omitted.with_icon(), "✗ Omitted");
    /// assert_eq!(GoalStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            GoalStatus::Done => "✓ Done",
            GoalStatus::Omitted => "✗ Omitted",
            GoalStatus::Pending => "○ Pending",
        }
    }
}

/// What kind of work a goal asks for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Study new material; completing one spawns a review chain
    Study,

    /// Work through practice questions
    PracticeQuestions,

    /// Revisit previously studied material
    Review,
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "study" => Ok(GoalType::Study),
            "practice_questions" | "practice-questions" | "practice" => {
                Ok(GoalType::PracticeQuestions)
            }
            "review" => Ok(GoalType::Review),
            _ => Err(format!("Invalid goal type: {s}")),
        }
    }
}

impl GoalType {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Study => "study",
            GoalType::PracticeQuestions => "practice_questions",
            GoalType::Review => "review",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Study => "Study",
            GoalType::PracticeQuestions => "Practice questions",
            GoalType::Review => "Review",
        }
    }
}
