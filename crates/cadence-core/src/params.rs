//! Parameter structures for Cadence operations.
//!
//! These are the interface-neutral inputs of the [`crate::Scheduler`]
//! methods. Front ends (the `cad` CLI today) define their own argument types
//! with framework derives and convert into these.
//!
//! ```ignore
//! // In the CLI
//! #[derive(Args)]
//! pub struct OmitGoalArgs {
//!     pub id: u64,
//!     #[arg(long)]
//!     pub reason: String,
//! }
//!
//! impl From<OmitGoalArgs> for OmitGoal {
//!     fn from(args: OmitGoalArgs) -> Self {
//!         OmitGoal { goal_id: args.id, reason: args.reason }
//!     }
//! }
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{
    GoalFilter, GoalStatus, ImportGoal, NewGoal, PlanChanges, PlanFilter, PlanStatus,
    TaxonomyKind,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    /// Only plans of this student
    pub student_id: Option<String>,
    /// Only plans with this status
    pub status: Option<PlanStatus>,
}

impl From<&ListPlans> for PlanFilter {
    fn from(params: &ListPlans) -> Self {
        PlanFilter {
            student_id: params.student_id.clone(),
            status: params.status,
        }
    }
}

/// Parameters for editing a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub id: u64,
    #[serde(flatten)]
    pub changes: PlanChanges,
    /// First date redistribution may touch; today when omitted
    pub today: Option<Date>,
}

/// Parameters for a plan and one of its dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDate {
    pub plan_id: u64,
    pub date: Date,
}

/// Parameters for an advisory fit check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFit {
    pub plan_id: u64,
    pub date: Date,
    /// Candidate duration in minutes
    pub duration: u32,
}

/// Parameters for creating and placing a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceGoal {
    pub plan_id: u64,
    /// Requested date
    pub date: Date,
    /// Place on the requested date even when it is full
    #[serde(default)]
    pub force: bool,
    #[serde(flatten)]
    pub goal: NewGoal,
}

/// Parameters for moving a pending goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveGoal {
    pub goal_id: u64,
    pub date: Date,
    #[serde(default)]
    pub force: bool,
}

/// Parameters for completing a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteGoal {
    pub goal_id: u64,
    /// Time actually spent, in seconds
    pub actual_seconds: u32,
    /// Completion date; today when omitted
    pub completed_on: Option<Date>,
}

/// Parameters for omitting a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OmitGoal {
    pub goal_id: u64,
    /// Why the goal is skipped (required)
    pub reason: String,
}

/// Parameters for changing a goal's planned duration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeDuration {
    pub goal_id: u64,
    pub planned_minutes: u32,
}

/// Parameters for pinning or unpinning a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetFixed {
    pub goal_id: u64,
    pub fixed: bool,
}

/// Parameters for reordering the goals of a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderDay {
    pub plan_id: u64,
    pub date: Date,
    /// Every goal of the day, in the new order
    pub goal_ids: Vec<u64>,
}

/// Parameters for rebalancing a whole plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RebalancePlan {
    pub plan_id: u64,
    /// First date to rebalance; the plan start when omitted
    pub from: Option<Date>,
}

/// Parameters for a bulk import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportGoals {
    pub plan_id: u64,
    pub goals: Vec<ImportGoal>,
}

/// Parameters for listing a plan's goals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListGoals {
    pub plan_id: u64,
    pub from: Option<Date>,
    pub until: Option<Date>,
    pub status: Option<GoalStatus>,
    /// Only goals flagged for manual review
    #[serde(default)]
    pub flagged: bool,
}

impl From<&ListGoals> for GoalFilter {
    fn from(params: &ListGoals) -> Self {
        GoalFilter {
            from: params.from,
            until: params.until,
            status: params.status,
            flagged_only: params.flagged,
        }
    }
}

/// Parameters for adding a taxonomy node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaxonomyNode {
    pub kind: TaxonomyKind,
    pub name: String,
    pub parent_id: Option<u64>,
}
