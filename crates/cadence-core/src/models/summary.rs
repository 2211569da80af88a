//! Plan summary with goal statistics.

use serde::{Deserialize, Serialize};

use super::Plan;

/// A plan together with how many of its goals are in each state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    #[serde(flatten)]
    pub plan: Plan,
    pub pending_goals: u64,
    pub done_goals: u64,
    pub omitted_goals: u64,
    /// Pending goals left on an overbooked day for manual review
    pub flagged_goals: u64,
}

impl PlanSummary {
    /// Goals of any status.
    pub fn total_goals(&self) -> u64 {
        self.pending_goals + self.done_goals + self.omitted_goals
    }
}
