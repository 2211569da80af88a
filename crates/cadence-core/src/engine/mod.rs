//! The plan scheduling and capacity engine.
//!
//! Everything in here is storage-agnostic: the algorithms talk to the outside
//! world only through the traits in [`store`], which the SQLite layer
//! ([`crate::db`]) implements inside a single write transaction.
//!
//! ```text
//! availability ──▶ ledger ──▶ resolver ──┬──▶ placement
//!                                        ├──▶ redistribution
//!      numbering ────────────────────────┴──▶ review ──▶ lifecycle
//! ```
//!
//! - [`availability`]: weekly mask + hours per day → minutes for a date
//! - [`ledger`]: minutes used and remaining on a plan's date
//! - [`resolver`]: does a duration fit, and if not, which later day has room
//! - [`numbering`]: stable goal numbers, order keys, per-day positions
//! - [`placement`]: create or move a goal, resolving conflicts
//! - [`redistribution`]: move overflowing pending goals off a day
//! - [`review`]: spaced-repetition chains for completed study goals
//! - [`lifecycle`]: completion, omission and duration edits

pub mod availability;
pub mod fingerprint;
pub mod ledger;
pub mod lifecycle;
pub mod numbering;
pub mod placement;
pub mod redistribution;
pub mod resolver;
pub mod review;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};

pub use availability::{capacity_minutes, daily_minutes, first_available_on_or_after, plan_capacity};
pub use ledger::{compute_capacity, day_schedule, Capacity, DaySchedule, Ledger};
pub use lifecycle::{
    change_duration, complete_goal, omit_goal, CompletionOutcome, DurationChange, OmissionOutcome,
};
pub use numbering::GoalNumber;
pub use placement::{
    import_goals, place_or_reschedule_goal, ConflictResolution, ImportReport, Placement,
    PlacementConflict, PlacementTarget,
};
pub use redistribution::{rebalance_day, rebalance_plan, split_overflow, RebalanceReport};
pub use resolver::{check_fit, scan_limit, FitCheck};
pub use review::{on_goal_completed, review_minutes, ReviewOutcome, REVIEW_OFFSETS_DAYS};
pub use store::{AuditSink, GoalDraft, ScheduleStore, TaxonomyLookup};

/// Default number of days the resolver scans forward when a plan has no end
/// date.
pub const DEFAULT_HORIZON_DAYS: u32 = 180;

/// Engine tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Days scanned after a full date when the plan is open-ended
    pub horizon_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}
