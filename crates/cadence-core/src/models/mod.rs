//! Data models for plans, goals, the taxonomy they point into, and the audit
//! trail.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so presentation stays apart from the data.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::models::{Plan, PlanStatus, WeekMask};
//! use jiff::{civil::date, Timestamp};
//!
//! let plan = Plan {
//!     id: 1,
//!     student_id: "student-42".to_string(),
//!     title: "Entrance exam".to_string(),
//!     hours_per_day: 4.0,
//!     availability: WeekMask::WEEKDAYS,
//!     start_date: date(2030, 1, 7),
//!     end_date: None,
//!     status: PlanStatus::Active,
//!     last_number_base: 0,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! assert!(plan.covers(date(2030, 3, 1)));
//! println!("{}", plan);
//! ```

pub mod audit;
pub mod filters;
pub mod goal;
pub mod plan;
pub mod requests;
pub mod status;
pub mod summary;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use audit::{
    OmissionEntry, OmissionRecord, RedistributionEntry, RedistributionReason,
    RedistributionRecord,
};
pub use filters::{GoalFilter, PlanFilter};
pub use goal::{Goal, GoalKind};
pub use plan::{Plan, WeekMask};
pub use requests::{
    validate_hours_per_day, validate_omission_reason, validate_planned_minutes, ImportGoal,
    NewGoal, NewPlan, PlanChanges, MAX_HOURS_PER_DAY, MAX_PLANNED_MINUTES, MIN_HOURS_PER_DAY,
    MIN_PLANNED_MINUTES,
};
pub use status::{GoalStatus, GoalType, PlanStatus};
pub use summary::PlanSummary;
pub use taxonomy::{TaxonomyKind, TaxonomyNode, TaxonomyRef};
