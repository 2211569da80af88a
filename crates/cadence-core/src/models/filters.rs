//! Filter types for querying plans and goals.

use jiff::civil::Date;

use super::{GoalStatus, PlanStatus};

/// Filter options for listing plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Only plans owned by this student
    pub student_id: Option<String>,

    /// Only plans with this status; all statuses when `None`
    pub status: Option<PlanStatus>,
}

/// Filter options for listing a plan's goals.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    /// Only goals scheduled on or after this date
    pub from: Option<Date>,

    /// Only goals scheduled on or before this date
    pub until: Option<Date>,

    /// Only goals in this state
    pub status: Option<GoalStatus>,

    /// Only goals left on an overbooked day for manual review
    pub flagged_only: bool,
}

impl GoalFilter {
    /// Goals of a single day.
    ///
    /// ```rust
    /// use cadence_core::models::GoalFilter;
    /// use jiff::civil::date;
    ///
    /// let filter = GoalFilter::on(date(2030, 1, 7));
    /// assert_eq!(filter.from, filter.until);
    /// ```
    pub fn on(date: Date) -> Self {
        Self {
            from: Some(date),
            until: Some(date),
            ..Default::default()
        }
    }

    /// Goals flagged for manual review.
    pub fn flagged() -> Self {
        Self {
            flagged_only: true,
            ..Default::default()
        }
    }
}
