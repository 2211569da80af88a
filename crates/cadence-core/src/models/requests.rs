//! Request structures and input validation shared by every entry point.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{GoalType, PlanStatus, TaxonomyRef, WeekMask};
use crate::error::{Result, SchedulerError};

/// Shortest goal that can be authored, in minutes.
pub const MIN_PLANNED_MINUTES: u32 = 15;
/// Longest goal that can be authored, in minutes.
pub const MAX_PLANNED_MINUTES: u32 = 240;
/// Smallest daily budget a plan may have.
pub const MIN_HOURS_PER_DAY: f64 = 0.5;
/// Largest daily budget a plan may have.
pub const MAX_HOURS_PER_DAY: f64 = 12.0;

/// Rejects planned durations outside 15..=240 minutes.
pub fn validate_planned_minutes(minutes: u32) -> Result<()> {
    if !(MIN_PLANNED_MINUTES..=MAX_PLANNED_MINUTES).contains(&minutes) {
        return Err(SchedulerError::invalid_input("planned_minutes").with_reason(format!(
            "{minutes} is outside {MIN_PLANNED_MINUTES}..={MAX_PLANNED_MINUTES} minutes"
        )));
    }
    Ok(())
}

/// Rejects daily budgets outside 0.5..=12 hours.
pub fn validate_hours_per_day(hours: f64) -> Result<()> {
    if !hours.is_finite() || !(MIN_HOURS_PER_DAY..=MAX_HOURS_PER_DAY).contains(&hours) {
        return Err(SchedulerError::invalid_input("hours_per_day").with_reason(format!(
            "{hours} is outside {MIN_HOURS_PER_DAY}..={MAX_HOURS_PER_DAY} hours"
        )));
    }
    Ok(())
}

/// Returns the trimmed reason, or an error when it is blank.
pub fn validate_omission_reason(reason: &str) -> Result<&str> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(SchedulerError::invalid_input("omission_reason")
            .with_reason("A reason is required when omitting a goal"));
    }
    Ok(trimmed)
}

/// A plan to be created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPlan {
    pub student_id: String,
    pub title: String,
    pub hours_per_day: f64,
    pub availability: WeekMask,
    pub start_date: Date,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl NewPlan {
    /// Checks every field before anything is written.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SchedulerError::invalid_input("title").with_reason("Title cannot be empty"));
        }
        if self.student_id.trim().is_empty() {
            return Err(SchedulerError::invalid_input("student_id")
                .with_reason("Plan must belong to a student"));
        }
        validate_hours_per_day(self.hours_per_day)?;
        validate_date_range(self.start_date, self.end_date)
    }
}

/// Changes to an existing plan. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanChanges {
    pub title: Option<String>,
    pub hours_per_day: Option<f64>,
    pub availability: Option<WeekMask>,
    /// `Some(None)` clears the end date.
    pub end_date: Option<Option<Date>>,
    pub status: Option<PlanStatus>,
}

impl PlanChanges {
    /// Whether the change can shrink a day's capacity.
    pub fn affects_capacity(&self) -> bool {
        self.hours_per_day.is_some() || self.availability.is_some()
    }

    /// Validates the fields that are present.
    pub fn validate(&self, start_date: Date) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(
                    SchedulerError::invalid_input("title").with_reason("Title cannot be empty")
                );
            }
        }
        if let Some(hours) = self.hours_per_day {
            validate_hours_per_day(hours)?;
        }
        if let Some(end_date) = self.end_date {
            validate_date_range(start_date, end_date)?;
        }
        Ok(())
    }
}

fn validate_date_range(start: Date, end: Option<Date>) -> Result<()> {
    match end {
        Some(end) if end < start => Err(SchedulerError::invalid_input("end_date")
            .with_reason(format!("End date {end} is before start date {start}"))),
        _ => Ok(()),
    }
}

/// A goal to be authored and placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewGoal {
    pub goal_type: GoalType,
    pub taxonomy: TaxonomyRef,
    pub planned_minutes: u32,
    #[serde(default)]
    pub guidance: Option<String>,
    #[serde(default)]
    pub fixed: bool,
}

impl NewGoal {
    /// Checks the goal's own fields (taxonomy existence is checked by the
    /// store).
    pub fn validate(&self) -> Result<()> {
        validate_planned_minutes(self.planned_minutes)
    }
}

/// One row of a bulk import: a goal and the day it should go on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportGoal {
    pub date: Date,
    #[serde(flatten)]
    pub goal: NewGoal,
}
