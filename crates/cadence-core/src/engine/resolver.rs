//! Conflict resolver: does a duration fit on a date, and where else could it
//! go.
//!
//! The resolver only reads. It backs the advisory `check_fit` query as well
//! as placement, redistribution and review generation.

use jiff::{civil::Date, ToSpan};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{
    availability::plan_capacity,
    ledger::{compute_capacity_excluding, Ledger},
    ScheduleConfig,
};
use crate::{error::Result, models::Plan};

/// Answer to "does `duration` fit on `date`?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitCheck {
    /// Date that was asked about
    pub date: Date,
    /// Candidate duration in minutes
    pub duration: u32,
    /// Whether the duration fits in the remaining capacity
    pub fits: bool,
    /// Minutes used on `date` once the candidate is placed (unchanged on a
    /// conflict)
    pub used_after: u32,
    /// Minutes left on `date` after placement (or now, on a conflict)
    pub remaining: u32,
    /// First later date with room, set only on a conflict
    pub next_available: Option<Date>,
}

/// Checks whether `duration` minutes fit on `date`, scanning forward for the
/// first day with room when they do not.
pub fn check_fit<L>(
    ledger: &L,
    plan: &Plan,
    date: Date,
    duration: u32,
    config: &ScheduleConfig,
) -> Result<FitCheck>
where
    L: Ledger + ?Sized,
{
    check_fit_excluding(ledger, plan, date, duration, None, config)
}

/// [`check_fit`] ignoring the goal `exclude` on every date it looks at.
pub(crate) fn check_fit_excluding<L>(
    ledger: &L,
    plan: &Plan,
    date: Date,
    duration: u32,
    exclude: Option<u64>,
    config: &ScheduleConfig,
) -> Result<FitCheck>
where
    L: Ledger + ?Sized,
{
    let capacity = compute_capacity_excluding(ledger, plan, date, exclude)?;

    if duration <= capacity.remaining {
        return Ok(FitCheck {
            date,
            duration,
            fits: true,
            used_after: capacity.used + duration,
            remaining: capacity.remaining - duration,
            next_available: None,
        });
    }

    let next_available = next_available_date(ledger, plan, date, duration, exclude, config)?;
    match next_available {
        Some(next) => debug!(
            "{duration} min do not fit on {date} for plan {}; next room on {next}",
            plan.id
        ),
        None => warn!(
            "{duration} min do not fit on {date} for plan {} and no later day has room",
            plan.id
        ),
    }

    Ok(FitCheck {
        date,
        duration,
        fits: false,
        used_after: capacity.used,
        remaining: capacity.remaining,
        next_available,
    })
}

/// Last date the forward scan may reach from `after`: the plan's end date
/// when set, otherwise `horizon_days` later.
pub fn scan_limit(plan: &Plan, after: Date, config: &ScheduleConfig) -> Result<Date> {
    match plan.end_date {
        Some(end) => Ok(end),
        None => Ok(after.checked_add(i64::from(config.horizon_days).days())?),
    }
}

/// First date strictly after `after`, within the plan and the scan limit,
/// that is available and has at least `duration` minutes left.
pub(crate) fn next_available_date<L>(
    ledger: &L,
    plan: &Plan,
    after: Date,
    duration: u32,
    exclude: Option<u64>,
    config: &ScheduleConfig,
) -> Result<Option<Date>>
where
    L: Ledger + ?Sized,
{
    let limit = scan_limit(plan, after, config)?;
    let mut day = after;

    while day < limit {
        day = day.tomorrow()?;
        if !plan.covers(day) || plan_capacity(plan, day) == 0 {
            continue;
        }
        let capacity = compute_capacity_excluding(ledger, plan, day, exclude)?;
        if capacity.remaining >= duration {
            return Ok(Some(day));
        }
    }

    Ok(None)
}
