//! Per-date study capacity derived from a weekly mask and a daily budget.
//!
//! These functions are total: they answer for any date, including dates
//! outside a plan's start/end range. Callers decide whether to ask.

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Plan, WeekMask},
};

/// Daily budget in whole minutes.
pub fn daily_minutes(hours_per_day: f64) -> u32 {
    (hours_per_day * 60.0).round().max(0.0) as u32
}

/// Minutes available on `date`: the daily budget if the weekday is in the
/// mask, zero otherwise.
pub fn capacity_minutes(availability: WeekMask, hours_per_day: f64, date: Date) -> u32 {
    if availability.is_available(date) {
        daily_minutes(hours_per_day)
    } else {
        0
    }
}

/// [`capacity_minutes`] for a plan.
pub fn plan_capacity(plan: &Plan, date: Date) -> u32 {
    capacity_minutes(plan.availability, plan.hours_per_day, date)
}

/// The first date on or after `date` whose weekday is in the mask.
///
/// Never looks further than six days ahead since a mask always has a bit
/// set.
pub fn first_available_on_or_after(availability: WeekMask, date: Date) -> Result<Date> {
    let mut day = date;
    while !availability.is_available(day) {
        day = day.tomorrow()?;
    }
    Ok(day)
}
