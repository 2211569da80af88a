//! Capacity ledger: how much of a date's budget is already spoken for.

use jiff::civil::Date;
use log::debug;
use serde::{Deserialize, Serialize};

use super::availability::plan_capacity;
use crate::{
    error::Result,
    models::{Goal, Plan},
};

/// Read access to scheduled goals.
///
/// Implementations must return committed state as of the call; the engine
/// recomputes the ledger before every placement decision.
pub trait Ledger {
    /// Every goal of `plan_id` scheduled on `date`, whatever its status.
    fn goals_on(&self, plan_id: u64, date: Date) -> Result<Vec<Goal>>;
}

/// Minutes budgeted, used and left on one date of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub date: Date,
    pub capacity: u32,
    pub used: u32,
    pub remaining: u32,
}

impl Capacity {
    /// Sums what `goals` consume against `capacity`.
    ///
    /// Pending goals count their planned minutes, done goals their actual
    /// minutes rounded up, and omitted goals nothing.
    pub fn tally<'a, I>(date: Date, capacity: u32, goals: I) -> Self
    where
        I: IntoIterator<Item = &'a Goal>,
    {
        let used: u32 = goals.into_iter().map(Goal::consumed_minutes).sum();
        Self {
            date,
            capacity,
            used,
            remaining: capacity.saturating_sub(used),
        }
    }

    /// Whether more is booked than the day allows.
    pub fn is_overbooked(&self) -> bool {
        self.used > self.capacity
    }
}

/// Computes the ledger for `date` from the goals currently stored.
pub fn compute_capacity<L>(ledger: &L, plan: &Plan, date: Date) -> Result<Capacity>
where
    L: Ledger + ?Sized,
{
    compute_capacity_excluding(ledger, plan, date, None)
}

/// Like [`compute_capacity`] but ignores the goal `exclude`, which is about
/// to be moved.
pub(crate) fn compute_capacity_excluding<L>(
    ledger: &L,
    plan: &Plan,
    date: Date,
    exclude: Option<u64>,
) -> Result<Capacity>
where
    L: Ledger + ?Sized,
{
    let goals = ledger.goals_on(plan.id, date)?;
    let capacity = Capacity::tally(
        date,
        plan_capacity(plan, date),
        goals.iter().filter(|goal| Some(goal.id) != exclude),
    );
    debug!(
        "Ledger for plan {} on {date}: {} used of {} minutes",
        plan.id, capacity.used, capacity.capacity
    );
    Ok(capacity)
}

/// A date's ledger together with the goals on it, in position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub capacity: Capacity,
    pub goals: Vec<Goal>,
}

/// Loads the goals of `date` and tallies them.
pub fn day_schedule<L>(ledger: &L, plan: &Plan, date: Date) -> Result<DaySchedule>
where
    L: Ledger + ?Sized,
{
    let goals = ledger.goals_on(plan.id, date)?;
    let capacity = Capacity::tally(date, plan_capacity(plan, date), &goals);
    Ok(DaySchedule { capacity, goals })
}
