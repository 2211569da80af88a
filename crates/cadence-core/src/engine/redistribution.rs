//! Redistribution: move overflowing pending goals off a day.
//!
//! A day is processed by keeping every goal that cannot move (done, omitted,
//! fixed) and then admitting pending goals oldest number first while they
//! fit. Whatever is left over goes to the resolver's next free day, or stays
//! put with `needs_review` set when there is none. Flagged goals that fit
//! their day again have the flag cleared.

use jiff::civil::Date;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{
    availability::plan_capacity, resolver::next_available_date, store::ScheduleStore,
    ScheduleConfig,
};
use crate::{
    error::Result,
    models::{Goal, GoalStatus, Plan, RedistributionEntry, RedistributionReason},
};

/// What a rebalance run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceReport {
    /// Number of dates examined
    pub dates_checked: usize,
    /// Moves performed, in the order they happened
    pub moves: Vec<RedistributionEntry>,
    /// Goals left in place on an overbooked day
    pub flagged: Vec<u64>,
    pub warnings: Vec<String>,
}

impl RebalanceReport {
    /// Folds another report into this one.
    pub fn merge(&mut self, other: RebalanceReport) {
        self.dates_checked += other.dates_checked;
        self.moves.extend(other.moves);
        self.flagged.extend(other.flagged);
        self.warnings.extend(other.warnings);
    }

    /// True when nothing was moved or flagged.
    pub fn is_noop(&self) -> bool {
        self.moves.is_empty() && self.flagged.is_empty()
    }
}

/// Pending, non-fixed goals of a day that do not fit its capacity.
///
/// Goals that cannot move are charged first; movable goals are then admitted
/// in number order while they fit, and the rest are returned in that same
/// order.
pub fn split_overflow(capacity: u32, goals: &[Goal]) -> Vec<&Goal> {
    let is_movable = |goal: &&Goal| goal.status == GoalStatus::Pending && !goal.fixed;

    let mut used: u32 = goals
        .iter()
        .filter(|goal| !is_movable(goal))
        .map(Goal::consumed_minutes)
        .sum();

    let mut movable: Vec<&Goal> = goals.iter().filter(is_movable).collect();
    movable.sort_by_key(|goal| goal.number);

    let mut overflow = Vec::new();
    for goal in movable {
        if used + goal.planned_minutes <= capacity {
            used += goal.planned_minutes;
        } else {
            overflow.push(goal);
        }
    }
    overflow
}

/// Rebalances a single date of a plan.
///
/// Running it on a balanced date changes nothing.
pub fn rebalance_day<S>(
    store: &mut S,
    plan: &Plan,
    date: Date,
    reason: RedistributionReason,
    config: &ScheduleConfig,
) -> Result<RebalanceReport>
where
    S: ScheduleStore + ?Sized,
{
    let goals = store.goals_on(plan.id, date)?;
    let overflow: Vec<Goal> = split_overflow(plan_capacity(plan, date), &goals)
        .into_iter()
        .cloned()
        .collect();

    let mut report = RebalanceReport {
        dates_checked: 1,
        ..Default::default()
    };

    // A flagged goal that now fits its day is no longer in need of review.
    let settled = goals.iter().filter(|goal| {
        goal.needs_review
            && goal.status == GoalStatus::Pending
            && !goal.fixed
            && overflow.iter().all(|over| over.id != goal.id)
    });
    for goal in settled {
        store.set_needs_review(goal.id, false)?;
        info!("Goal {} fits {date} again, review flag cleared", goal.id);
    }

    for goal in overflow {
        let next = next_available_date(
            store,
            plan,
            date,
            goal.planned_minutes,
            Some(goal.id),
            config,
        )?;

        let Some(to) = next else {
            store.set_needs_review(goal.id, true)?;
            warn!(
                "Goal {} stays on overbooked {date}: no room within the horizon",
                goal.id
            );
            report.flagged.push(goal.id);
            report.warnings.push(format!(
                "Goal {} ({} min) left on {date} for manual review: no day with room found",
                goal.display_number(),
                goal.planned_minutes
            ));
            continue;
        };

        store.move_goal(goal.id, to)?;
        let entry = RedistributionEntry {
            plan_id: plan.id,
            goal_id: goal.id,
            date_from: date,
            date_to: to,
            reason,
        };
        if let Err(e) = store.record_redistribution(&entry) {
            warn!("Failed to record redistribution of goal {}: {e}", goal.id);
            report
                .warnings
                .push(format!("Move of goal {} was not logged: {e}", goal.id));
        }
        info!(
            "Redistributed goal {} of plan {} from {date} to {to} ({})",
            goal.id,
            plan.id,
            reason.as_str()
        );
        report.moves.push(entry);
    }

    Ok(report)
}

/// Rebalances every date on or after `from` that holds pending goals, one
/// date at a time in ascending order.
pub fn rebalance_plan<S>(
    store: &mut S,
    plan: &Plan,
    from: Date,
    reason: RedistributionReason,
    config: &ScheduleConfig,
) -> Result<RebalanceReport>
where
    S: ScheduleStore + ?Sized,
{
    let dates = store.pending_dates(plan.id, from)?;
    let mut report = RebalanceReport::default();
    for date in dates {
        report.merge(rebalance_day(store, plan, date, reason, config)?);
    }
    if !report.is_noop() {
        info!(
            "Rebalanced plan {}: {} moved, {} flagged across {} dates",
            plan.id,
            report.moves.len(),
            report.flagged.len(),
            report.dates_checked
        );
    }
    Ok(report)
}
