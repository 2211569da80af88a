//! Goal state transitions: completion, omission and duration edits.
//!
//! `Done` and `Omitted` are terminal; every function here rejects a goal
//! that has already left `Pending`.

use jiff::civil::Date;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{
    fingerprint::content_hash,
    redistribution::{rebalance_day, RebalanceReport},
    review::on_goal_completed,
    store::ScheduleStore,
    ScheduleConfig,
};
use crate::{
    error::{Result, SchedulerError},
    models::{
        validate_omission_reason, validate_planned_minutes, Goal, GoalStatus, OmissionEntry, Plan,
        RedistributionReason,
    },
};

/// A completed goal and the reviews it spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub goal: Goal,
    pub reviews_created: Vec<Goal>,
    pub warnings: Vec<String>,
}

/// An omitted goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmissionOutcome {
    pub goal: Goal,
    pub warnings: Vec<String>,
}

/// A goal with a new planned duration and the rebalance of its day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationChange {
    pub goal: Goal,
    pub rebalance: RebalanceReport,
}

fn pending_goal_of<S>(store: &S, plan: Option<&Plan>, goal_id: u64, action: &str) -> Result<Goal>
where
    S: ScheduleStore + ?Sized,
{
    let goal = store.goal(goal_id)?;
    if let Some(plan) = plan {
        if goal.plan_id != plan.id {
            return Err(SchedulerError::invalid_input("goal_id")
                .with_reason(format!("Goal {goal_id} belongs to plan {}", goal.plan_id)));
        }
    }
    if goal.status != GoalStatus::Pending {
        return Err(SchedulerError::invalid_transition(
            goal_id,
            format!("cannot {action} a goal that is {}", goal.status.as_str()),
        ));
    }
    Ok(goal)
}

/// Marks a pending goal done and, for study goals, generates its reviews.
pub fn complete_goal<S>(
    store: &mut S,
    plan: &Plan,
    goal_id: u64,
    actual_seconds: u32,
    completed_on: Date,
    config: &ScheduleConfig,
) -> Result<CompletionOutcome>
where
    S: ScheduleStore + ?Sized,
{
    if actual_seconds == 0 {
        return Err(SchedulerError::invalid_input("actual_seconds")
            .with_reason("Actual duration must be greater than zero"));
    }
    pending_goal_of(store, Some(plan), goal_id, "complete")?;

    let goal = store.mark_done(goal_id, actual_seconds, completed_on)?;
    info!("Completed goal {goal_id} on {completed_on} after {actual_seconds}s");

    let reviews = on_goal_completed(store, plan, &goal, config)?;
    Ok(CompletionOutcome {
        goal,
        reviews_created: reviews.reviews_created,
        warnings: reviews.warnings,
    })
}

/// Omits a pending goal. The reason is required and logged.
pub fn omit_goal<S>(store: &mut S, goal_id: u64, reason: &str) -> Result<OmissionOutcome>
where
    S: ScheduleStore + ?Sized,
{
    let reason = validate_omission_reason(reason)?;
    pending_goal_of(store, None, goal_id, "omit")?;

    let goal = store.mark_omitted(goal_id, reason)?;
    info!("Omitted goal {goal_id}: {reason}");

    let mut warnings = Vec::new();
    let entry = OmissionEntry {
        plan_id: goal.plan_id,
        goal_id,
        scheduled_date: goal.scheduled_date,
        reason: reason.to_string(),
    };
    if let Err(e) = store.record_omission(&entry) {
        warn!("Failed to record omission of goal {goal_id}: {e}");
        warnings.push(format!("Omission of goal {goal_id} was not logged: {e}"));
    }

    Ok(OmissionOutcome { goal, warnings })
}

/// Changes a pending goal's planned duration and rebalances its day.
pub fn change_duration<S>(
    store: &mut S,
    plan: &Plan,
    goal_id: u64,
    planned_minutes: u32,
    config: &ScheduleConfig,
) -> Result<DurationChange>
where
    S: ScheduleStore + ?Sized,
{
    validate_planned_minutes(planned_minutes)?;
    let goal = pending_goal_of(store, Some(plan), goal_id, "resize")?;

    let hash = content_hash(&goal.taxonomy, goal.goal_type, planned_minutes);
    store.set_planned_minutes(goal_id, planned_minutes, &hash)?;
    info!(
        "Goal {goal_id} now planned for {planned_minutes} min (was {})",
        goal.planned_minutes
    );

    let rebalance = rebalance_day(
        store,
        plan,
        goal.scheduled_date,
        RedistributionReason::DurationChanged,
        config,
    )?;
    Ok(DurationChange {
        goal: store.goal(goal_id)?,
        rebalance,
    })
}
