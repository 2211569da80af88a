//! Placing new goals and rescheduling pending ones.
//!
//! Every goal mutation that picks a date goes through
//! [`place_or_reschedule_goal`]. It recomputes the ledger for the target date,
//! and on a conflict either moves the goal to the resolver's suggestion,
//! places it anyway when forced, or leaves it on the requested date flagged
//! for manual attention. A goal is never dropped.

use jiff::civil::Date;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{
    fingerprint::content_hash,
    numbering::GoalNumber,
    resolver::{check_fit_excluding, FitCheck},
    store::{validate_taxonomy, GoalDraft, ScheduleStore},
    ScheduleConfig,
};
use crate::{
    error::{Result, SchedulerError},
    models::{
        Goal, GoalKind, GoalStatus, ImportGoal, NewGoal, Plan, PlanStatus, RedistributionEntry,
        RedistributionReason,
    },
};

/// What to place: a goal to be created, or an existing pending goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementTarget {
    New(NewGoal),
    Existing(u64),
}

/// How a capacity conflict on the requested date was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum ConflictResolution {
    /// Placed on the first later date with room
    Moved { to: Date },
    /// Placed on the requested date on the caller's insistence
    Forced,
    /// No room within the horizon; left on the requested date and flagged
    Flagged,
}

/// A conflict met while placing a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConflict {
    /// Date the caller asked for
    pub requested: Date,
    /// Minutes that were left on the requested date
    pub remaining: u32,
    #[serde(flatten)]
    pub resolution: ConflictResolution,
}

/// Result of placing or rescheduling one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// The goal as stored, on its resolved date
    pub goal: Goal,
    /// Set when the requested date did not have room
    pub conflict: Option<PlacementConflict>,
    /// Non-fatal problems, e.g. a failed audit write
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Placement {
    /// Date the goal ended up on.
    pub fn resolved_date(&self) -> Date {
        self.goal.scheduled_date
    }

    /// Whether a conflict was resolved by moving the goal to another date.
    pub fn auto_resolved(&self) -> bool {
        matches!(
            self.conflict,
            Some(PlacementConflict {
                resolution: ConflictResolution::Moved { .. },
                ..
            })
        )
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub placed: Vec<Placement>,
    /// Rows skipped because their content already exists in the plan or
    /// earlier in the batch
    pub duplicates: Vec<ImportGoal>,
    pub warnings: Vec<String>,
}

/// Creates `target` on `date`, or moves it there, enforcing capacity.
///
/// With `force`, a conflict is recorded but the goal still lands on `date`.
pub fn place_or_reschedule_goal<S>(
    store: &mut S,
    plan: &Plan,
    target: PlacementTarget,
    date: Date,
    force: bool,
    config: &ScheduleConfig,
) -> Result<Placement>
where
    S: ScheduleStore + ?Sized,
{
    ensure_schedulable(plan, date)?;
    match target {
        PlacementTarget::New(goal) => {
            goal.validate()?;
            validate_taxonomy(store, &goal.taxonomy)?;
            place_new(store, plan, goal, date, force, config)
        }
        PlacementTarget::Existing(goal_id) => {
            reschedule(store, plan, goal_id, date, force, config)
        }
    }
}

/// Places a batch of goals, skipping content that is already present.
///
/// All rows are validated before the first one is placed.
pub fn import_goals<S>(
    store: &mut S,
    plan: &Plan,
    rows: Vec<ImportGoal>,
    config: &ScheduleConfig,
) -> Result<ImportReport>
where
    S: ScheduleStore + ?Sized,
{
    for row in &rows {
        ensure_schedulable(plan, row.date)?;
        row.goal.validate()?;
        validate_taxonomy(store, &row.goal.taxonomy)?;
    }

    let mut seen = store.content_hashes(plan.id)?;
    let mut report = ImportReport::default();

    for row in rows {
        let hash = content_hash(
            &row.goal.taxonomy,
            row.goal.goal_type,
            row.goal.planned_minutes,
        );
        if !seen.insert(hash) {
            info!(
                "Skipping duplicate {} goal for {} in plan {}",
                row.goal.goal_type.as_str(),
                row.date,
                plan.id
            );
            report.duplicates.push(row);
            continue;
        }

        let placement = place_new(store, plan, row.goal, row.date, false, config)?;
        report.warnings.extend(placement.warnings.iter().cloned());
        report.placed.push(placement);
    }

    Ok(report)
}

pub(crate) fn ensure_schedulable(plan: &Plan, date: Date) -> Result<()> {
    if plan.status != PlanStatus::Active {
        return Err(SchedulerError::invalid_input("plan_id").with_reason(format!(
            "Plan {} is {} and does not accept scheduling",
            plan.id,
            plan.status.as_str()
        )));
    }
    if !plan.covers(date) {
        return Err(SchedulerError::invalid_input("date").with_reason(format!(
            "{date} is outside plan {} ({} to {})",
            plan.id,
            plan.start_date,
            plan.end_date
                .map_or_else(|| "open end".to_string(), |end| end.to_string())
        )));
    }
    Ok(())
}

/// Picks the final date for a fit check and describes any conflict.
fn resolve(fit: &FitCheck, force: bool) -> (Date, Option<PlacementConflict>) {
    if fit.fits {
        return (fit.date, None);
    }
    let resolution = match (force, fit.next_available) {
        (true, _) => ConflictResolution::Forced,
        (false, Some(to)) => ConflictResolution::Moved { to },
        (false, None) => ConflictResolution::Flagged,
    };
    let date = match resolution {
        ConflictResolution::Moved { to } => to,
        ConflictResolution::Forced | ConflictResolution::Flagged => fit.date,
    };
    let conflict = PlacementConflict {
        requested: fit.date,
        remaining: fit.remaining,
        resolution,
    };
    (date, Some(conflict))
}

fn is_flagged(conflict: Option<&PlacementConflict>) -> bool {
    matches!(
        conflict,
        Some(PlacementConflict {
            resolution: ConflictResolution::Flagged,
            ..
        })
    )
}

fn place_new<S>(
    store: &mut S,
    plan: &Plan,
    goal: NewGoal,
    date: Date,
    force: bool,
    config: &ScheduleConfig,
) -> Result<Placement>
where
    S: ScheduleStore + ?Sized,
{
    let fit = check_fit_excluding(store, plan, date, goal.planned_minutes, None, config)?;
    let (resolved, conflict) = resolve(&fit, force);
    let flagged = is_flagged(conflict.as_ref());

    let base = store.allocate_number_base(plan.id)?;
    let draft = GoalDraft {
        plan_id: plan.id,
        kind: GoalKind::Origin,
        goal_type: goal.goal_type,
        taxonomy: goal.taxonomy,
        scheduled_date: resolved,
        planned_minutes: goal.planned_minutes,
        guidance: goal.guidance,
        fixed: goal.fixed,
        needs_review: flagged,
        content_hash: content_hash(&goal.taxonomy, goal.goal_type, goal.planned_minutes),
        number: GoalNumber::origin(base),
    };
    let created = store.insert_goal(draft)?;
    info!(
        "Placed goal {} ({}) of plan {} on {resolved}",
        created.id,
        created.display_number(),
        plan.id
    );

    let mut warnings = Vec::new();
    if flagged {
        warnings.push(format!(
            "No day with {} free minutes found after {date}; goal {} left on {date} for manual review",
            created.planned_minutes,
            created.display_number()
        ));
    }

    Ok(Placement {
        goal: created,
        conflict,
        warnings,
    })
}

fn reschedule<S>(
    store: &mut S,
    plan: &Plan,
    goal_id: u64,
    date: Date,
    force: bool,
    config: &ScheduleConfig,
) -> Result<Placement>
where
    S: ScheduleStore + ?Sized,
{
    let goal = store.goal(goal_id)?;
    if goal.plan_id != plan.id {
        return Err(SchedulerError::invalid_input("goal_id")
            .with_reason(format!("Goal {goal_id} belongs to plan {}", goal.plan_id)));
    }
    if goal.status != GoalStatus::Pending {
        return Err(SchedulerError::invalid_transition(
            goal_id,
            format!("only pending goals can be moved, this one is {}", goal.status.as_str()),
        ));
    }
    if goal.scheduled_date == date {
        return Ok(Placement {
            goal,
            conflict: None,
            warnings: Vec::new(),
        });
    }

    let fit = check_fit_excluding(
        store,
        plan,
        date,
        goal.planned_minutes,
        Some(goal.id),
        config,
    )?;
    let (resolved, conflict) = resolve(&fit, force);
    let from = goal.scheduled_date;

    // An existing goal with nowhere to go stays on its current date, flag
    // untouched; only the failed move is reported.
    if is_flagged(conflict.as_ref()) {
        info!(
            "Goal {goal_id} of plan {} stays on {from}: no day with room from {date}",
            plan.id
        );
        let warnings = vec![format!(
            "No day with {} free minutes found from {date}; goal {} stays on {from}",
            goal.planned_minutes,
            goal.display_number()
        )];
        return Ok(Placement {
            goal,
            conflict,
            warnings,
        });
    }

    let mut warnings = Vec::new();
    let moved = if resolved == from {
        goal
    } else {
        let moved = store.move_goal(goal_id, resolved)?;
        let entry = RedistributionEntry {
            plan_id: plan.id,
            goal_id,
            date_from: from,
            date_to: resolved,
            reason: RedistributionReason::Rescheduled,
        };
        if let Err(e) = store.record_redistribution(&entry) {
            warn!("Failed to record move of goal {goal_id}: {e}");
            warnings.push(format!("Move of goal {goal_id} was not logged: {e}"));
        }
        info!("Moved goal {goal_id} of plan {} from {from} to {resolved}", plan.id);
        moved
    };

    Ok(Placement {
        goal: moved,
        conflict,
        warnings,
    })
}
