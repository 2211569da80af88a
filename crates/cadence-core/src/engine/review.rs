//! Spaced-repetition review chains.
//!
//! Completing an authored study goal schedules three reviews at +1, +7 and
//! +30 days from the completion date. Each review is evaluated on its own,
//! so one that finds no room does not stop the others.

use jiff::{civil::Date, ToSpan};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{
    availability::first_available_on_or_after,
    fingerprint::content_hash,
    numbering::GoalNumber,
    resolver::check_fit,
    store::{GoalDraft, ScheduleStore},
    ScheduleConfig,
};
use crate::{
    error::{Result, SchedulerError},
    models::{Goal, GoalKind, GoalStatus, GoalType, Plan},
};

/// Calendar-day offsets of the reviews, counted from the completion date.
pub const REVIEW_OFFSETS_DAYS: [i64; 3] = [1, 7, 30];

/// Review duration: half the origin's planned minutes, rounded up.
pub fn review_minutes(planned_minutes: u32) -> u32 {
    planned_minutes.div_ceil(2)
}

/// Dates the reviews would start from before capacity is considered: each
/// offset rolled forward onto an available weekday.
pub fn review_dates(plan: &Plan, completed_on: Date) -> Result<Vec<Date>> {
    REVIEW_OFFSETS_DAYS
        .iter()
        .map(|offset| {
            let candidate = completed_on.checked_add(offset.days())?;
            first_available_on_or_after(plan.availability, candidate)
        })
        .collect()
}

fn review_guidance(subject: &str, origin: &Goal, position: usize) -> String {
    format!(
        "Review {position} of {}: revisit your {subject} notes and summarize the key points.",
        origin.display_number()
    )
}

/// Reviews created for a completed goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub reviews_created: Vec<Goal>,
    pub warnings: Vec<String>,
}

/// Generates the review chain of a goal that has just been completed.
///
/// Goals that do not spawn reviews, and goals that already have a chain,
/// produce an empty outcome. A review that finds no room, or whose date
/// falls after the plan's end date, is still created on its adjusted date
/// with `needs_review` set.
pub fn on_goal_completed<S>(
    store: &mut S,
    plan: &Plan,
    goal: &Goal,
    config: &ScheduleConfig,
) -> Result<ReviewOutcome>
where
    S: ScheduleStore + ?Sized,
{
    if !goal.spawns_reviews() {
        return Ok(ReviewOutcome::default());
    }
    let completed_on = match (goal.status, goal.completed_on) {
        (GoalStatus::Done, Some(day)) => day,
        _ => {
            return Err(SchedulerError::invalid_transition(
                goal.id,
                "reviews are generated only for completed goals",
            ))
        }
    };

    if !store.review_chain(goal.id)?.is_empty() {
        info!("Goal {} already has a review chain, skipping", goal.id);
        return Ok(ReviewOutcome::default());
    }

    let subject = store
        .taxonomy_node(goal.taxonomy.subject_id)?
        .map_or_else(|| "subject".to_string(), |node| node.name);
    let minutes = review_minutes(goal.planned_minutes);
    let dates = review_dates(plan, completed_on)?;

    let mut outcome = ReviewOutcome::default();
    for (index, adjusted) in dates.into_iter().enumerate() {
        let position = index + 1;
        match place_review(store, plan, goal, &subject, position, adjusted, minutes, config) {
            Ok((review, warning)) => {
                outcome.warnings.extend(warning);
                outcome.reviews_created.push(review);
            }
            Err(e) => {
                warn!("Review {position} of goal {} was not created: {e}", goal.id);
                outcome
                    .warnings
                    .push(format!("Review {position} of {} was not created: {e}", goal.display_number()));
            }
        }
    }

    info!(
        "Generated {} reviews for goal {} of plan {}",
        outcome.reviews_created.len(),
        goal.id,
        plan.id
    );
    Ok(outcome)
}

#[allow(clippy::too_many_arguments)]
fn place_review<S>(
    store: &mut S,
    plan: &Plan,
    origin: &Goal,
    subject: &str,
    position: usize,
    adjusted: Date,
    minutes: u32,
    config: &ScheduleConfig,
) -> Result<(Goal, Option<String>)>
where
    S: ScheduleStore + ?Sized,
{
    let suffix = u8::try_from(position).map_err(|_| {
        SchedulerError::invalid_input("number_suffix")
            .with_reason(format!("Review position {position} is out of range"))
    })?;

    let past_end = plan.end_date.filter(|end| adjusted > *end);
    let (date, needs_review, warning) = if let Some(end) = past_end {
        (
            adjusted,
            true,
            Some(format!(
                "Review {position} of {} falls on {adjusted}, after the plan ends on {end}; left for manual review",
                origin.display_number()
            )),
        )
    } else {
        let fit = check_fit(store, plan, adjusted, minutes, config)?;
        match (fit.fits, fit.next_available) {
            (true, _) => (adjusted, false, None),
            (false, Some(next)) => (next, false, None),
            (false, None) => (
                adjusted,
                true,
                Some(format!(
                    "Review {position} of {} left on {adjusted} for manual review: no day with room found",
                    origin.display_number()
                )),
            ),
        }
    };

    let draft = GoalDraft {
        plan_id: plan.id,
        kind: GoalKind::GeneratedReview {
            parent_id: origin.id,
        },
        goal_type: GoalType::Review,
        taxonomy: origin.taxonomy,
        scheduled_date: date,
        planned_minutes: minutes,
        guidance: Some(review_guidance(subject, origin, position)),
        fixed: false,
        needs_review,
        content_hash: content_hash(&origin.taxonomy, GoalType::Review, minutes),
        number: GoalNumber::review(origin.number, suffix),
    };
    let review = store.insert_goal(draft)?;
    Ok((review, warning))
}
