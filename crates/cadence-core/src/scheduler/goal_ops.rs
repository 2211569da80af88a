//! Goal operations for the Scheduler.

use super::{today, Scheduler};
use crate::{
    engine::{
        CompletionOutcome, DurationChange, ImportReport, OmissionOutcome, Placement, ReviewOutcome,
    },
    error::{Result, SchedulerError},
    models::{Goal, GoalFilter},
    params::{
        ChangeDuration, CompleteGoal, Id, ImportGoals, ListGoals, MoveGoal, OmitGoal, PlaceGoal,
        SetFixed,
    },
};

impl Scheduler {
    /// Creates a goal and places it on the requested date or the next one
    /// with room.
    pub async fn place_goal(&self, params: &PlaceGoal) -> Result<Placement> {
        let params = params.clone();
        self.run(move |db, config| {
            db.place_goal(params.plan_id, params.goal, params.date, params.force, config)
        })
        .await
    }

    /// Moves a pending goal to another date.
    pub async fn move_goal(&self, params: &MoveGoal) -> Result<Placement> {
        let params = params.clone();
        self.run(move |db, config| {
            db.reschedule_goal(params.goal_id, params.date, params.force, config)
        })
        .await
    }

    /// Imports a batch of goals into a plan.
    pub async fn import_goals(&self, params: &ImportGoals) -> Result<ImportReport> {
        let params = params.clone();
        self.run(move |db, config| db.import_goals(params.plan_id, params.goals, config))
            .await
    }

    /// Marks a goal done and generates its review chain.
    pub async fn complete_goal(&self, params: &CompleteGoal) -> Result<CompletionOutcome> {
        let goal_id = params.goal_id;
        let actual_seconds = params.actual_seconds;
        let completed_on = params.completed_on.unwrap_or_else(today);
        self.run(move |db, config| db.complete_goal(goal_id, actual_seconds, completed_on, config))
            .await
    }

    /// Re-runs review generation for a completed goal. Creates nothing when
    /// the chain already exists.
    pub async fn generate_reviews(&self, params: &Id) -> Result<ReviewOutcome> {
        let goal_id = params.id;
        self.run(move |db, config| db.generate_reviews(goal_id, config))
            .await
    }

    /// Omits a pending goal.
    pub async fn omit_goal(&self, params: &OmitGoal) -> Result<OmissionOutcome> {
        let params = params.clone();
        self.run(move |db, _| db.omit_goal(params.goal_id, &params.reason))
            .await
    }

    /// Changes a goal's planned duration and rebalances its date.
    pub async fn change_duration(&self, params: &ChangeDuration) -> Result<DurationChange> {
        let goal_id = params.goal_id;
        let minutes = params.planned_minutes;
        self.run(move |db, config| db.change_duration(goal_id, minutes, config))
            .await
    }

    /// Pins or unpins a goal against redistribution.
    pub async fn set_goal_fixed(&self, params: &SetFixed) -> Result<Goal> {
        let goal_id = params.goal_id;
        let fixed = params.fixed;
        self.run(move |db, _| db.set_goal_fixed(goal_id, fixed))
            .await
    }

    /// Retrieves a goal, failing with `GoalNotFound`.
    pub async fn get_goal(&self, params: &Id) -> Result<Goal> {
        let goal_id = params.id;
        self.run(move |db, _| {
            db.get_goal(goal_id)?
                .ok_or(SchedulerError::GoalNotFound { id: goal_id })
        })
        .await
    }

    /// Lists a plan's goals by date and position.
    pub async fn list_goals(&self, params: &ListGoals) -> Result<Vec<Goal>> {
        let plan_id = params.plan_id;
        let filter = GoalFilter::from(params);
        self.run(move |db, _| db.list_goals(plan_id, &filter)).await
    }

    /// Lists a plan's goals in numbering order.
    pub async fn list_goals_by_number(&self, params: &Id) -> Result<Vec<Goal>> {
        let plan_id = params.id;
        self.run(move |db, _| db.list_goals_by_number(plan_id)).await
    }

    /// Generated reviews of a goal.
    pub async fn review_chain(&self, params: &Id) -> Result<Vec<Goal>> {
        let goal_id = params.id;
        self.run(move |db, _| db.get_review_chain(goal_id)).await
    }
}
