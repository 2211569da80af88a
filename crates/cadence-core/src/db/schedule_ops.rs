//! Engine operations run against the database.
//!
//! Each mutating method takes the write lock, loads the plan, runs the engine
//! on a [`SqliteStore`] over the transaction and commits. An error anywhere
//! rolls the whole operation back.

use jiff::civil::Date;
use log::info;
use rusqlite::Transaction;
use serde::{Deserialize, Serialize};

use super::{goal_queries, plan_queries, SqliteStore};
use crate::{
    engine::{
        self, numbering::validate_reorder, Capacity, CompletionOutcome, DaySchedule,
        DurationChange, FitCheck, ImportReport, OmissionOutcome, Placement, PlacementTarget,
        RebalanceReport, ReviewOutcome, ScheduleConfig,
    },
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{
        validate_planned_minutes, Goal, GoalStatus, ImportGoal, NewGoal, Plan, PlanChanges,
        RedistributionReason,
    },
};

/// An edited plan and the redistribution its edit triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanUpdate {
    pub plan: Plan,
    pub rebalance: RebalanceReport,
}

impl super::Database {
    /// Runs `op` inside an immediate transaction, committing on success.
    fn with_write_lock<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self.immediate()?;
        let value = op(&tx)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(value)
    }

    /// Minutes budgeted, used and left on a plan's date.
    pub fn compute_capacity(&self, plan_id: u64, date: Date) -> Result<Capacity> {
        let plan = plan_queries::load_plan(&self.connection, plan_id)?;
        engine::compute_capacity(&SqliteStore::new(&self.connection), &plan, date)
    }

    /// A date's ledger and goals.
    pub fn day_schedule(&self, plan_id: u64, date: Date) -> Result<DaySchedule> {
        let plan = plan_queries::load_plan(&self.connection, plan_id)?;
        engine::day_schedule(&SqliteStore::new(&self.connection), &plan, date)
    }

    /// Advisory fit check; changes nothing.
    pub fn check_fit(
        &self,
        plan_id: u64,
        date: Date,
        duration: u32,
        config: &ScheduleConfig,
    ) -> Result<FitCheck> {
        validate_planned_minutes(duration)?;
        let plan = plan_queries::load_plan(&self.connection, plan_id)?;
        engine::check_fit(
            &SqliteStore::new(&self.connection),
            &plan,
            date,
            duration,
            config,
        )
    }

    /// Creates a goal and places it on `date`, resolving any conflict.
    pub fn place_goal(
        &mut self,
        plan_id: u64,
        goal: NewGoal,
        date: Date,
        force: bool,
        config: &ScheduleConfig,
    ) -> Result<Placement> {
        self.with_write_lock(|tx| {
            let plan = plan_queries::load_plan(tx, plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::place_or_reschedule_goal(
                &mut store,
                &plan,
                PlacementTarget::New(goal),
                date,
                force,
                config,
            )
        })
    }

    /// Moves a pending goal to `date`, resolving any conflict.
    pub fn reschedule_goal(
        &mut self,
        goal_id: u64,
        date: Date,
        force: bool,
        config: &ScheduleConfig,
    ) -> Result<Placement> {
        self.with_write_lock(|tx| {
            let goal = goal_queries::load_goal(tx, goal_id)?;
            let plan = plan_queries::load_plan(tx, goal.plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::place_or_reschedule_goal(
                &mut store,
                &plan,
                PlacementTarget::Existing(goal_id),
                date,
                force,
                config,
            )
        })
    }

    /// Imports a batch of goals, skipping duplicate content.
    pub fn import_goals(
        &mut self,
        plan_id: u64,
        rows: Vec<ImportGoal>,
        config: &ScheduleConfig,
    ) -> Result<ImportReport> {
        self.with_write_lock(|tx| {
            let plan = plan_queries::load_plan(tx, plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::import_goals(&mut store, &plan, rows, config)
        })
    }

    /// Completes a pending goal and generates its reviews.
    pub fn complete_goal(
        &mut self,
        goal_id: u64,
        actual_seconds: u32,
        completed_on: Date,
        config: &ScheduleConfig,
    ) -> Result<CompletionOutcome> {
        self.with_write_lock(|tx| {
            let goal = goal_queries::load_goal(tx, goal_id)?;
            let plan = plan_queries::load_plan(tx, goal.plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::complete_goal(
                &mut store,
                &plan,
                goal_id,
                actual_seconds,
                completed_on,
                config,
            )
        })
    }

    /// Runs review generation for an already completed goal.
    ///
    /// Returns an empty outcome when the goal already has its reviews.
    pub fn generate_reviews(&mut self, goal_id: u64, config: &ScheduleConfig) -> Result<ReviewOutcome> {
        self.with_write_lock(|tx| {
            let goal = goal_queries::load_goal(tx, goal_id)?;
            let plan = plan_queries::load_plan(tx, goal.plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::on_goal_completed(&mut store, &plan, &goal, config)
        })
    }

    /// Omits a pending goal with a reason.
    pub fn omit_goal(&mut self, goal_id: u64, reason: &str) -> Result<OmissionOutcome> {
        self.with_write_lock(|tx| {
            let mut store = SqliteStore::new(tx);
            engine::omit_goal(&mut store, goal_id, reason)
        })
    }

    /// Changes a pending goal's planned duration and rebalances its day.
    pub fn change_duration(
        &mut self,
        goal_id: u64,
        planned_minutes: u32,
        config: &ScheduleConfig,
    ) -> Result<DurationChange> {
        self.with_write_lock(|tx| {
            let goal = goal_queries::load_goal(tx, goal_id)?;
            let plan = plan_queries::load_plan(tx, goal.plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::change_duration(&mut store, &plan, goal_id, planned_minutes, config)
        })
    }

    /// Pins or unpins a pending goal against redistribution.
    pub fn set_goal_fixed(&mut self, goal_id: u64, fixed: bool) -> Result<Goal> {
        self.with_write_lock(|tx| {
            let goal = goal_queries::load_goal(tx, goal_id)?;
            if goal.status != GoalStatus::Pending {
                return Err(SchedulerError::invalid_transition(
                    goal_id,
                    format!("cannot pin a goal that is {}", goal.status.as_str()),
                ));
            }
            goal_queries::set_fixed(tx, goal_id, fixed)?;
            goal_queries::load_goal(tx, goal_id)
        })
    }

    /// Rewrites the positions of a day's goals in the order given.
    ///
    /// `goal_ids` must list every goal on the date exactly once.
    pub fn reorder_day(&mut self, plan_id: u64, date: Date, goal_ids: &[u64]) -> Result<Vec<Goal>> {
        self.with_write_lock(|tx| {
            plan_queries::load_plan(tx, plan_id)?;
            let current = goal_queries::day_goal_ids(tx, plan_id, date)?;
            validate_reorder(&current, goal_ids)?;
            goal_queries::write_positions(tx, goal_ids)?;
            info!("Reordered {} goals of plan {plan_id} on {date}", goal_ids.len());
            goal_queries::goals_on(tx, plan_id, date)
        })
    }

    /// Rebalances one date of a plan.
    pub fn rebalance_day(
        &mut self,
        plan_id: u64,
        date: Date,
        config: &ScheduleConfig,
    ) -> Result<RebalanceReport> {
        self.with_write_lock(|tx| {
            let plan = plan_queries::load_plan(tx, plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::rebalance_day(
                &mut store,
                &plan,
                date,
                RedistributionReason::ManualRebalance,
                config,
            )
        })
    }

    /// Rebalances every date of a plan from `from` on.
    pub fn rebalance_plan(
        &mut self,
        plan_id: u64,
        from: Date,
        config: &ScheduleConfig,
    ) -> Result<RebalanceReport> {
        self.with_write_lock(|tx| {
            let plan = plan_queries::load_plan(tx, plan_id)?;
            let mut store = SqliteStore::new(tx);
            engine::rebalance_plan(
                &mut store,
                &plan,
                from.max(plan.start_date),
                RedistributionReason::ManualRebalance,
                config,
            )
        })
    }

    /// Edits a plan. A change to hours per day or availability
    /// redistributes every pending date from `today` (or the plan start, if
    /// later) in date order.
    pub fn update_plan(
        &mut self,
        plan_id: u64,
        changes: &PlanChanges,
        today: Date,
        config: &ScheduleConfig,
    ) -> Result<PlanUpdate> {
        self.with_write_lock(|tx| {
            let plan = plan_queries::load_plan(tx, plan_id)?;
            changes.validate(plan.start_date)?;
            let plan = plan_queries::apply_changes(tx, &plan, changes)?;
            info!("Updated plan {plan_id}");

            let rebalance = if changes.affects_capacity() {
                let mut store = SqliteStore::new(tx);
                engine::rebalance_plan(
                    &mut store,
                    &plan,
                    today.max(plan.start_date),
                    RedistributionReason::PlanEdited,
                    config,
                )?
            } else {
                RebalanceReport::default()
            };
            Ok(PlanUpdate { plan, rebalance })
        })
    }
}
