//! Per-date operations for the Scheduler: capacity, fit checks, ordering and
//! rebalancing.

use super::Scheduler;
use crate::{
    engine::{Capacity, DaySchedule, FitCheck, RebalanceReport},
    error::Result,
    models::Goal,
    params::{CheckFit, PlanDate, ReorderDay},
};

impl Scheduler {
    /// Minutes budgeted, used and left on a date.
    pub async fn compute_capacity(&self, params: &PlanDate) -> Result<Capacity> {
        let PlanDate { plan_id, date } = params.clone();
        self.run(move |db, _| db.compute_capacity(plan_id, date)).await
    }

    /// Whether a duration fits on a date, and the next date with room if
    /// not. Changes nothing.
    pub async fn check_fit(&self, params: &CheckFit) -> Result<FitCheck> {
        let CheckFit {
            plan_id,
            date,
            duration,
        } = params.clone();
        self.run(move |db, config| db.check_fit(plan_id, date, duration, config))
            .await
    }

    /// A date's ledger and its goals in position order.
    pub async fn day_schedule(&self, params: &PlanDate) -> Result<DaySchedule> {
        let PlanDate { plan_id, date } = params.clone();
        self.run(move |db, _| db.day_schedule(plan_id, date)).await
    }

    /// Rewrites the order of a date's goals.
    pub async fn reorder_day(&self, params: &ReorderDay) -> Result<Vec<Goal>> {
        let params = params.clone();
        self.run(move |db, _| db.reorder_day(params.plan_id, params.date, &params.goal_ids))
            .await
    }

    /// Moves overflowing goals off a date.
    pub async fn rebalance_day(&self, params: &PlanDate) -> Result<RebalanceReport> {
        let PlanDate { plan_id, date } = params.clone();
        self.run(move |db, config| db.rebalance_day(plan_id, date, config))
            .await
    }
}
