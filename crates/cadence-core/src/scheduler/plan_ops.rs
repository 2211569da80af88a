//! Plan, taxonomy and audit operations for the Scheduler.

use super::{today, Scheduler};
use crate::{
    db::PlanUpdate,
    engine::RebalanceReport,
    error::{Result, SchedulerError},
    models::{
        NewPlan, OmissionRecord, Plan, PlanFilter, PlanSummary, RedistributionRecord,
        TaxonomyNode,
    },
    params::{AddTaxonomyNode, Id, ListPlans, RebalancePlan, UpdatePlan},
};

impl Scheduler {
    /// Creates a new plan.
    pub async fn create_plan(&self, params: &NewPlan) -> Result<Plan> {
        let params = params.clone();
        self.run(move |db, _| db.create_plan(&params)).await
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.run(move |db, _| db.get_plan(plan_id)).await
    }

    /// A plan with its goal counts.
    pub async fn plan_summary(&self, params: &Id) -> Result<PlanSummary> {
        let plan_id = params.id;
        self.run(move |db, _| db.plan_summary(plan_id)).await
    }

    /// Lists plans matching the filter.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<Plan>> {
        let filter = PlanFilter::from(params);
        self.run(move |db, _| db.list_plans(&filter)).await
    }

    /// Edits a plan, redistributing its goals when the daily budget or the
    /// weekly availability changed.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<PlanUpdate> {
        let plan_id = params.id;
        let changes = params.changes.clone();
        let today = params.today.unwrap_or_else(today);
        self.run(move |db, config| db.update_plan(plan_id, &changes, today, config))
            .await
    }

    /// Rebalances every pending date of a plan.
    pub async fn rebalance_plan(&self, params: &RebalancePlan) -> Result<RebalanceReport> {
        let plan_id = params.plan_id;
        let from = params.from;
        self.run(move |db, config| {
            let from = match from {
                Some(from) => from,
                None => {
                    db.get_plan(plan_id)?
                        .ok_or(SchedulerError::PlanNotFound { id: plan_id })?
                        .start_date
                }
            };
            db.rebalance_plan(plan_id, from, config)
        })
        .await
    }

    /// Adds a discipline, subject or topic.
    pub async fn add_taxonomy_node(&self, params: &AddTaxonomyNode) -> Result<TaxonomyNode> {
        let params = params.clone();
        self.run(move |db, _| db.add_taxonomy_node(params.kind, &params.name, params.parent_id))
            .await
    }

    /// Lists every taxonomy node.
    pub async fn list_taxonomy_nodes(&self) -> Result<Vec<TaxonomyNode>> {
        self.run(|db, _| db.list_taxonomy_nodes()).await
    }

    /// Redistribution log of a plan.
    pub async fn redistribution_log(&self, params: &Id) -> Result<Vec<RedistributionRecord>> {
        let plan_id = params.id;
        self.run(move |db, _| {
            db.get_plan(plan_id)?
                .ok_or(SchedulerError::PlanNotFound { id: plan_id })?;
            db.list_redistributions(plan_id)
        })
        .await
    }

    /// Omission log of a plan.
    pub async fn omission_log(&self, params: &Id) -> Result<Vec<OmissionRecord>> {
        let plan_id = params.id;
        self.run(move |db, _| {
            db.get_plan(plan_id)?
                .ok_or(SchedulerError::PlanNotFound { id: plan_id })?;
            db.list_omissions(plan_id)
        })
        .await
    }
}
