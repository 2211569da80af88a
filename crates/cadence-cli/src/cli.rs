//! Command handlers: each one calls the scheduler and renders the result.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use cadence_core::{
    models::{ImportGoal, NewPlan},
    params::{CompleteGoal, Id, ImportGoals, ListGoals, ListPlans, SetFixed},
    CreateResult, Goals, OmissionLog, Plans, RedistributionLog, Scheduler, TaxonomyNodes,
};
use log::debug;

use crate::{
    args::{
        DayCommands, GoalCommands, ImportArgs, PlanCommands, PlanLogArgs, ReviewsArgs,
        TaxonomyCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer) -> Self {
        Self {
            scheduler,
            renderer,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .scheduler
                    .create_plan(&NewPlan::from(args))
                    .await
                    .context("Failed to create plan")?;
                self.renderer.show(&CreateResult::new(plan))
            }
            PlanCommands::List(args) => self.list_plans(&ListPlans::from(args)).await,
            PlanCommands::Show(args) => {
                let summary = self.scheduler.plan_summary(&Id::from(args)).await?;
                self.renderer.show(&summary)
            }
            PlanCommands::Update(args) => {
                let update = self.scheduler.update_plan(&args.into()).await?;
                self.renderer.show(&update)
            }
            PlanCommands::Rebalance(args) => {
                let report = self.scheduler.rebalance_plan(&args.into()).await?;
                self.renderer.show(&report)
            }
            PlanCommands::Log(args) => self.show_plan_log(args).await,
        }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Add(args) => {
                let placement = self
                    .scheduler
                    .place_goal(&args.into())
                    .await
                    .context("Failed to place goal")?;
                self.renderer.show(&placement)
            }
            GoalCommands::Move(args) => {
                let placement = self.scheduler.move_goal(&args.into()).await?;
                self.renderer.show(&placement)
            }
            GoalCommands::Complete(args) => {
                let params = CompleteGoal {
                    goal_id: args.id,
                    actual_seconds: args.actual_seconds(),
                    completed_on: args.on,
                };
                let outcome = self.scheduler.complete_goal(&params).await?;
                self.renderer.show(&outcome)
            }
            GoalCommands::Omit(args) => {
                let outcome = self.scheduler.omit_goal(&args.into()).await?;
                self.renderer.show(&outcome)
            }
            GoalCommands::Duration(args) => {
                let change = self.scheduler.change_duration(&args.into()).await?;
                self.renderer.show(&change)
            }
            GoalCommands::Fix(args) => {
                let goal = self
                    .scheduler
                    .set_goal_fixed(&SetFixed {
                        goal_id: args.id,
                        fixed: !args.unfix,
                    })
                    .await?;
                self.renderer.show(&goal)
            }
            GoalCommands::Show(args) => {
                let goal = self.scheduler.get_goal(&Id::from(args)).await?;
                self.renderer.show(&goal)
            }
            GoalCommands::List(args) => {
                let goals = if args.by_number {
                    self.scheduler
                        .list_goals_by_number(&Id { id: args.plan_id })
                        .await?
                } else {
                    self.scheduler.list_goals(&ListGoals::from(&args)).await?
                };
                self.renderer.show(&Goals(goals))
            }
            GoalCommands::Reviews(args) => self.show_reviews(args).await,
        }
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        match command {
            DayCommands::Capacity(args) => {
                let capacity = self.scheduler.compute_capacity(&args.into()).await?;
                self.renderer.show(&capacity)
            }
            DayCommands::Check(args) => {
                let fit = self.scheduler.check_fit(&args.into()).await?;
                self.renderer.show(&fit)
            }
            DayCommands::Show(args) => {
                let schedule = self.scheduler.day_schedule(&args.into()).await?;
                self.renderer.show(&schedule)
            }
            DayCommands::Rebalance(args) => {
                let report = self.scheduler.rebalance_day(&args.into()).await?;
                self.renderer.show(&report)
            }
            DayCommands::Reorder(args) => {
                let goals = self.scheduler.reorder_day(&args.into()).await?;
                self.renderer.show(&Goals(goals))
            }
        }
    }

    pub async fn handle_taxonomy_command(&self, command: TaxonomyCommands) -> Result<()> {
        match command {
            TaxonomyCommands::Add(args) => {
                let node = self.scheduler.add_taxonomy_node(&args.into()).await?;
                self.renderer.show(&CreateResult::new(node))
            }
            TaxonomyCommands::List => {
                let nodes = self.scheduler.list_taxonomy_nodes().await?;
                self.renderer.show(&TaxonomyNodes(nodes))
            }
        }
    }

    pub async fn handle_import(&self, args: ImportArgs) -> Result<()> {
        let goals = read_import_file(&args.file)?;
        debug!("Importing {} rows into plan {}", goals.len(), args.plan_id);
        let report = self
            .scheduler
            .import_goals(&ImportGoals {
                plan_id: args.plan_id,
                goals,
            })
            .await
            .context("Import failed; nothing was written")?;
        self.renderer.show(&report)
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let plans = self.scheduler.list_plans(params).await?;
        self.renderer.show(&Plans(plans))
    }

    async fn show_plan_log(&self, args: PlanLogArgs) -> Result<()> {
        let id = Id { id: args.id };
        if args.omissions {
            let records = self.scheduler.omission_log(&id).await?;
            self.renderer.show(&OmissionLog(records))
        } else {
            let records = self.scheduler.redistribution_log(&id).await?;
            self.renderer.show(&RedistributionLog(records))
        }
    }

    async fn show_reviews(&self, args: ReviewsArgs) -> Result<()> {
        let id = Id { id: args.id };
        if args.generate {
            let outcome = self.scheduler.generate_reviews(&id).await?;
            self.renderer.show(&outcome)?;
        }
        let chain = self.scheduler.review_chain(&id).await?;
        self.renderer.show(&Goals(chain))
    }
}

/// Reads a JSON array of import rows from a file or, for `-`, stdin.
fn read_import_file(path: &Path) -> Result<Vec<ImportGoal>> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read import rows from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of goals", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_read_import_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"date": "2030-01-07", "goal_type": "study",
                 "taxonomy": {{"discipline_id": 1, "subject_id": 2}},
                 "planned_minutes": 60}}]"#
        )
        .unwrap();

        let rows = read_import_file(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].goal.planned_minutes, 60);
    }

    #[test]
    fn test_read_import_file_rejects_objects() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"date": "2030-01-07"}}"#).unwrap();

        let err = read_import_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a JSON array"));
    }
}
