//! Command-line argument definitions using clap's derive API.
//!
//! Each argument struct converts into the matching interface-neutral
//! parameter type from [`cadence_core::params`], so clap attributes never
//! leak into the core crate.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Scheduler
//! ```

use std::path::PathBuf;

use cadence_core::{
    models::{
        GoalStatus, GoalType, NewGoal, NewPlan, PlanChanges, PlanStatus, TaxonomyKind,
        TaxonomyRef, WeekMask,
    },
    params::{
        AddTaxonomyNode, ChangeDuration, CheckFit, Id, ListGoals, ListPlans, MoveGoal, OmitGoal,
        PlaceGoal, PlanDate, RebalancePlan, ReorderDay, UpdatePlan,
    },
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;

/// Study-plan scheduler: place goals on days without overbooking them
#[derive(Parser)]
#[command(version, about, name = "cad")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Days to scan for room after a full date when a plan has no end date
    #[arg(long, global = true, default_value_t = 180)]
    pub horizon_days: u32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Inspect and adjust a single day of a plan
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage disciplines, subjects and topics
    #[command(alias = "t")]
    Taxonomy {
        #[command(subcommand)]
        command: TaxonomyCommands,
    },
    /// Import goals from a JSON file
    Import(ImportArgs),
}

// ============================================================================
// Plans
// ============================================================================

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan and its goal counts
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change a plan's title, budget, availability, end date or status
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Move overflowing goals off every date of a plan
    Rebalance(RebalancePlanArgs),
    /// Show the redistribution or omission log of a plan
    Log(PlanLogArgs),
}

/// Create a new plan
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Student the plan belongs to
    #[arg(long)]
    pub student: String,
    /// Daily study budget in hours (0.5 to 12)
    #[arg(long, default_value_t = 4.0)]
    pub hours: f64,
    /// Available weekdays, e.g. `mon,tue,wed` or a 7-bit mask (bit 0 = Sunday)
    #[arg(long, default_value = "mon,tue,wed,thu,fri")]
    pub days: WeekMask,
    /// First day of the plan (YYYY-MM-DD)
    #[arg(long)]
    pub start: Date,
    /// Last day of the plan (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,
}

impl From<CreatePlanArgs> for NewPlan {
    fn from(val: CreatePlanArgs) -> Self {
        NewPlan {
            student_id: val.student,
            title: val.title,
            hours_per_day: val.hours,
            availability: val.days,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// List plans
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Only plans of this student
    #[arg(long)]
    pub student: Option<String>,
    /// Only plans with this status (active, paused, completed)
    #[arg(long)]
    pub status: Option<PlanStatus>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            student_id: val.student,
            status: val.status,
        }
    }
}

#[derive(ClapArgs)]
pub struct IdArgs {
    /// Unique identifier of the resource
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a plan
///
/// Changing the hours or the available days moves goals off any date that
/// no longer has room, starting today.
#[derive(ClapArgs)]
pub struct UpdatePlanArgs {
    /// ID of the plan
    pub id: u64,
    #[arg(long)]
    pub title: Option<String>,
    /// New daily budget in hours
    #[arg(long)]
    pub hours: Option<f64>,
    /// New available weekdays
    #[arg(long)]
    pub days: Option<WeekMask>,
    /// New last day of the plan
    #[arg(long, conflicts_with = "no_end")]
    pub end: Option<Date>,
    /// Make the plan open-ended
    #[arg(long)]
    pub no_end: bool,
    /// New status (active, paused, completed)
    #[arg(long)]
    pub status: Option<PlanStatus>,
    /// First date redistribution may touch; defaults to today
    #[arg(long)]
    pub today: Option<Date>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        let end_date = if val.no_end {
            Some(None)
        } else {
            val.end.map(Some)
        };
        UpdatePlan {
            id: val.id,
            changes: PlanChanges {
                title: val.title,
                hours_per_day: val.hours,
                availability: val.days,
                end_date,
                status: val.status,
            },
            today: val.today,
        }
    }
}

#[derive(ClapArgs)]
pub struct RebalancePlanArgs {
    /// ID of the plan
    pub id: u64,
    /// First date to rebalance; defaults to the plan start
    #[arg(long)]
    pub from: Option<Date>,
}

impl From<RebalancePlanArgs> for RebalancePlan {
    fn from(val: RebalancePlanArgs) -> Self {
        RebalancePlan {
            plan_id: val.id,
            from: val.from,
        }
    }
}

#[derive(ClapArgs)]
pub struct PlanLogArgs {
    /// ID of the plan
    pub id: u64,
    /// Show omitted goals instead of moved ones
    #[arg(long)]
    pub omissions: bool,
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a goal and place it on a date
    #[command(alias = "a")]
    Add(AddGoalArgs),
    /// Move a pending goal to another date
    #[command(alias = "mv")]
    Move(MoveGoalArgs),
    /// Mark a goal done and schedule its reviews
    #[command(alias = "c")]
    Complete(CompleteGoalArgs),
    /// Skip a goal with a reason
    Omit(OmitGoalArgs),
    /// Change a goal's planned duration
    Duration(DurationArgs),
    /// Pin a goal so rebalancing leaves it alone
    Fix(FixGoalArgs),
    /// Show details of a goal
    #[command(alias = "s")]
    Show(IdArgs),
    /// List a plan's goals
    #[command(aliases = ["l", "ls"])]
    List(ListGoalsArgs),
    /// Show the generated reviews of a goal
    Reviews(ReviewsArgs),
}

/// Create a goal and place it
///
/// When the date has no room left the goal lands on the next day that does,
/// unless `--force` is given.
#[derive(ClapArgs)]
pub struct AddGoalArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Requested date (YYYY-MM-DD)
    pub date: Date,
    /// Goal type: study, practice_questions or review
    #[arg(long = "type", default_value = "study")]
    pub goal_type: GoalType,
    #[arg(long)]
    pub discipline: u64,
    #[arg(long)]
    pub subject: u64,
    #[arg(long)]
    pub topic: Option<u64>,
    /// Planned duration in minutes (15 to 240)
    #[arg(long)]
    pub minutes: u32,
    /// Free-text study guidance
    #[arg(long)]
    pub guidance: Option<String>,
    /// Exempt the goal from automatic redistribution
    #[arg(long)]
    pub fixed: bool,
    /// Place on the requested date even when it is full
    #[arg(long)]
    pub force: bool,
}

impl From<AddGoalArgs> for PlaceGoal {
    fn from(val: AddGoalArgs) -> Self {
        PlaceGoal {
            plan_id: val.plan_id,
            date: val.date,
            force: val.force,
            goal: NewGoal {
                goal_type: val.goal_type,
                taxonomy: TaxonomyRef {
                    discipline_id: val.discipline,
                    subject_id: val.subject,
                    topic_id: val.topic,
                },
                planned_minutes: val.minutes,
                guidance: val.guidance,
                fixed: val.fixed,
            },
        }
    }
}

#[derive(ClapArgs)]
pub struct MoveGoalArgs {
    /// ID of the goal
    pub id: u64,
    /// Target date (YYYY-MM-DD)
    pub date: Date,
    /// Move even when the target date is full
    #[arg(long)]
    pub force: bool,
}

impl From<MoveGoalArgs> for MoveGoal {
    fn from(val: MoveGoalArgs) -> Self {
        MoveGoal {
            goal_id: val.id,
            date: val.date,
            force: val.force,
        }
    }
}

#[derive(ClapArgs)]
pub struct CompleteGoalArgs {
    /// ID of the goal
    pub id: u64,
    /// Minutes actually spent
    #[arg(long, required_unless_present = "seconds", conflicts_with = "seconds")]
    pub minutes: Option<u32>,
    /// Seconds actually spent
    #[arg(long)]
    pub seconds: Option<u32>,
    /// Completion date; defaults to today
    #[arg(long)]
    pub on: Option<Date>,
}

impl CompleteGoalArgs {
    /// Actual duration in seconds.
    pub fn actual_seconds(&self) -> u32 {
        match (self.seconds, self.minutes) {
            (Some(seconds), _) => seconds,
            (None, Some(minutes)) => minutes.saturating_mul(60),
            (None, None) => 0,
        }
    }
}

#[derive(ClapArgs)]
pub struct OmitGoalArgs {
    /// ID of the goal
    pub id: u64,
    /// Why the goal is skipped
    #[arg(long)]
    pub reason: String,
}

impl From<OmitGoalArgs> for OmitGoal {
    fn from(val: OmitGoalArgs) -> Self {
        OmitGoal {
            goal_id: val.id,
            reason: val.reason,
        }
    }
}

#[derive(ClapArgs)]
pub struct DurationArgs {
    /// ID of the goal
    pub id: u64,
    /// New planned duration in minutes (15 to 240)
    pub minutes: u32,
}

impl From<DurationArgs> for ChangeDuration {
    fn from(val: DurationArgs) -> Self {
        ChangeDuration {
            goal_id: val.id,
            planned_minutes: val.minutes,
        }
    }
}

#[derive(ClapArgs)]
pub struct FixGoalArgs {
    /// ID of the goal
    pub id: u64,
    /// Unpin instead
    #[arg(long)]
    pub unfix: bool,
}

/// List a plan's goals
///
/// Goals are grouped by date. `--by-number` lists them in numbering order
/// instead, ignoring the filters.
#[derive(ClapArgs)]
pub struct ListGoalsArgs {
    /// ID of the plan
    pub plan_id: u64,
    #[arg(long)]
    pub from: Option<Date>,
    #[arg(long)]
    pub until: Option<Date>,
    /// Only goals with this status (pending, done, omitted)
    #[arg(long)]
    pub status: Option<GoalStatus>,
    /// Only goals flagged for manual review
    #[arg(long)]
    pub flagged: bool,
    /// Order by goal number instead of date
    #[arg(long, conflicts_with_all = ["from", "until", "status", "flagged"])]
    pub by_number: bool,
}

impl From<&ListGoalsArgs> for ListGoals {
    fn from(val: &ListGoalsArgs) -> Self {
        ListGoals {
            plan_id: val.plan_id,
            from: val.from,
            until: val.until,
            status: val.status,
            flagged: val.flagged,
        }
    }
}

#[derive(ClapArgs)]
pub struct ReviewsArgs {
    /// ID of the completed goal
    pub id: u64,
    /// Generate the review chain if it is missing
    #[arg(long)]
    pub generate: bool,
}

// ============================================================================
// Days
// ============================================================================

#[derive(Subcommand)]
pub enum DayCommands {
    /// Minutes budgeted, used and left on a date
    #[command(alias = "cap")]
    Capacity(DayArgs),
    /// Check whether a duration would fit on a date
    Check(CheckFitArgs),
    /// Show a date's goals in order
    #[command(alias = "s")]
    Show(DayArgs),
    /// Move overflowing goals off a date
    Rebalance(DayArgs),
    /// Set the order of a date's goals
    Reorder(ReorderArgs),
}

#[derive(ClapArgs)]
pub struct DayArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Date (YYYY-MM-DD)
    pub date: Date,
}

impl From<DayArgs> for PlanDate {
    fn from(val: DayArgs) -> Self {
        PlanDate {
            plan_id: val.plan_id,
            date: val.date,
        }
    }
}

#[derive(ClapArgs)]
pub struct CheckFitArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Date (YYYY-MM-DD)
    pub date: Date,
    /// Candidate duration in minutes
    pub minutes: u32,
}

impl From<CheckFitArgs> for CheckFit {
    fn from(val: CheckFitArgs) -> Self {
        CheckFit {
            plan_id: val.plan_id,
            date: val.date,
            duration: val.minutes,
        }
    }
}

#[derive(ClapArgs)]
pub struct ReorderArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Date (YYYY-MM-DD)
    pub date: Date,
    /// Every goal of the date, in the new order
    #[arg(required = true, num_args = 1..)]
    pub goal_ids: Vec<u64>,
}

impl From<ReorderArgs> for ReorderDay {
    fn from(val: ReorderArgs) -> Self {
        ReorderDay {
            plan_id: val.plan_id,
            date: val.date,
            goal_ids: val.goal_ids,
        }
    }
}

// ============================================================================
// Taxonomy and import
// ============================================================================

#[derive(Subcommand)]
pub enum TaxonomyCommands {
    /// Add a discipline, subject or topic
    #[command(alias = "a")]
    Add(AddNodeArgs),
    /// List all taxonomy nodes
    #[command(aliases = ["l", "ls"])]
    List,
}

#[derive(ClapArgs)]
pub struct AddNodeArgs {
    /// discipline, subject or topic
    pub kind: TaxonomyKind,
    /// Display name
    pub name: String,
    /// Parent node (a discipline for subjects, a subject for topics)
    #[arg(long)]
    pub parent: Option<u64>,
}

impl From<AddNodeArgs> for AddTaxonomyNode {
    fn from(val: AddNodeArgs) -> Self {
        AddTaxonomyNode {
            kind: val.kind,
            name: val.name,
            parent_id: val.parent,
        }
    }
}

/// Import goals into a plan
///
/// The file holds a JSON array of rows such as
/// `{"date": "2030-01-07", "goal_type": "study", "taxonomy":
/// {"discipline_id": 1, "subject_id": 2}, "planned_minutes": 60}`. Rows whose
/// content already exists in the plan are skipped.
#[derive(ClapArgs)]
pub struct ImportArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Path to the JSON file, or `-` for standard input
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_update_args_clear_end_date() {
        let args = Args::parse_from(["cad", "plan", "update", "3", "--no-end", "--hours", "2"]);
        let Some(Commands::Plan {
            command: PlanCommands::Update(update),
        }) = args.command
        else {
            panic!("expected plan update");
        };
        let params = UpdatePlan::from(update);
        assert_eq!(params.changes.end_date, Some(None));
        assert_eq!(params.changes.hours_per_day, Some(2.0));
        assert!(params.changes.affects_capacity());
    }

    #[test]
    fn test_complete_args_seconds_win() {
        let args = Args::parse_from(["cad", "goal", "complete", "4", "--seconds", "90"]);
        let Some(Commands::Goal {
            command: GoalCommands::Complete(complete),
        }) = args.command
        else {
            panic!("expected goal complete");
        };
        assert_eq!(complete.actual_seconds(), 90);
    }

    #[test]
    fn test_add_goal_parses_type_and_days() {
        let args = Args::parse_from([
            "cad",
            "goal",
            "add",
            "1",
            "2030-01-07",
            "--type",
            "practice",
            "--discipline",
            "1",
            "--subject",
            "2",
            "--minutes",
            "45",
        ]);
        let Some(Commands::Goal {
            command: GoalCommands::Add(add),
        }) = args.command
        else {
            panic!("expected goal add");
        };
        let params = PlaceGoal::from(add);
        assert_eq!(params.goal.goal_type, GoalType::PracticeQuestions);
        assert_eq!(params.goal.planned_minutes, 45);
        assert!(!params.force);
    }
}
