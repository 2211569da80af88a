//! Core library for Cadence, a study-plan scheduling and capacity engine.
//!
//! A plan gives a student a weekly availability pattern and a daily time
//! budget. Goals (study, practice questions, reviews) are placed on calendar
//! days without overbooking them; conflicts are resolved by moving a goal to
//! the next day with room, and completing a study goal schedules three
//! spaced reviews.
//!
//! - [`engine`]: the storage-agnostic scheduling algorithms
//! - [`db`]: SQLite persistence; every mutation is one immediate transaction
//! - [`scheduler`]: the async API front ends use
//! - [`display`]: markdown rendering of models and results
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{
//!     models::{GoalType, NewGoal, NewPlan, TaxonomyKind, TaxonomyRef, WeekMask},
//!     params::{AddTaxonomyNode, PlaceGoal},
//!     SchedulerBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("cadence.db"))
//!     .build()
//!     .await?;
//!
//! let plan = scheduler
//!     .create_plan(&NewPlan {
//!         student_id: "student-7".to_string(),
//!         title: "Entrance exam".to_string(),
//!         hours_per_day: 4.0,
//!         availability: WeekMask::WEEKDAYS,
//!         start_date: date(2030, 1, 7),
//!         end_date: None,
//!     })
//!     .await?;
//!
//! let maths = scheduler
//!     .add_taxonomy_node(&AddTaxonomyNode {
//!         kind: TaxonomyKind::Discipline,
//!         name: "Mathematics".to_string(),
//!         parent_id: None,
//!     })
//!     .await?;
//! let algebra = scheduler
//!     .add_taxonomy_node(&AddTaxonomyNode {
//!         kind: TaxonomyKind::Subject,
//!         name: "Algebra".to_string(),
//!         parent_id: Some(maths.id),
//!     })
//!     .await?;
//!
//! let placement = scheduler
//!     .place_goal(&PlaceGoal {
//!         plan_id: plan.id,
//!         date: date(2030, 1, 7),
//!         force: false,
//!         goal: NewGoal {
//!             goal_type: GoalType::Study,
//!             taxonomy: TaxonomyRef {
//!                 discipline_id: maths.id,
//!                 subject_id: algebra.id,
//!                 topic_id: None,
//!             },
//!             planned_minutes: 60,
//!             guidance: None,
//!             fixed: false,
//!         },
//!     })
//!     .await?;
//! println!("{placement}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod scheduler;

// Re-export commonly used types
pub use db::{Database, PlanUpdate};
pub use display::{
    CreateResult, Goals, LocalDateTime, Minutes, OmissionLog, Plans, RedistributionLog,
    TaxonomyNodes,
};
pub use engine::{
    Capacity, CompletionOutcome, ConflictResolution, DaySchedule, DurationChange, FitCheck,
    ImportReport, OmissionOutcome, Placement, PlacementConflict, RebalanceReport, ReviewOutcome,
    ScheduleConfig,
};
pub use error::{Result, SchedulerError};
pub use models::{
    Goal, GoalFilter, GoalStatus, GoalType, Plan, PlanFilter, PlanStatus, TaxonomyRef, WeekMask,
};
pub use scheduler::{Scheduler, SchedulerBuilder};
