//! High-level async API over the scheduling engine.
//!
//! The [`Scheduler`] is what front ends talk to. Every call opens its own
//! connection on a blocking task, so a scheduler can be shared freely
//! between async tasks while SQLite's write lock keeps placements on the
//! same plan and date from interleaving.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Scheduler    │    │    Database     │    │     Engine      │
//! │ (plan_ops,      │───▶│ (schedule_ops,  │───▶│ (placement,     │
//! │  goal_ops, ...) │    │  *_queries)     │    │  review, ...)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   async, params         one transaction        pure, store traits
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cadence_core::{
//!     models::{NewPlan, WeekMask},
//!     SchedulerBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("/tmp/cadence-example.db"))
//!     .with_horizon_days(90)
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
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    engine::ScheduleConfig,
    error::{Result, SchedulerError},
};

pub mod builder;
pub mod day_ops;
pub mod goal_ops;
pub mod plan_ops;


pub use builder::SchedulerBuilder;

/// Main scheduler interface for plans, goals and their calendar.
pub struct Scheduler {
    pub(crate) db_path: PathBuf,
    pub(crate) config: ScheduleConfig,
}

impl Scheduler {
    pub(crate) fn new(db_path: PathBuf, config: ScheduleConfig) -> Self {
        Self { db_path, config }
    }

    /// Runs `op` on a fresh connection on the blocking pool.
    pub(crate) async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database, &ScheduleConfig) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let config = self.config;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db, &config)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Today's date in the system time zone.
pub(crate) fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}
