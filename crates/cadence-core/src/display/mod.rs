//! Markdown rendering of models and operation results.
//!
//! Domain models and engine results implement [`std::fmt::Display`] here,
//! away from their definitions. Collections are wrapped in newtypes so a list
//! of plans or a log of moves has its own heading and empty-case message.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Models and     │    │ Display impls   │    │    Markdown     │
//! │  engine results │───▶│ & collection    │───▶│ (rendered by    │
//! │                 │    │   wrappers      │    │  the CLI)       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `Plans`, `Goals`, `TaxonomyNodes`, audit logs
//! - [`results`]: capacity, fit checks, placements, rebalances, completions
//! - [`datetime`]: timestamp and duration formatting
//! - [`models`]: plans, goals, taxonomy nodes, statuses
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{display::Minutes, engine::Capacity};
//! use jiff::civil::date;
//!
//! let capacity = Capacity {
//!     date: date(2030, 1, 7),
//!     capacity: 240,
//!     used: 180,
//!     remaining: 60,
//! };
//! let output = capacity.to_string();
//! assert!(output.contains("2030-01-07"));
//! assert!(output.contains("1h 00m left"));
//! assert_eq!(Minutes(95).to_string(), "1h 35m");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Goals, OmissionLog, Plans, RedistributionLog, TaxonomyNodes};
pub use datetime::{LocalDateTime, Minutes};
pub use results::CreateResult;
