//! Append-only audit records for moves and omissions.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Why a goal was moved to another day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedistributionReason {
    /// Plan hours or availability changed
    PlanEdited,
    /// A goal's planned duration changed
    DurationChanged,
    /// An explicit "rebalance day" request
    ManualRebalance,
    /// A pending goal was rescheduled to another day
    Rescheduled,
}

impl RedistributionReason {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RedistributionReason::PlanEdited => "plan_edited",
            RedistributionReason::DurationChanged => "duration_changed",
            RedistributionReason::ManualRebalance => "manual_rebalance",
            RedistributionReason::Rescheduled => "rescheduled",
        }
    }
}

impl FromStr for RedistributionReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan_edited" => Ok(RedistributionReason::PlanEdited),
            "duration_changed" => Ok(RedistributionReason::DurationChanged),
            "manual_rebalance" => Ok(RedistributionReason::ManualRebalance),
            "rescheduled" => Ok(RedistributionReason::Rescheduled),
            _ => Err(format!("Invalid redistribution reason: {s}")),
        }
    }
}

/// A goal move that has not been written to the audit trail yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedistributionEntry {
    pub plan_id: u64,
    pub goal_id: u64,
    pub date_from: Date,
    pub date_to: Date,
    pub reason: RedistributionReason,
}

/// A stored redistribution record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedistributionRecord {
    pub id: u64,
    #[serde(flatten)]
    pub entry: RedistributionEntry,
    pub recorded_at: Timestamp,
}

/// An omission that has not been written to the audit trail yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OmissionEntry {
    pub plan_id: u64,
    pub goal_id: u64,
    pub scheduled_date: Date,
    pub reason: String,
}

/// A stored omission record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OmissionRecord {
    pub id: u64,
    #[serde(flatten)]
    pub entry: OmissionEntry,
    pub recorded_at: Timestamp,
}
