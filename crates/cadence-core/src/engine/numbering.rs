//! Goal numbering and ordering.
//!
//! Every authored goal takes the next value of its plan's counter as its
//! base number. Generated reviews reuse their origin's base and add a
//! 1-based suffix. Numbers never change after creation; only the per-day
//! position is recomputed when a goal moves.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Largest base number that still sorts correctly in an order key.
pub const MAX_NUMBER_BASE: u32 = 999_999;

/// Stable number of a goal within its plan.
///
/// The derived ordering is base first, then suffix, with an absent suffix
/// sorting before any review of the same base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoalNumber {
    pub base: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<u8>,
}

impl GoalNumber {
    /// Number of an authored goal.
    pub fn origin(base: u32) -> Self {
        Self { base, suffix: None }
    }

    /// Number of the `position`-th review generated from `origin`.
    pub fn review(origin: GoalNumber, position: u8) -> Self {
        Self {
            base: origin.base,
            suffix: Some(position),
        }
    }

    /// `#007` for authored goals, `#007.2` for their reviews.
    ///
    /// ```rust
    /// use cadence_core::engine::GoalNumber;
    ///
    /// let origin = GoalNumber::origin(7);
    /// assert_eq!(origin.display_number(), "#007");
    /// assert_eq!(GoalNumber::review(origin, 2).display_number(), "#007.2");
    /// ```
    pub fn display_number(&self) -> String {
        match self.suffix {
            None => format!("#{:03}", self.base),
            Some(suffix) => format!("#{:03}.{suffix}", self.base),
        }
    }

    /// Plan-wide key whose string order matches `(base, suffix)` order.
    ///
    /// ```rust
    /// use cadence_core::engine::GoalNumber;
    ///
    /// assert_eq!(GoalNumber::origin(12).order_key(), "000012/0000");
    /// assert_eq!(GoalNumber::review(GoalNumber::origin(12), 3).order_key(), "000012/0003");
    /// ```
    pub fn order_key(&self) -> String {
        format!("{:06}/{:04}", self.base, self.suffix.unwrap_or(0))
    }
}

/// The base number following `last`, or an error once the plan has used up
/// the key space.
pub fn next_number_base(last: u32) -> Result<u32> {
    if last >= MAX_NUMBER_BASE {
        return Err(SchedulerError::invalid_input("last_number_base")
            .with_reason(format!("Plan already holds {MAX_NUMBER_BASE} goals")));
    }
    Ok(last + 1)
}

/// Positions 1..=n for goals in the given order.
pub fn contiguous_positions(goal_ids: &[u64]) -> Vec<(u64, u32)> {
    goal_ids
        .iter()
        .zip(1u32..)
        .map(|(id, position)| (*id, position))
        .collect()
}

/// Checks that `requested` is a permutation of the goals currently on a
/// day.
pub fn validate_reorder(current: &[u64], requested: &[u64]) -> Result<()> {
    let current_set: HashSet<u64> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());

    for id in requested {
        if !seen.insert(*id) {
            return Err(SchedulerError::invalid_input("goal_ids")
                .with_reason(format!("Goal {id} is listed more than once")));
        }
        if !current_set.contains(id) {
            return Err(SchedulerError::invalid_input("goal_ids")
                .with_reason(format!("Goal {id} is not scheduled on this day")));
        }
    }

    if seen.len() != current_set.len() {
        return Err(SchedulerError::invalid_input("goal_ids").with_reason(format!(
            "Expected all {} goals of the day, got {}",
            current_set.len(),
            seen.len()
        )));
    }
    Ok(())
}
