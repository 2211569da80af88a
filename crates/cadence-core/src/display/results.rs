//! Display implementations for engine and operation results.

use std::fmt;

use super::datetime::Minutes;
use crate::{
    db::PlanUpdate,
    engine::{
        Capacity, CompletionOutcome, ConflictResolution, DaySchedule, DurationChange, FitCheck,
        ImportReport, OmissionOutcome, Placement, PlacementConflict, RebalanceReport,
        ReviewOutcome,
    },
    models::{Plan, TaxonomyNode},
};

fn write_warnings(f: &mut fmt::Formatter<'_>, warnings: &[String]) -> fmt::Result {
    if warnings.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Warnings:")?;
    for warning in warnings {
        writeln!(f, "- {warning}")?;
    }
    Ok(())
}

/// Wrapper for a freshly created resource.
///
/// ```rust
/// use cadence_core::{
///     display::CreateResult,
///     models::{TaxonomyKind, TaxonomyNode},
/// };
///
/// let node = TaxonomyNode {
///     id: 3,
///     kind: TaxonomyKind::Subject,
///     name: "Algebra".to_string(),
///     parent_id: Some(1),
/// };
/// let output = CreateResult::new(node).to_string();
/// assert!(output.starts_with("Created subject with ID: 3"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<TaxonomyNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} with ID: {}",
            self.resource.kind, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**{}** ({}): {} of {} used, ",
            self.date,
            self.date.strftime("%a"),
            Minutes(self.used),
            Minutes(self.capacity)
        )?;
        if self.is_overbooked() {
            writeln!(f, "overbooked by {}", Minutes(self.used - self.capacity))
        } else {
            writeln!(f, "{} left", Minutes(self.remaining))
        }
    }
}

impl fmt::Display for FitCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fits {
            return writeln!(
                f,
                "{} fits on {}; {} would be left.",
                Minutes(self.duration),
                self.date,
                Minutes(self.remaining)
            );
        }

        writeln!(
            f,
            "{} does not fit on {}: only {} left.",
            Minutes(self.duration),
            self.date,
            Minutes(self.remaining)
        )?;
        match self.next_available {
            Some(next) => writeln!(f, "Next date with room: {next}"),
            None => writeln!(f, "No date with room within the horizon."),
        }
    }
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.capacity)?;
        writeln!(f)?;
        if self.goals.is_empty() {
            return writeln!(f, "Nothing scheduled.");
        }
        for goal in &self.goals {
            write!(f, "{goal}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PlacementConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} had only {} left",
            self.requested,
            Minutes(self.remaining)
        )?;
        match self.resolution {
            ConflictResolution::Moved { to } => write!(f, "; moved to {to}"),
            ConflictResolution::Forced => write!(f, "; placed anyway"),
            ConflictResolution::Flagged => {
                write!(f, "; no room found, flagged for manual review")
            }
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scheduled goal {} on {}",
            self.goal.display_number(),
            self.resolved_date()
        )?;
        if let Some(conflict) = &self.conflict {
            writeln!(f)?;
            writeln!(f, "Conflict: {conflict}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.goal)?;
        write_warnings(f, &self.warnings)
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} goals, skipped {} duplicates.",
            self.placed.len(),
            self.duplicates.len()
        )?;
        let moved: Vec<_> = self.placed.iter().filter(|p| p.conflict.is_some()).collect();
        if !moved.is_empty() {
            writeln!(f)?;
            for placement in moved {
                if let Some(conflict) = &placement.conflict {
                    writeln!(f, "- {}: {conflict}", placement.goal.display_number())?;
                }
            }
        }
        write_warnings(f, &self.warnings)
    }
}

impl fmt::Display for RebalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            writeln!(
                f,
                "Checked {} dates; nothing had to move.",
                self.dates_checked
            )?;
            return write_warnings(f, &self.warnings);
        }

        writeln!(
            f,
            "Checked {} dates; moved {} goals.",
            self.dates_checked,
            self.moves.len()
        )?;
        if !self.moves.is_empty() {
            writeln!(f)?;
            for entry in &self.moves {
                writeln!(
                    f,
                    "- Goal {}: {} → {}",
                    entry.goal_id, entry.date_from, entry.date_to
                )?;
            }
        }
        if !self.flagged.is_empty() {
            writeln!(f)?;
            let ids: Vec<String> = self.flagged.iter().map(u64::to_string).collect();
            writeln!(
                f,
                "Flagged for manual review (no room found): {}",
                ids.join(", ")
            )?;
        }
        write_warnings(f, &self.warnings)
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reviews_created.is_empty() {
            writeln!(f, "No reviews created.")?;
        } else {
            writeln!(f, "Reviews created:")?;
            writeln!(f)?;
            for review in &self.reviews_created {
                writeln!(
                    f,
                    "- {} on {} ({})",
                    review.display_number(),
                    review.scheduled_date,
                    Minutes(review.planned_minutes)
                )?;
            }
        }
        write_warnings(f, &self.warnings)
    }
}

impl fmt::Display for CompletionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed goal {}", self.goal.display_number())?;
        writeln!(f)?;
        write!(f, "{}", self.goal)?;
        if !self.reviews_created.is_empty() {
            writeln!(f, "Reviews scheduled:")?;
            writeln!(f)?;
            for review in &self.reviews_created {
                writeln!(
                    f,
                    "- {} on {} ({})",
                    review.display_number(),
                    review.scheduled_date,
                    Minutes(review.planned_minutes)
                )?;
            }
        }
        write_warnings(f, &self.warnings)
    }
}

impl fmt::Display for OmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Omitted goal {}", self.goal.display_number())?;
        writeln!(f)?;
        write!(f, "{}", self.goal)?;
        write_warnings(f, &self.warnings)
    }
}

impl fmt::Display for DurationChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Goal {} now takes {}",
            self.goal.display_number(),
            Minutes(self.goal.planned_minutes)
        )?;
        writeln!(f)?;
        write!(f, "{}", self.rebalance)
    }
}

impl fmt::Display for PlanUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.plan.id)?;
        writeln!(f)?;
        write!(f, "{}", self.plan)?;
        if self.rebalance.dates_checked > 0 {
            writeln!(f)?;
            write!(f, "{}", self.rebalance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{RedistributionEntry, RedistributionReason};

    #[test]
    fn test_overbooked_capacity_display() {
        let capacity = Capacity {
            date: date(2030, 1, 7),
            capacity: 120,
            used: 150,
            remaining: 0,
        };
        let output = capacity.to_string();
        assert!(output.contains("(Mon)"));
        assert!(output.contains("overbooked by 30m"));
    }

    #[test]
    fn test_fit_check_display_names_next_date() {
        let check = FitCheck {
            date: date(2030, 1, 7),
            duration: 60,
            fits: false,
            used_after: 240,
            remaining: 0,
            next_available: Some(date(2030, 1, 8)),
        };
        let output = check.to_string();
        assert!(output.contains("does not fit on 2030-01-07"));
        assert!(output.contains("Next date with room: 2030-01-08"));
    }

    #[test]
    fn test_rebalance_report_display() {
        let report = RebalanceReport {
            dates_checked: 2,
            moves: vec![RedistributionEntry {
                plan_id: 1,
                goal_id: 9,
                date_from: date(2030, 1, 7),
                date_to: date(2030, 1, 8),
                reason: RedistributionReason::PlanEdited,
            }],
            flagged: vec![4],
            warnings: vec!["audit write failed".to_string()],
        };
        let output = report.to_string();
        assert!(output.contains("moved 1 goals"));
        assert!(output.contains("Goal 9: 2030-01-07 → 2030-01-08"));
        assert!(output.contains("no room found): 4"));
        assert!(output.contains("- audit write failed"));

        let idle = RebalanceReport {
            dates_checked: 3,
            ..Default::default()
        };
        assert!(idle.to_string().contains("nothing had to move"));
    }
}
