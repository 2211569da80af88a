//! Display implementations for domain models.
//!
//! Plans and goals render as markdown sections; statuses and other small
//! enums render as their stored names.

use std::fmt;

use super::datetime::{LocalDateTime, Minutes};
use crate::{
    engine::{daily_minutes, GoalNumber},
    models::{
        Goal, GoalStatus, GoalType, OmissionRecord, Plan, PlanStatus, PlanSummary,
        RedistributionReason, RedistributionRecord, TaxonomyKind, TaxonomyNode, TaxonomyRef, WeekMask,
    },
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RedistributionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().replace('_', " "))
    }
}

impl fmt::Display for GoalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_number())
    }
}

impl fmt::Display for WeekMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.day_names().join(", "))
    }
}

impl fmt::Display for TaxonomyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "discipline {} / subject {}",
            self.discipline_id, self.subject_id
        )?;
        if let Some(topic) = self.topic_id {
            write!(f, " / topic {topic}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Student: {}", self.student_id)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(
            f,
            "- Daily budget: {}",
            Minutes(daily_minutes(self.hours_per_day))
        )?;
        writeln!(f, "- Available: {}", self.availability)?;
        match self.end_date {
            Some(end) => writeln!(f, "- Runs: {} to {end}", self.start_date)?,
            None => writeln!(f, "- Runs: from {}, open-ended", self.start_date)?,
        }
        writeln!(f, "- Goals numbered: {}", self.last_number_base)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;
        writeln!(f)?;
        writeln!(
            f,
            "Goals: {} total, {} done, {} pending, {} omitted",
            self.total_goals(),
            self.done_goals,
            self.pending_goals,
            self.omitted_goals
        )?;
        if self.flagged_goals > 0 {
            writeln!(
                f,
                "**{} goals need manual review.**",
                self.flagged_goals
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} {} (ID: {}, {})",
            self.display_number(),
            self.goal_type,
            self.id,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "- Scheduled: {} (position {})",
            self.scheduled_date, self.position
        )?;
        writeln!(f, "- Planned: {}", Minutes(self.planned_minutes))?;
        if let Some(secs) = self.actual_seconds {
            writeln!(f, "- Actual: {}", Minutes(secs.div_ceil(60)))?;
        }
        if let Some(completed_on) = self.completed_on {
            writeln!(f, "- Completed on: {completed_on}")?;
        }
        writeln!(f, "- Taxonomy: {}", self.taxonomy)?;
        if let Some(parent_id) = self.parent_id() {
            writeln!(f, "- Review of goal {parent_id}")?;
        }
        if self.fixed {
            writeln!(f, "- Fixed: not moved by rebalancing")?;
        }
        if self.needs_review {
            writeln!(f, "- **Needs manual review**: left on an overbooked day")?;
        }
        if let Some(reason) = &self.omission_reason {
            writeln!(f, "- Omitted because: {reason}")?;
        }

        if let Some(guidance) = &self.guidance {
            writeln!(f)?;
            writeln!(f, "{guidance}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for TaxonomyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} ({}, ID: {})", self.name, self.kind, self.id)?;
        if let Some(parent) = self.parent_id {
            write!(f, " under {parent}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for RedistributionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- Goal {}: {} → {} ({}, {})",
            self.entry.goal_id,
            self.entry.date_from,
            self.entry.date_to,
            self.entry.reason,
            LocalDateTime(&self.recorded_at)
        )
    }
}

impl fmt::Display for OmissionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- Goal {} on {}: {} ({})",
            self.entry.goal_id,
            self.entry.scheduled_date,
            self.entry.reason,
            LocalDateTime(&self.recorded_at)
        )
    }
}
