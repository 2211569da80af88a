//! In-memory store and fixtures for engine unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use jiff::{civil::Date, Timestamp};

use super::{
    ledger::Ledger,
    numbering::{contiguous_positions, next_number_base, GoalNumber},
    store::{AuditSink, GoalDraft, ScheduleStore, TaxonomyLookup},
};
use crate::{
    error::{Result, SchedulerError},
    models::{
        Goal, GoalKind, GoalStatus, GoalType, NewGoal, OmissionEntry, Plan, PlanStatus,
        RedistributionEntry, TaxonomyKind, TaxonomyNode, TaxonomyRef, WeekMask,
    },
};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    goals: BTreeMap<u64, Goal>,
    nodes: HashMap<u64, TaxonomyNode>,
    redistributions: Vec<RedistributionEntry>,
    omissions: Vec<OmissionEntry>,
    last_base: u32,
    next_id: u64,
    fail_audit: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mathematics(1) > Algebra(2) > Quadratics(3), History(5) > Rome(4).
    pub(crate) fn with_taxonomy() -> Self {
        let mut store = Self::new();
        for (id, kind, name, parent_id) in [
            (1, TaxonomyKind::Discipline, "Mathematics", None),
            (2, TaxonomyKind::Subject, "Algebra", Some(1)),
            (3, TaxonomyKind::Topic, "Quadratics", Some(2)),
            (4, TaxonomyKind::Subject, "Rome", Some(5)),
            (5, TaxonomyKind::Discipline, "History", None),
        ] {
            store.nodes.insert(
                id,
                TaxonomyNode {
                    id,
                    kind,
                    name: name.to_string(),
                    parent_id,
                },
            );
        }
        store
    }

    /// Stores `goal` as given, at the end of its day, and returns its new ID.
    pub(crate) fn push(&mut self, mut goal: Goal) -> u64 {
        self.next_id += 1;
        goal.id = self.next_id;
        goal.position = self.day_ids(goal.plan_id, goal.scheduled_date).len() as u32 + 1;
        self.last_base = self.last_base.max(goal.number.base);
        self.goals.insert(goal.id, goal);
        self.next_id
    }

    pub(crate) fn goals(&self) -> Vec<&Goal> {
        self.goals.values().collect()
    }

    pub(crate) fn redistributions(&self) -> &[RedistributionEntry] {
        &self.redistributions
    }

    pub(crate) fn omissions(&self) -> &[OmissionEntry] {
        &self.omissions
    }

    pub(crate) fn last_number_base(&self) -> u32 {
        self.last_base
    }

    /// Makes every later audit write fail.
    pub(crate) fn fail_audit_writes(&mut self) {
        self.fail_audit = true;
    }

    fn day_ids(&self, plan_id: u64, date: Date) -> Vec<u64> {
        let mut day: Vec<&Goal> = self
            .goals
            .values()
            .filter(|goal| goal.plan_id == plan_id && goal.scheduled_date == date)
            .collect();
        day.sort_by_key(|goal| (goal.position, goal.id));
        day.into_iter().map(|goal| goal.id).collect()
    }

    fn compact(&mut self, plan_id: u64, date: Date) {
        let ids = self.day_ids(plan_id, date);
        for (id, position) in contiguous_positions(&ids) {
            if let Some(goal) = self.goals.get_mut(&id) {
                goal.position = position;
            }
        }
    }

    fn goal_mut(&mut self, id: u64) -> Result<&mut Goal> {
        self.goals
            .get_mut(&id)
            .ok_or(SchedulerError::GoalNotFound { id })
    }

    fn audit_guard(&self) -> Result<()> {
        if self.fail_audit {
            return Err(SchedulerError::Configuration {
                message: "audit log unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Ledger for MemoryStore {
    fn goals_on(&self, plan_id: u64, date: Date) -> Result<Vec<Goal>> {
        Ok(self
            .day_ids(plan_id, date)
            .into_iter()
            .filter_map(|id| self.goals.get(&id).cloned())
            .collect())
    }
}

impl TaxonomyLookup for MemoryStore {
    fn taxonomy_node(&self, id: u64) -> Result<Option<TaxonomyNode>> {
        Ok(self.nodes.get(&id).cloned())
    }
}

impl AuditSink for MemoryStore {
    fn record_redistribution(&mut self, entry: &RedistributionEntry) -> Result<()> {
        self.audit_guard()?;
        self.redistributions.push(*entry);
        Ok(())
    }

    fn record_omission(&mut self, entry: &OmissionEntry) -> Result<()> {
        self.audit_guard()?;
        self.omissions.push(entry.clone());
        Ok(())
    }
}

impl ScheduleStore for MemoryStore {
    fn goal(&self, id: u64) -> Result<Goal> {
        self.goals
            .get(&id)
            .cloned()
            .ok_or(SchedulerError::GoalNotFound { id })
    }

    fn allocate_number_base(&mut self, _plan_id: u64) -> Result<u32> {
        self.last_base = next_number_base(self.last_base)?;
        Ok(self.last_base)
    }

    fn insert_goal(&mut self, draft: GoalDraft) -> Result<Goal> {
        let now = Timestamp::now();
        let goal = Goal {
            id: 0,
            plan_id: draft.plan_id,
            kind: draft.kind,
            goal_type: draft.goal_type,
            status: GoalStatus::Pending,
            taxonomy: draft.taxonomy,
            scheduled_date: draft.scheduled_date,
            position: 0,
            planned_minutes: draft.planned_minutes,
            actual_seconds: None,
            completed_on: None,
            guidance: draft.guidance,
            fixed: draft.fixed,
            needs_review: draft.needs_review,
            omission_reason: None,
            content_hash: draft.content_hash,
            number: draft.number,
            created_at: now,
            updated_at: now,
        };
        let id = self.push(goal);
        self.goal(id)
    }

    fn move_goal(&mut self, goal_id: u64, to: Date) -> Result<Goal> {
        let (plan_id, from) = {
            let goal = self.goal_mut(goal_id)?;
            (goal.plan_id, goal.scheduled_date)
        };
        let position = self.day_ids(plan_id, to).len() as u32 + 1;
        {
            let goal = self.goal_mut(goal_id)?;
            goal.scheduled_date = to;
            goal.position = position;
            goal.needs_review = false;
            goal.updated_at = Timestamp::now();
        }
        self.compact(plan_id, from);
        self.goal(goal_id)
    }

    fn set_needs_review(&mut self, goal_id: u64, flagged: bool) -> Result<()> {
        self.goal_mut(goal_id)?.needs_review = flagged;
        Ok(())
    }

    fn set_planned_minutes(
        &mut self,
        goal_id: u64,
        minutes: u32,
        content_hash: &str,
    ) -> Result<Goal> {
        let goal = self.goal_mut(goal_id)?;
        goal.planned_minutes = minutes;
        goal.content_hash = content_hash.to_string();
        Ok(goal.clone())
    }

    fn mark_done(&mut self, goal_id: u64, actual_seconds: u32, completed_on: Date) -> Result<Goal> {
        let goal = self.goal_mut(goal_id)?;
        goal.status = GoalStatus::Done;
        goal.actual_seconds = Some(actual_seconds);
        goal.completed_on = Some(completed_on);
        Ok(goal.clone())
    }

    fn mark_omitted(&mut self, goal_id: u64, reason: &str) -> Result<Goal> {
        let goal = self.goal_mut(goal_id)?;
        goal.status = GoalStatus::Omitted;
        goal.omission_reason = Some(reason.to_string());
        Ok(goal.clone())
    }

    fn review_chain(&self, origin_id: u64) -> Result<Vec<Goal>> {
        let mut chain: Vec<Goal> = self
            .goals
            .values()
            .filter(|goal| goal.parent_id() == Some(origin_id))
            .cloned()
            .collect();
        chain.sort_by_key(|goal| goal.number);
        Ok(chain)
    }

    fn pending_dates(&self, plan_id: u64, from: Date) -> Result<Vec<Date>> {
        let mut dates: Vec<Date> = self
            .goals
            .values()
            .filter(|goal| {
                goal.plan_id == plan_id
                    && goal.status == GoalStatus::Pending
                    && goal.scheduled_date >= from
            })
            .map(|goal| goal.scheduled_date)
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    fn content_hashes(&self, plan_id: u64) -> Result<HashSet<String>> {
        Ok(self
            .goals
            .values()
            .filter(|goal| goal.plan_id == plan_id && !goal.is_omitted())
            .map(|goal| goal.content_hash.clone())
            .collect())
    }
}

/// Plan 1: weekdays, four hours a day, open-ended from 2030-01-01.
pub(crate) fn weekday_plan() -> Plan {
    let now = Timestamp::now();
    Plan {
        id: 1,
        student_id: "student-1".to_string(),
        title: "Finals".to_string(),
        hours_per_day: 4.0,
        availability: WeekMask::WEEKDAYS,
        start_date: jiff::civil::date(2030, 1, 1),
        end_date: None,
        status: PlanStatus::Active,
        last_number_base: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Mathematics / Algebra, no topic.
pub(crate) fn algebra() -> TaxonomyRef {
    TaxonomyRef {
        discipline_id: 1,
        subject_id: 2,
        topic_id: None,
    }
}

pub(crate) fn new_goal(goal_type: GoalType, planned_minutes: u32) -> NewGoal {
    NewGoal {
        goal_type,
        taxonomy: algebra(),
        planned_minutes,
        guidance: None,
        fixed: false,
    }
}

/// An unsaved pending study goal; `MemoryStore::push` assigns its ID.
pub(crate) fn pending_goal(plan: &Plan, base: u32, date: Date, planned_minutes: u32) -> Goal {
    let now = Timestamp::now();
    Goal {
        id: 0,
        plan_id: plan.id,
        kind: GoalKind::Origin,
        goal_type: GoalType::Study,
        status: GoalStatus::Pending,
        taxonomy: algebra(),
        scheduled_date: date,
        position: 0,
        planned_minutes,
        actual_seconds: None,
        completed_on: None,
        guidance: None,
        fixed: false,
        needs_review: false,
        omission_reason: None,
        content_hash: format!("hash-{base}"),
        number: GoalNumber::origin(base),
        created_at: now,
        updated_at: now,
    }
}
