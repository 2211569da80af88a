//! Collaborator traits the engine needs from persistence.
//!
//! A store is expected to operate inside one write transaction per engine
//! call so ledger reads and placement writes cannot interleave with another
//! writer.

use std::collections::HashSet;

use jiff::civil::Date;

use super::{ledger::Ledger, numbering::GoalNumber};
use crate::{
    error::{Result, SchedulerError},
    models::{
        Goal, GoalKind, GoalType, OmissionEntry, RedistributionEntry, TaxonomyKind, TaxonomyNode,
        TaxonomyRef,
    },
};

/// Read-only lookup into the subject taxonomy.
pub trait TaxonomyLookup {
    fn taxonomy_node(&self, id: u64) -> Result<Option<TaxonomyNode>>;
}

/// Append-only audit trail. Failures are reported as warnings by the engine
/// and never undo the scheduling change they describe.
pub trait AuditSink {
    fn record_redistribution(&mut self, entry: &RedistributionEntry) -> Result<()>;
    fn record_omission(&mut self, entry: &OmissionEntry) -> Result<()>;
}

/// Everything needed to insert a goal; the store assigns id and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub plan_id: u64,
    pub kind: GoalKind,
    pub goal_type: GoalType,
    pub taxonomy: TaxonomyRef,
    pub scheduled_date: Date,
    pub planned_minutes: u32,
    pub guidance: Option<String>,
    pub fixed: bool,
    pub needs_review: bool,
    pub content_hash: String,
    pub number: GoalNumber,
}

/// Goal persistence as seen by the engine.
pub trait ScheduleStore: Ledger + TaxonomyLookup + AuditSink {
    /// Loads a goal, failing with `GoalNotFound`.
    fn goal(&self, id: u64) -> Result<Goal>;

    /// Bumps the plan's number counter and returns the new base.
    fn allocate_number_base(&mut self, plan_id: u64) -> Result<u32>;

    /// Inserts a goal at the end of its day.
    fn insert_goal(&mut self, draft: GoalDraft) -> Result<Goal>;

    /// Moves a goal to the end of another day, closes the gap it leaves,
    /// and clears its `needs_review` flag.
    fn move_goal(&mut self, goal_id: u64, to: Date) -> Result<Goal>;

    fn set_needs_review(&mut self, goal_id: u64, flagged: bool) -> Result<()>;

    fn set_planned_minutes(&mut self, goal_id: u64, minutes: u32, content_hash: &str)
        -> Result<Goal>;

    fn mark_done(&mut self, goal_id: u64, actual_seconds: u32, completed_on: Date) -> Result<Goal>;

    fn mark_omitted(&mut self, goal_id: u64, reason: &str) -> Result<Goal>;

    /// Generated reviews of `origin_id`, in suffix order.
    fn review_chain(&self, origin_id: u64) -> Result<Vec<Goal>>;

    /// Distinct dates on or after `from` holding pending goals, ascending.
    fn pending_dates(&self, plan_id: u64, from: Date) -> Result<Vec<Date>>;

    /// Content hashes of the plan's goals that are not omitted.
    fn content_hashes(&self, plan_id: u64) -> Result<HashSet<String>>;
}

/// Checks that a taxonomy reference points at existing, correctly nested
/// nodes.
pub fn validate_taxonomy<T>(lookup: &T, taxonomy: &TaxonomyRef) -> Result<()>
where
    T: TaxonomyLookup + ?Sized,
{
    expect_node(
        lookup,
        "discipline_id",
        taxonomy.discipline_id,
        TaxonomyKind::Discipline,
        None,
    )?;
    expect_node(
        lookup,
        "subject_id",
        taxonomy.subject_id,
        TaxonomyKind::Subject,
        Some(taxonomy.discipline_id),
    )?;
    if let Some(topic_id) = taxonomy.topic_id {
        expect_node(
            lookup,
            "topic_id",
            topic_id,
            TaxonomyKind::Topic,
            Some(taxonomy.subject_id),
        )?;
    }
    Ok(())
}

fn expect_node<T>(
    lookup: &T,
    field: &str,
    id: u64,
    kind: TaxonomyKind,
    parent_id: Option<u64>,
) -> Result<()>
where
    T: TaxonomyLookup + ?Sized,
{
    let node = lookup.taxonomy_node(id)?.ok_or_else(|| {
        SchedulerError::invalid_input(field).with_reason(format!("No taxonomy node with ID {id}"))
    })?;

    if node.kind != kind {
        return Err(SchedulerError::invalid_input(field).with_reason(format!(
            "Node {id} is a {}, expected a {}",
            node.kind.as_str(),
            kind.as_str()
        )));
    }
    if parent_id.is_some() && node.parent_id != parent_id {
        return Err(SchedulerError::invalid_input(field).with_reason(format!(
            "{} {id} does not belong to node {}",
            kind.as_str(),
            parent_id.unwrap_or_default()
        )));
    }
    Ok(())
}
