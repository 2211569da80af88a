//! The engine's store traits over a SQLite connection.

use std::collections::HashSet;

use jiff::civil::Date;
use rusqlite::Connection;

use super::{audit_queries, goal_queries, plan_queries, taxonomy_queries};
use crate::{
    engine::{numbering::next_number_base, AuditSink, GoalDraft, Ledger, ScheduleStore, TaxonomyLookup},
    error::Result,
    models::{Goal, OmissionEntry, RedistributionEntry, TaxonomyNode},
};

/// Engine store backed by a connection, usually an open transaction.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl Ledger for SqliteStore<'_> {
    fn goals_on(&self, plan_id: u64, date: Date) -> Result<Vec<Goal>> {
        goal_queries::goals_on(self.conn, plan_id, date)
    }
}

impl TaxonomyLookup for SqliteStore<'_> {
    fn taxonomy_node(&self, id: u64) -> Result<Option<TaxonomyNode>> {
        taxonomy_queries::find_node(self.conn, id)
    }
}

impl AuditSink for SqliteStore<'_> {
    fn record_redistribution(&mut self, entry: &RedistributionEntry) -> Result<()> {
        audit_queries::insert_redistribution(self.conn, entry)
    }

    fn record_omission(&mut self, entry: &OmissionEntry) -> Result<()> {
        audit_queries::insert_omission(self.conn, entry)
    }
}

impl ScheduleStore for SqliteStore<'_> {
    fn goal(&self, id: u64) -> Result<Goal> {
        goal_queries::load_goal(self.conn, id)
    }

    fn allocate_number_base(&mut self, plan_id: u64) -> Result<u32> {
        let base = next_number_base(plan_queries::last_number_base(self.conn, plan_id)?)?;
        plan_queries::store_number_base(self.conn, plan_id, base)?;
        Ok(base)
    }

    fn insert_goal(&mut self, draft: GoalDraft) -> Result<Goal> {
        goal_queries::insert_goal(self.conn, &draft)
    }

    fn move_goal(&mut self, goal_id: u64, to: Date) -> Result<Goal> {
        goal_queries::move_goal(self.conn, goal_id, to)
    }

    fn set_needs_review(&mut self, goal_id: u64, flagged: bool) -> Result<()> {
        goal_queries::set_needs_review(self.conn, goal_id, flagged)
    }

    fn set_planned_minutes(
        &mut self,
        goal_id: u64,
        minutes: u32,
        content_hash: &str,
    ) -> Result<Goal> {
        goal_queries::set_planned_minutes(self.conn, goal_id, minutes, content_hash)
    }

    fn mark_done(&mut self, goal_id: u64, actual_seconds: u32, completed_on: Date) -> Result<Goal> {
        goal_queries::mark_done(self.conn, goal_id, actual_seconds, completed_on)
    }

    fn mark_omitted(&mut self, goal_id: u64, reason: &str) -> Result<Goal> {
        goal_queries::mark_omitted(self.conn, goal_id, reason)
    }

    fn review_chain(&self, origin_id: u64) -> Result<Vec<Goal>> {
        goal_queries::review_chain(self.conn, origin_id)
    }

    fn pending_dates(&self, plan_id: u64, from: Date) -> Result<Vec<Date>> {
        goal_queries::pending_dates(self.conn, plan_id, from)
    }

    fn content_hashes(&self, plan_id: u64) -> Result<HashSet<String>> {
        goal_queries::content_hashes(self.conn, plan_id)
    }
}
