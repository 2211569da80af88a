//! Goal queries and row-level writes.
//!
//! The write helpers here take a plain `&Connection` so they can run on a
//! transaction; they are driven by [`super::SqliteStore`] and by the
//! operations in [`super::schedule_ops`].

use std::collections::HashSet;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{
    date_column, id_column, optional_id_column, parse_column, parse_optional_column,
    timestamp_column,
};
use crate::{
    engine::{numbering::contiguous_positions, GoalDraft, GoalNumber},
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{Goal, GoalFilter, GoalKind, GoalStatus, TaxonomyRef},
};

const GOAL_COLUMNS: &str = "id, plan_id, parent_id, goal_type, status, discipline_id, subject_id, topic_id, scheduled_date, position, planned_minutes, actual_seconds, completed_on, guidance, fixed, needs_review, omission_reason, content_hash, number_base, number_suffix, created_at, updated_at";
const INSERT_GOAL_SQL: &str = "INSERT INTO goals (plan_id, parent_id, goal_type, status, discipline_id, subject_id, topic_id, scheduled_date, position, planned_minutes, guidance, fixed, needs_review, content_hash, number_base, number_suffix, order_key, created_at, updated_at) VALUES (?1, ?2, ?3, 'pending', ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?17)";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), 0) + 1 FROM goals WHERE plan_id = ?1 AND scheduled_date = ?2";
const SELECT_DAY_IDS_SQL: &str =
    "SELECT id FROM goals WHERE plan_id = ?1 AND scheduled_date = ?2 ORDER BY position, id";
const UPDATE_POSITION_SQL: &str = "UPDATE goals SET position = ?1 WHERE id = ?2";
const MOVE_GOAL_SQL: &str = "UPDATE goals SET scheduled_date = ?1, position = ?2, needs_review = 0, updated_at = ?3 WHERE id = ?4";
const UPDATE_NEEDS_REVIEW_SQL: &str =
    "UPDATE goals SET needs_review = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_FIXED_SQL: &str = "UPDATE goals SET fixed = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_PLANNED_SQL: &str =
    "UPDATE goals SET planned_minutes = ?1, content_hash = ?2, updated_at = ?3 WHERE id = ?4 AND status = 'pending'";
const MARK_DONE_SQL: &str = "UPDATE goals SET status = 'done', actual_seconds = ?1, completed_on = ?2, needs_review = 0, updated_at = ?3 WHERE id = ?4 AND status = 'pending'";
const MARK_OMITTED_SQL: &str = "UPDATE goals SET status = 'omitted', omission_reason = ?1, needs_review = 0, updated_at = ?2 WHERE id = ?3 AND status = 'pending'";
const SELECT_PENDING_DATES_SQL: &str = "SELECT DISTINCT scheduled_date FROM goals WHERE plan_id = ?1 AND status = 'pending' AND scheduled_date >= ?2 ORDER BY scheduled_date";
const SELECT_HASHES_SQL: &str =
    "SELECT content_hash FROM goals WHERE plan_id = ?1 AND status <> 'omitted'";
const COUNT_BY_STATUS_SQL: &str = "SELECT COUNT(*) FROM goals WHERE plan_id = ?1 AND status = ?2";
const COUNT_FLAGGED_SQL: &str =
    "SELECT COUNT(*) FROM goals WHERE plan_id = ?1 AND status = 'pending' AND needs_review = 1";

/// Builds a goal from a row selected with `GOAL_COLUMNS`.
fn build_goal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    let kind = match optional_id_column(row, 2)? {
        Some(parent_id) => GoalKind::GeneratedReview { parent_id },
        None => GoalKind::Origin,
    };

    Ok(Goal {
        id: id_column(row, 0)?,
        plan_id: id_column(row, 1)?,
        kind,
        goal_type: parse_column(row, 3)?,
        status: parse_column(row, 4)?,
        taxonomy: TaxonomyRef {
            discipline_id: id_column(row, 5)?,
            subject_id: id_column(row, 6)?,
            topic_id: optional_id_column(row, 7)?,
        },
        scheduled_date: date_column(row, 8)?,
        position: row.get::<_, i64>(9)? as u32,
        planned_minutes: row.get::<_, i64>(10)? as u32,
        actual_seconds: row.get::<_, Option<i64>>(11)?.map(|secs| secs as u32),
        completed_on: parse_optional_column(row, 12)?,
        guidance: row.get(13)?,
        fixed: row.get(14)?,
        needs_review: row.get(15)?,
        omission_reason: row.get(16)?,
        content_hash: row.get(17)?,
        number: GoalNumber {
            base: row.get::<_, i64>(18)? as u32,
            suffix: row.get::<_, Option<i64>>(19)?.map(|suffix| suffix as u8),
        },
        created_at: timestamp_column(row, 20)?,
        updated_at: timestamp_column(row, 21)?,
    })
}

fn query_goals(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(sql).db_context("Failed to prepare query")?;
    let goals = stmt
        .query_map(params, build_goal_from_row)
        .db_context("Failed to query goals")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch goals")?;

    Ok(goals)
}

pub(crate) fn find_goal(conn: &Connection, id: u64) -> Result<Option<Goal>> {
    conn.query_row(
        &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1"),
        params![id as i64],
        build_goal_from_row,
    )
    .optional()
    .db_context("Failed to query goal")
}

/// Loads a goal, failing with `GoalNotFound`.
pub(crate) fn load_goal(conn: &Connection, id: u64) -> Result<Goal> {
    find_goal(conn, id)?.ok_or(SchedulerError::GoalNotFound { id })
}

/// Goals of a plan on one date, in position order.
pub(crate) fn goals_on(conn: &Connection, plan_id: u64, date: Date) -> Result<Vec<Goal>> {
    query_goals(
        conn,
        &format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE plan_id = ?1 AND scheduled_date = ?2 ORDER BY position, id"
        ),
        params![plan_id as i64, date.to_string()],
    )
}

/// Generated reviews of an origin goal, in suffix order.
pub(crate) fn review_chain(conn: &Connection, origin_id: u64) -> Result<Vec<Goal>> {
    query_goals(
        conn,
        &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE parent_id = ?1 ORDER BY number_suffix"),
        params![origin_id as i64],
    )
}

fn next_position(conn: &Connection, plan_id: u64, date: Date) -> Result<u32> {
    conn.query_row(
        NEXT_POSITION_SQL,
        params![plan_id as i64, date.to_string()],
        |row| row.get::<_, i64>(0),
    )
    .map(|position| position as u32)
    .db_context("Failed to get next position")
}

pub(crate) fn insert_goal(conn: &Connection, draft: &GoalDraft) -> Result<Goal> {
    let position = next_position(conn, draft.plan_id, draft.scheduled_date)?;
    let parent_id = match draft.kind {
        GoalKind::GeneratedReview { parent_id } => Some(parent_id as i64),
        GoalKind::Origin => None,
    };
    let now = Timestamp::now().to_string();

    conn.execute(
        INSERT_GOAL_SQL,
        params![
            draft.plan_id as i64,
            parent_id,
            draft.goal_type.as_str(),
            draft.taxonomy.discipline_id as i64,
            draft.taxonomy.subject_id as i64,
            draft.taxonomy.topic_id.map(|id| id as i64),
            draft.scheduled_date.to_string(),
            i64::from(position),
            i64::from(draft.planned_minutes),
            draft.guidance.as_deref(),
            draft.fixed,
            draft.needs_review,
            &draft.content_hash,
            i64::from(draft.number.base),
            draft.number.suffix.map(i64::from),
            draft.number.order_key(),
            &now
        ],
    )
    .db_context("Failed to insert goal")?;

    load_goal(conn, conn.last_insert_rowid() as u64)
}

/// Renumbers the goals of a day 1..=n, keeping their current order.
pub(crate) fn compact_day(conn: &Connection, plan_id: u64, date: Date) -> Result<()> {
    let ids = day_goal_ids(conn, plan_id, date)?;
    write_positions(conn, &ids)
}

pub(crate) fn day_goal_ids(conn: &Connection, plan_id: u64, date: Date) -> Result<Vec<u64>> {
    let mut stmt = conn
        .prepare(SELECT_DAY_IDS_SQL)
        .db_context("Failed to prepare query")?;
    let ids = stmt
        .query_map(params![plan_id as i64, date.to_string()], |row| id_column(row, 0))
        .db_context("Failed to query day goals")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch day goals")?;

    Ok(ids)
}

/// Assigns positions 1..=n in the given order.
pub(crate) fn write_positions(conn: &Connection, ordered_ids: &[u64]) -> Result<()> {
    let mut stmt = conn
        .prepare(UPDATE_POSITION_SQL)
        .db_context("Failed to prepare position update")?;
    for (id, position) in contiguous_positions(ordered_ids) {
        stmt.execute(params![i64::from(position), id as i64])
            .db_context("Failed to update goal position")?;
    }
    Ok(())
}

pub(crate) fn move_goal(conn: &Connection, goal_id: u64, to: Date) -> Result<Goal> {
    let goal = load_goal(conn, goal_id)?;
    let position = next_position(conn, goal.plan_id, to)?;
    conn.execute(
        MOVE_GOAL_SQL,
        params![
            to.to_string(),
            i64::from(position),
            Timestamp::now().to_string(),
            goal_id as i64
        ],
    )
    .db_context("Failed to move goal")?;
    compact_day(conn, goal.plan_id, goal.scheduled_date)?;
    load_goal(conn, goal_id)
}

pub(crate) fn set_needs_review(conn: &Connection, goal_id: u64, flagged: bool) -> Result<()> {
    conn.execute(
        UPDATE_NEEDS_REVIEW_SQL,
        params![flagged, Timestamp::now().to_string(), goal_id as i64],
    )
    .db_context("Failed to flag goal")?;
    Ok(())
}

pub(crate) fn set_fixed(conn: &Connection, goal_id: u64, fixed: bool) -> Result<()> {
    conn.execute(
        UPDATE_FIXED_SQL,
        params![fixed, Timestamp::now().to_string(), goal_id as i64],
    )
    .db_context("Failed to update fixed flag")?;
    Ok(())
}

/// Runs a status-guarded update and reloads the goal, failing with
/// `InvalidTransition` when the goal was no longer pending.
fn guarded_update(
    conn: &Connection,
    goal_id: u64,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
    action: &str,
) -> Result<Goal> {
    let rows = conn
        .execute(sql, params)
        .db_context(&format!("Failed to {action} goal"))?;
    let goal = load_goal(conn, goal_id)?;
    if rows == 0 {
        return Err(SchedulerError::invalid_transition(
            goal_id,
            format!("cannot {action} a goal that is {}", goal.status.as_str()),
        ));
    }
    Ok(goal)
}

pub(crate) fn set_planned_minutes(
    conn: &Connection,
    goal_id: u64,
    minutes: u32,
    content_hash: &str,
) -> Result<Goal> {
    guarded_update(
        conn,
        goal_id,
        UPDATE_PLANNED_SQL,
        params![
            i64::from(minutes),
            content_hash,
            Timestamp::now().to_string(),
            goal_id as i64
        ],
        "resize",
    )
}

pub(crate) fn mark_done(
    conn: &Connection,
    goal_id: u64,
    actual_seconds: u32,
    completed_on: Date,
) -> Result<Goal> {
    guarded_update(
        conn,
        goal_id,
        MARK_DONE_SQL,
        params![
            i64::from(actual_seconds),
            completed_on.to_string(),
            Timestamp::now().to_string(),
            goal_id as i64
        ],
        "complete",
    )
}

pub(crate) fn mark_omitted(conn: &Connection, goal_id: u64, reason: &str) -> Result<Goal> {
    guarded_update(
        conn,
        goal_id,
        MARK_OMITTED_SQL,
        params![reason, Timestamp::now().to_string(), goal_id as i64],
        "omit",
    )
}

pub(crate) fn pending_dates(conn: &Connection, plan_id: u64, from: Date) -> Result<Vec<Date>> {
    let mut stmt = conn
        .prepare(SELECT_PENDING_DATES_SQL)
        .db_context("Failed to prepare query")?;
    let dates = stmt
        .query_map(params![plan_id as i64, from.to_string()], |row| {
            date_column(row, 0)
        })
        .db_context("Failed to query pending dates")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch pending dates")?;

    Ok(dates)
}

pub(crate) fn content_hashes(conn: &Connection, plan_id: u64) -> Result<HashSet<String>> {
    let mut stmt = conn
        .prepare(SELECT_HASHES_SQL)
        .db_context("Failed to prepare query")?;
    let hashes = stmt
        .query_map(params![plan_id as i64], |row| row.get::<_, String>(0))
        .db_context("Failed to query content hashes")?
        .collect::<std::result::Result<HashSet<_>, _>>()
        .db_context("Failed to fetch content hashes")?;

    Ok(hashes)
}

impl super::Database {
    /// Retrieves a goal by its ID.
    pub fn get_goal(&self, id: u64) -> Result<Option<Goal>> {
        find_goal(&self.connection, id)
    }

    /// Lists a plan's goals by date, then position.
    pub fn list_goals(&self, plan_id: u64, filter: &GoalFilter) -> Result<Vec<Goal>> {
        super::plan_queries::load_plan(&self.connection, plan_id)?;

        let mut query = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE plan_id = ?");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(plan_id as i64)];

        if let Some(from) = filter.from {
            query.push_str(" AND scheduled_date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }
        if let Some(until) = filter.until {
            query.push_str(" AND scheduled_date <= ?");
            params_vec.push(Box::new(until.to_string()));
        }
        if let Some(status) = filter.status {
            query.push_str(" AND status = ?");
            params_vec.push(Box::new(status.as_str().to_string()));
        }
        if filter.flagged_only {
            query.push_str(" AND needs_review = 1");
        }
        query.push_str(" ORDER BY scheduled_date, position, id");

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();
        query_goals(&self.connection, &query, &params_refs)
    }

    /// Lists a plan's goals in numbering order (order key).
    pub fn list_goals_by_number(&self, plan_id: u64) -> Result<Vec<Goal>> {
        super::plan_queries::load_plan(&self.connection, plan_id)?;
        query_goals(
            &self.connection,
            &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE plan_id = ?1 ORDER BY order_key"),
            params![plan_id as i64],
        )
    }

    /// Generated reviews of a goal, in chain order.
    pub fn get_review_chain(&self, origin_id: u64) -> Result<Vec<Goal>> {
        load_goal(&self.connection, origin_id)?;
        review_chain(&self.connection, origin_id)
    }

    /// Counts goals of a plan with the given status.
    pub fn count_goals(&self, plan_id: u64, status: GoalStatus) -> Result<u64> {
        self.connection
            .query_row(COUNT_BY_STATUS_SQL, params![plan_id as i64, status.as_str()], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as u64)
            .db_context("Failed to count goals")
    }

    /// Counts pending goals flagged for manual review.
    pub fn count_flagged(&self, plan_id: u64) -> Result<u64> {
        self.connection
            .query_row(COUNT_FLAGGED_SQL, params![plan_id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as u64)
            .db_context("Failed to count flagged goals")
    }
}
