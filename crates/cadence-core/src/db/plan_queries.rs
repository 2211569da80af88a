//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::utils::{date_column, id_column, parse_column, parse_optional_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{
        GoalStatus, NewPlan, Plan, PlanChanges, PlanFilter, PlanStatus, PlanSummary, WeekMask,
    },
};

const PLAN_COLUMNS: &str = "id, student_id, title, hours_per_day, availability, start_date, end_date, status, last_number_base, created_at, updated_at";
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (student_id, title, hours_per_day, availability, start_date, end_date, status, last_number_base, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET title = ?1, hours_per_day = ?2, availability = ?3, end_date = ?4, status = ?5, updated_at = ?6 WHERE id = ?7";
const SELECT_NUMBER_BASE_SQL: &str = "SELECT last_number_base FROM plans WHERE id = ?1";
const UPDATE_NUMBER_BASE_SQL: &str = "UPDATE plans SET last_number_base = ?1 WHERE id = ?2";

/// Builds a plan from a row selected with `PLAN_COLUMNS`.
fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
    let bits: i64 = row.get(4)?;
    let availability = u8::try_from(bits)
        .map_err(|e| e.to_string())
        .and_then(WeekMask::new)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Integer,
                format!("Invalid availability mask {bits}: {e}").into(),
            )
        })?;

    Ok(Plan {
        id: id_column(row, 0)?,
        student_id: row.get(1)?,
        title: row.get(2)?,
        hours_per_day: row.get(3)?,
        availability,
        start_date: date_column(row, 5)?,
        end_date: parse_optional_column(row, 6)?,
        status: parse_column(row, 7)?,
        last_number_base: row.get::<_, i64>(8)? as u32,
        created_at: timestamp_column(row, 9)?,
        updated_at: timestamp_column(row, 10)?,
    })
}

/// Loads a plan, failing with `PlanNotFound`.
pub(crate) fn load_plan(conn: &Connection, id: u64) -> Result<Plan> {
    find_plan(conn, id)?.ok_or(SchedulerError::PlanNotFound { id })
}

fn find_plan(conn: &Connection, id: u64) -> Result<Option<Plan>> {
    conn.query_row(
        &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
        params![id as i64],
        build_plan_from_row,
    )
    .optional()
    .db_context("Failed to query plan")
}

/// Reads the plan's number counter.
pub(crate) fn last_number_base(conn: &Connection, plan_id: u64) -> Result<u32> {
    conn.query_row(SELECT_NUMBER_BASE_SQL, params![plan_id as i64], |row| {
        row.get::<_, i64>(0)
    })
    .optional()
    .db_context("Failed to read goal number counter")?
    .map(|base| base as u32)
    .ok_or(SchedulerError::PlanNotFound { id: plan_id })
}

pub(crate) fn store_number_base(conn: &Connection, plan_id: u64, base: u32) -> Result<()> {
    conn.execute(UPDATE_NUMBER_BASE_SQL, params![i64::from(base), plan_id as i64])
        .db_context("Failed to update goal number counter")?;
    Ok(())
}

/// Writes the editable fields of `plan` back.
pub(crate) fn apply_changes(conn: &Connection, plan: &Plan, changes: &PlanChanges) -> Result<Plan> {
    let mut updated = plan.clone();
    if let Some(ref title) = changes.title {
        updated.title = title.clone();
    }
    if let Some(hours) = changes.hours_per_day {
        updated.hours_per_day = hours;
    }
    if let Some(mask) = changes.availability {
        updated.availability = mask;
    }
    if let Some(end) = changes.end_date {
        updated.end_date = end;
    }
    if let Some(status) = changes.status {
        updated.status = status;
    }
    updated.updated_at = Timestamp::now();

    conn.execute(
        UPDATE_PLAN_SQL,
        params![
            &updated.title,
            updated.hours_per_day,
            i64::from(updated.availability.bits()),
            updated.end_date.map(|d| d.to_string()),
            updated.status.as_str(),
            updated.updated_at.to_string(),
            plan.id as i64
        ],
    )
    .db_context("Failed to update plan")?;
    Ok(updated)
}

impl super::Database {
    /// Creates a new plan after validating its bounds.
    pub fn create_plan(&mut self, new_plan: &NewPlan) -> Result<Plan> {
        new_plan.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                &new_plan.student_id,
                &new_plan.title,
                new_plan.hours_per_day,
                i64::from(new_plan.availability.bits()),
                new_plan.start_date.to_string(),
                new_plan.end_date.map(|d| d.to_string()),
                PlanStatus::Active.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            student_id: new_plan.student_id.clone(),
            title: new_plan.title.clone(),
            hours_per_day: new_plan.hours_per_day,
            availability: new_plan.availability,
            start_date: new_plan.start_date,
            end_date: new_plan.end_date,
            status: PlanStatus::Active,
            last_number_base: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        find_plan(&self.connection, id)
    }

    /// A plan with its goal counts.
    pub fn plan_summary(&self, plan_id: u64) -> Result<PlanSummary> {
        let plan = load_plan(&self.connection, plan_id)?;
        Ok(PlanSummary {
            pending_goals: self.count_goals(plan_id, GoalStatus::Pending)?,
            done_goals: self.count_goals(plan_id, GoalStatus::Done)?,
            omitted_goals: self.count_goals(plan_id, GoalStatus::Omitted)?,
            flagged_goals: self.count_flagged(plan_id)?,
            plan,
        })
    }

    /// Lists plans, oldest first.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<Plan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM plans");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref student_id) = filter.student_id {
            conditions.push("student_id = ?");
            params_vec.push(Box::new(student_id.clone()));
        }
        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str().to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let plans = stmt
            .query_map(&params_refs[..], build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        Ok(plans)
    }
}
