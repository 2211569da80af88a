//! Append-only redistribution and omission logs.

use jiff::Timestamp;
use rusqlite::{params, Connection};

use super::utils::{date_column, id_column, parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{OmissionEntry, OmissionRecord, RedistributionEntry, RedistributionRecord},
};

const INSERT_REDISTRIBUTION_SQL: &str = "INSERT INTO redistribution_log (plan_id, goal_id, date_from, date_to, reason, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_OMISSION_SQL: &str = "INSERT INTO omission_log (plan_id, goal_id, scheduled_date, reason, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_REDISTRIBUTIONS_SQL: &str = "SELECT id, plan_id, goal_id, date_from, date_to, reason, recorded_at FROM redistribution_log WHERE plan_id = ?1 ORDER BY id";
const SELECT_OMISSIONS_SQL: &str = "SELECT id, plan_id, goal_id, scheduled_date, reason, recorded_at FROM omission_log WHERE plan_id = ?1 ORDER BY id";

pub(crate) fn insert_redistribution(conn: &Connection, entry: &RedistributionEntry) -> Result<()> {
    conn.execute(
        INSERT_REDISTRIBUTION_SQL,
        params![
            entry.plan_id as i64,
            entry.goal_id as i64,
            entry.date_from.to_string(),
            entry.date_to.to_string(),
            entry.reason.as_str(),
            Timestamp::now().to_string()
        ],
    )
    .db_context("Failed to append redistribution log")?;
    Ok(())
}

pub(crate) fn insert_omission(conn: &Connection, entry: &OmissionEntry) -> Result<()> {
    conn.execute(
        INSERT_OMISSION_SQL,
        params![
            entry.plan_id as i64,
            entry.goal_id as i64,
            entry.scheduled_date.to_string(),
            &entry.reason,
            Timestamp::now().to_string()
        ],
    )
    .db_context("Failed to append omission log")?;
    Ok(())
}

impl super::Database {
    /// Redistribution records of a plan, oldest first.
    pub fn list_redistributions(&self, plan_id: u64) -> Result<Vec<RedistributionRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_REDISTRIBUTIONS_SQL)
            .db_context("Failed to prepare query")?;
        let redistributions = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok(RedistributionRecord {
                    id: id_column(row, 0)?,
                    entry: RedistributionEntry {
                        plan_id: id_column(row, 1)?,
                        goal_id: id_column(row, 2)?,
                        date_from: date_column(row, 3)?,
                        date_to: date_column(row, 4)?,
                        reason: parse_column(row, 5)?,
                    },
                    recorded_at: timestamp_column(row, 6)?,
                })
            })
            .db_context("Failed to query redistribution log")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch redistribution log")?;

        Ok(redistributions)
    }

    /// Omission records of a plan, oldest first.
    pub fn list_omissions(&self, plan_id: u64) -> Result<Vec<OmissionRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_OMISSIONS_SQL)
            .db_context("Failed to prepare query")?;
        let omissions = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok(OmissionRecord {
                    id: id_column(row, 0)?,
                    entry: OmissionEntry {
                        plan_id: id_column(row, 1)?,
                        goal_id: id_column(row, 2)?,
                        scheduled_date: date_column(row, 3)?,
                        reason: row.get(4)?,
                    },
                    recorded_at: timestamp_column(row, 5)?,
                })
            })
            .db_context("Failed to query omission log")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch omission log")?;

        Ok(omissions)
    }
}
