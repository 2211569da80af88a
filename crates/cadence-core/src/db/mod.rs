//! SQLite persistence for plans, goals, the taxonomy and the audit logs.
//!
//! Read queries run directly on the connection. Every operation that makes a
//! placement decision runs inside one `IMMEDIATE` transaction, which takes
//! SQLite's write lock up front: a second writer on the same plan and date
//! waits (up to the busy timeout) instead of reading a ledger that is about
//! to go stale.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod audit_queries;
pub mod goal_queries;
pub mod migrations;
pub mod plan_queries;
pub mod schedule_ops;
pub mod store;
pub mod taxonomy_queries;
pub mod utils;

pub use schedule_ops::PlanUpdate;
pub use store::SqliteStore;

/// How long a writer waits for another connection's lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Starts a transaction holding the write lock from its first statement.
    fn immediate(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}
