//! Builder for creating and configuring Scheduler instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Scheduler;
use crate::{
    db::Database,
    engine::{ScheduleConfig, DEFAULT_HORIZON_DAYS},
    error::{Result, SchedulerError},
};

/// Builder for creating and configuring Scheduler instances.
#[derive(Debug, Clone)]
pub struct SchedulerBuilder {
    database_path: Option<PathBuf>,
    horizon_days: u32,
}

impl SchedulerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how many days past a full date the resolver scans when a plan
    /// has no end date.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Builds the configured scheduler instance.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidInput` if the horizon is zero
    /// Returns `SchedulerError::FileSystem` if the database path is invalid
    /// Returns `SchedulerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Scheduler> {
        if self.horizon_days == 0 {
            return Err(SchedulerError::invalid_input("horizon_days")
                .with_reason("Horizon must be at least one day"));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SchedulerError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), SchedulerError>(())
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let config = ScheduleConfig {
            horizon_days: self.horizon_days,
        };
        Ok(Scheduler::new(db_path, config))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| SchedulerError::XdgDirectory(e.to_string()))
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
