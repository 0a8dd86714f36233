//! Persisted run state.
//!
//! Stores the timestamp of the last successful sync so that unchanged rows
//! can be skipped on the next run.

use crate::constants::EPOCH_YEAR;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Last-run state written after each successful sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// Local time the last successful run started
    pub last_run: NaiveDateTime,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            last_run: epoch(),
        }
    }
}

/// An arbitrarily long-ago timestamp used before the first run
pub fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(EPOCH_YEAR, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

impl SyncState {
    pub fn new(last_run: NaiveDateTime) -> Self {
        Self { last_run }
    }

    /// Load state from disk, falling back to the epoch when no file exists
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "No state file at {}, syncing everything modified since {}",
                path.display(),
                epoch()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read state file {}", path.display()), e)
        })?;

        let state: SyncState = serde_json::from_str(&content).map_err(|e| {
            Error::state(format!(
                "Invalid state file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded last run {} from {}", state.last_run, path.display());
        Ok(state)
    }

    /// Write state to disk, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create state directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| {
            Error::io(format!("Failed to write state file {}", path.display()), e)
        })?;

        info!("Recorded last run {} in {}", self.last_run, path.display());
        Ok(())
    }
}
