// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted log of seen history events.
//!
//! The panel's history endpoint always returns its latest events. To tell a
//! new alarm from one that was already reported, every row seen once is
//! kept in a JSON file in the home directory and skipped afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::response::HistoryRow;

/// File name of the log in the home directory.
pub const DEFAULT_FILE_NAME: &str = ".lupusec_history_cache.json";

/// A history row and when it was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The row as reported by the panel.
    pub row: HistoryRow,
    /// When this library first saw the row.
    pub first_seen: DateTime<Utc>,
}

/// Append-only log of history rows.
///
/// # Examples
///
/// ```
/// use lupusec_lib::history::HistoryLog;
/// use lupusec_lib::response::HistoryRow;
///
/// let mut log = HistoryLog::in_memory();
/// let row: HistoryRow = [("a", "{ALARM_HISTORY_20}")].into_iter().collect();
///
/// assert_eq!(log.record_new(vec![row.clone()]).len(), 1);
/// assert!(log.record_new(vec![row]).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    path: Option<PathBuf>,
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    /// Returns `~/.lupusec_history_cache.json`, if the home directory is
    /// known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(DEFAULT_FILE_NAME);
            path
        })
    }

    /// Creates a log that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the log stored at `path`.
    ///
    /// A missing file starts an empty log. An unreadable or corrupt file is
    /// logged and also starts an empty log, which replaces the file on the
    /// next save.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match Self::read(&path) {
            Ok(Some(records)) => {
                tracing::debug!(
                    "Loaded {} history records from {}",
                    records.len(),
                    path.display()
                );
                records
            }
            Ok(None) => {
                tracing::debug!("No history log at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring history log at {}: {e}", path.display());
                Vec::new()
            }
        };
        Self {
            path: Some(path),
            records,
        }
    }

    fn read(path: &Path) -> Result<Option<Vec<HistoryRecord>>, HistoryError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Returns the file backing this log.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns all records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if the row was seen before.
    #[must_use]
    pub fn contains(&self, row: &HistoryRow) -> bool {
        self.records.iter().any(|record| &record.row == row)
    }

    /// Appends the rows not seen before and returns them.
    ///
    /// Duplicates within `rows` are recorded once.
    pub fn record_new(&mut self, rows: impl IntoIterator<Item = HistoryRow>) -> Vec<HistoryRow> {
        let now = Utc::now();
        let mut added = Vec::new();
        for row in rows {
            if self.contains(&row) {
                continue;
            }
            self.records.push(HistoryRecord {
                row: row.clone(),
                first_seen: now,
            });
            added.push(row);
        }
        added
    }

    /// Writes the log to its file. In-memory logs are not written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be serialized or written.
    pub fn save(&self) -> Result<(), HistoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, contents)?;

        tracing::debug!("Saved {} history records to {}", self.len(), path.display());
        Ok(())
    }
}
