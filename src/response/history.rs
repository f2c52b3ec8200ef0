// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! History response parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column carrying the event text.
pub const ALARM_COLUMN: &str = "a";

/// Event text the panel logs when an alarm goes off.
pub const ALARM_TRIGGERED: &str = "{ALARM_HISTORY_20}";

/// Response of `historyGet`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    /// Most recent events, newest first.
    #[serde(default)]
    pub hisrows: Vec<HistoryRow>,
}

/// One history event.
///
/// Rows are kept as reported, with columns in key order, so two fetches of
/// the same event compare equal.
///
/// # Examples
///
/// ```
/// use lupusec_lib::response::HistoryRow;
///
/// let row: HistoryRow = serde_json::from_str(
///     r#"{"d": "18.10.2026", "t": "21:04", "a": "{ALARM_HISTORY_20}", "z": "3"}"#,
/// ).unwrap();
/// assert!(row.is_alarm_trigger());
/// assert_eq!(row.column("z").as_deref(), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRow(BTreeMap<String, Value>);

impl HistoryRow {
    /// Returns a column as text.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Returns the area the event refers to, if the row names one.
    #[must_use]
    pub fn area(&self) -> Option<u8> {
        self.column("area").and_then(|a| a.trim().parse().ok())
    }

    /// Returns true if the row records a triggered alarm.
    #[must_use]
    pub fn is_alarm_trigger(&self) -> bool {
        self.column(ALARM_COLUMN)
            .is_some_and(|text| text.contains(ALARM_TRIGGERED))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for HistoryRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
