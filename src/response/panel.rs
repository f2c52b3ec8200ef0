// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel condition response parsing.

use serde::Deserialize;

use crate::error::ParseError;

/// Response of `panelCondGet`.
///
/// ```
/// use lupusec_lib::response::PanelCondResponse;
///
/// let json = r#"{"updates": {"mode_a1": "{AREA_MODE_1}", "mode_a2": "{AREA_MODE_0}", "alarm_ex": "0"}}"#;
/// let panel: PanelCondResponse = serde_json::from_str(json).unwrap();
/// let areas = panel.areas().unwrap();
/// assert_eq!(areas.len(), 2);
/// assert_eq!(areas[0].mode, "{AREA_MODE_1}");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PanelCondResponse {
    /// Current panel state.
    pub updates: PanelUpdates,
}

/// The `updates` object of the panel condition.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelUpdates {
    /// Mode token of area 1.
    #[serde(default, deserialize_with = "super::de::opt_string")]
    pub mode_a1: Option<String>,
    /// Mode token of area 2, absent on single-area panels.
    #[serde(default, deserialize_with = "super::de::opt_string")]
    pub mode_a2: Option<String>,
    /// Alarm flag shared by all areas.
    #[serde(default, deserialize_with = "super::de::opt_int")]
    pub alarm_ex: Option<i64>,
}

/// Condition of a single area extracted from the panel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRow {
    /// Area number (1-based).
    pub number: u8,
    /// Raw mode token.
    pub mode: String,
    /// Raw alarm flag.
    pub alarm: bool,
}

impl PanelCondResponse {
    /// Splits the payload into one row per reported area.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if area 1 is not reported.
    pub fn areas(&self) -> Result<Vec<AreaRow>, ParseError> {
        let updates = &self.updates;
        let alarm = updates.alarm_ex == Some(1);

        let first = updates
            .mode_a1
            .clone()
            .ok_or_else(|| ParseError::MissingField("mode_a1".to_string()))?;

        let mut areas = vec![AreaRow {
            number: 1,
            mode: first,
            alarm,
        }];

        if let Some(mode) = updates.mode_a2.clone().filter(|m| !m.is_empty()) {
            areas.push(AreaRow {
                number: 2,
                mode,
                alarm,
            });
        }

        Ok(areas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_area_panel() {
        let json = r#"{"updates": {"mode_a1": "{AREA_MODE_2}", "alarm_ex": 1}}"#;
        let panel: PanelCondResponse = serde_json::from_str(json).unwrap();
        let areas = panel.areas().unwrap();
        assert_eq!(
            areas,
            vec![AreaRow {
                number: 1,
                mode: "{AREA_MODE_2}".to_string(),
                alarm: true,
            }]
        );
    }

    #[test]
    fn missing_first_area_is_an_error() {
        let json = r#"{"updates": {"alarm_ex": "0"}}"#;
        let panel: PanelCondResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(panel.areas(), Err(ParseError::MissingField(_))));
    }

    #[test]
    fn missing_updates_fails_to_parse() {
        assert!(serde_json::from_str::<PanelCondResponse>("{}").is_err());
    }
}
