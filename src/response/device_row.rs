// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device, sensor and power switch list rows.

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{DeviceId, SensorStatus, SwitchStatus};

/// Response of `deviceListGet` and `sensorListGet`.
///
/// # Examples
///
/// ```
/// use lupusec_lib::response::DeviceListResponse;
///
/// let json = r#"{"senrows": [
///     {"sid": "5", "name": "Front door", "type": 4, "status": "{WEB_MSG_DC_CLOSE}"}
/// ]}"#;
/// let response: DeviceListResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.senrows.len(), 1);
/// assert_eq!(response.senrows[0].identity().unwrap().as_str(), "5");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListResponse {
    /// One row per device.
    #[serde(default)]
    pub senrows: Vec<DeviceRow>,
}

/// Response of `deviceListPSSGet`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerSwitchListResponse {
    /// One row per power switch.
    #[serde(default)]
    pub pssrows: Vec<DeviceRow>,
}

/// A single device row as reported by the panel.
///
/// Firmware versions disagree on the id column (`sid`, `device_id` or
/// `id`) and on how sensor state is reported (`status` token or numeric
/// `cond`). All variants are accepted here and resolved by the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceRow {
    #[serde(default, deserialize_with = "super::de::opt_string")]
    sid: Option<String>,
    #[serde(default, deserialize_with = "super::de::opt_string")]
    device_id: Option<String>,
    #[serde(default, deserialize_with = "super::de::opt_string")]
    id: Option<String>,
    /// Display name.
    #[serde(default, deserialize_with = "super::de::opt_string")]
    pub name: Option<String>,
    /// Vendor type code.
    #[serde(rename = "type", default, deserialize_with = "super::de::opt_int")]
    pub type_code: Option<i64>,
    /// Raw status token.
    #[serde(default, deserialize_with = "super::de::opt_string")]
    pub status: Option<String>,
    /// Numeric contact flag (XT2 sensor list).
    #[serde(default, deserialize_with = "super::de::opt_int")]
    pub cond: Option<i64>,
    /// Area the device belongs to.
    #[serde(default, deserialize_with = "super::de::opt_int")]
    pub area: Option<i64>,
    /// Zone number within the area.
    #[serde(default, deserialize_with = "super::de::opt_int")]
    pub zone: Option<i64>,
}

impl DeviceRow {
    /// Creates a row with only an id set.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the vendor type code.
    #[must_use]
    pub fn with_type(mut self, code: i64) -> Self {
        self.type_code = Some(code);
        self
    }

    /// Sets the status token.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the numeric contact flag.
    #[must_use]
    pub fn with_cond(mut self, cond: i64) -> Self {
        self.cond = Some(cond);
        self
    }

    /// Returns the key the registry files this row under.
    ///
    /// The vendor id wins; rows without any id fall back to their name.
    #[must_use]
    pub fn identity(&self) -> Option<DeviceId> {
        [&self.sid, &self.device_id, &self.id, &self.name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(DeviceId::new)
    }

    /// Decodes the contact state.
    ///
    /// A present `status` column takes precedence; rows that only carry
    /// `cond` are converted from the numeric flag.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` for unknown tokens and
    /// `ParseError::MissingField` if neither column is present.
    pub fn sensor_status(&self) -> Result<SensorStatus, ParseError> {
        match (&self.status, self.cond) {
            (Some(status), Some(cond)) if status.trim().is_empty() => {
                Ok(SensorStatus::from_cond(cond))
            }
            (Some(status), _) => SensorStatus::from_token(status),
            (None, Some(cond)) => Ok(SensorStatus::from_cond(cond)),
            (None, None) => Err(ParseError::MissingField("status".to_string())),
        }
    }

    /// Decodes the power switch state.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` for unknown tokens and
    /// `ParseError::MissingField` if the status column is absent.
    pub fn switch_status(&self) -> Result<SwitchStatus, ParseError> {
        self.status
            .as_deref()
            .ok_or_else(|| ParseError::MissingField("status".to_string()))
            .and_then(SwitchStatus::from_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_prefers_vendor_id() {
        let row: DeviceRow =
            serde_json::from_str(r#"{"sid": 12, "name": "Kitchen"}"#).unwrap();
        assert_eq!(row.identity(), Some(DeviceId::new("12")));

        let row: DeviceRow = serde_json::from_str(r#"{"device_id": "7"}"#).unwrap();
        assert_eq!(row.identity(), Some(DeviceId::new("7")));
    }

    #[test]
    fn identity_falls_back_to_name() {
        let row: DeviceRow = serde_json::from_str(r#"{"sid": "", "name": "Garage"}"#).unwrap();
        assert_eq!(row.identity(), Some(DeviceId::new("Garage")));

        let row: DeviceRow = serde_json::from_str("{}").unwrap();
        assert!(row.identity().is_none());
    }

    #[test]
    fn sensor_status_from_token_or_cond() {
        let token = DeviceRow::with_id("1").with_status("{WEB_MSG_DC_OPEN}");
        assert_eq!(token.sensor_status().unwrap(), SensorStatus::Open);

        let closed = DeviceRow::with_id("1").with_cond(0);
        assert_eq!(closed.sensor_status().unwrap(), SensorStatus::Closed);

        let blank_status = DeviceRow::with_id("1").with_status("").with_cond(0);
        assert_eq!(blank_status.sensor_status().unwrap(), SensorStatus::Closed);

        let missing = DeviceRow::with_id("1");
        assert!(matches!(missing.sensor_status(), Err(ParseError::MissingField(_))));
    }

    #[test]
    fn xt2_sensor_row() {
        let json = r#"{"senrows": [{"sid": "3", "name": "Back door", "type": "4", "cond": "1", "status": ""}]}"#;
        let response: DeviceListResponse = serde_json::from_str(json).unwrap();
        let row = &response.senrows[0];
        assert_eq!(row.type_code, Some(4));
        assert_eq!(row.sensor_status().unwrap(), SensorStatus::Open);
    }

    #[test]
    fn switch_rows() {
        let json = r#"{"pssrows": [{"id": 9, "name": "Lamp", "status": "{WEB_MSG_PSS_ON}"}]}"#;
        let response: PowerSwitchListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pssrows[0].switch_status().unwrap(), SwitchStatus::On);
    }

    #[test]
    fn missing_list_is_empty() {
        let response: DeviceListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.senrows.is_empty());
    }
}
