// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window contacts.

use std::fmt;

use crate::error::ParseError;
use crate::response::DeviceRow;
use crate::types::{DeviceId, DeviceType, SensorStatus};

/// A contact sensor reporting open or closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySensor {
    id: DeviceId,
    name: Option<String>,
    device_type: &'static DeviceType,
    status: SensorStatus,
    area: Option<i64>,
    zone: Option<i64>,
}

impl BinarySensor {
    pub(crate) fn from_row(
        id: DeviceId,
        device_type: &'static DeviceType,
        row: &DeviceRow,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            id,
            name: row.name.clone().filter(|n| !n.is_empty()),
            device_type,
            status: row.sensor_status()?,
            area: row.area,
            zone: row.zone,
        })
    }

    /// Applies a fresh row, decoding before anything is changed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the row's status cannot be decoded.
    pub fn apply_row(&mut self, row: &DeviceRow) -> Result<(), ParseError> {
        self.status = row.sensor_status()?;
        if let Some(name) = row.name.as_ref().filter(|n| !n.is_empty()) {
            self.name = Some(name.clone());
        }
        self.area = row.area.or(self.area);
        self.zone = row.zone.or(self.zone);
        Ok(())
    }

    /// Returns the vendor id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the configured name, or the type label and id.
    #[must_use]
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.device_type.label, self.id))
    }

    /// Returns the vendor type.
    #[must_use]
    pub fn device_type(&self) -> &'static DeviceType {
        self.device_type
    }

    /// Returns the contact state.
    #[must_use]
    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Returns true if the contact is open.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.status.is_open()
    }

    /// Returns the area the sensor is assigned to.
    #[must_use]
    pub fn area(&self) -> Option<i64> {
        self.area
    }

    /// Returns the zone number.
    #[must_use]
    pub fn zone(&self) -> Option<i64> {
        self.zone
    }
}

impl fmt::Display for BinarySensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}) - {} - {}",
            self.name(),
            self.id,
            self.device_type.label,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> &'static DeviceType {
        DeviceType::lookup(4).unwrap()
    }

    #[test]
    fn open_token_is_on() {
        let row = DeviceRow::with_id("5").with_status("{WEB_MSG_DC_OPEN}");
        let sensor = BinarySensor::from_row(DeviceId::new("5"), door(), &row).unwrap();
        assert!(sensor.is_on());
    }

    #[test]
    fn close_token_is_off() {
        let row = DeviceRow::with_id("5").with_status("{WEB_MSG_DC_CLOSE}");
        let sensor = BinarySensor::from_row(DeviceId::new("5"), door(), &row).unwrap();
        assert!(!sensor.is_on());
        assert_eq!(sensor.status(), SensorStatus::Closed);
    }

    #[test]
    fn name_falls_back_to_type_and_id() {
        let row = DeviceRow::with_id("5").with_cond(0);
        let sensor = BinarySensor::from_row(DeviceId::new("5"), door(), &row).unwrap();
        assert_eq!(sensor.name(), "Door Contact 5");
        assert_eq!(sensor.to_string(), "Door Contact 5 (ID: 5) - Door Contact - Closed");
    }

    #[test]
    fn apply_row_keeps_known_name() {
        let row = DeviceRow::with_id("5")
            .with_name("Front door")
            .with_status("{WEB_MSG_DC_CLOSE}");
        let mut sensor = BinarySensor::from_row(DeviceId::new("5"), door(), &row).unwrap();

        sensor
            .apply_row(&DeviceRow::with_id("5").with_cond(1))
            .unwrap();
        assert_eq!(sensor.name(), "Front door");
        assert!(sensor.is_on());
    }

    #[test]
    fn invalid_update_leaves_state() {
        let row = DeviceRow::with_id("5").with_status("{WEB_MSG_DC_CLOSE}");
        let mut sensor = BinarySensor::from_row(DeviceId::new("5"), door(), &row).unwrap();
        let result = sensor.apply_row(&DeviceRow::with_id("5").with_status("{BROKEN}"));
        assert!(result.is_err());
        assert_eq!(sensor.status(), SensorStatus::Closed);
    }
}
