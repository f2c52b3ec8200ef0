// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power switches.

use std::fmt;

use crate::error::ParseError;
use crate::response::DeviceRow;
use crate::types::{DeviceId, DeviceType, SwitchStatus};

/// A remote-controllable power outlet.
///
/// Switching goes through [`Lupusec::switch_on`](crate::Lupusec::switch_on)
/// and [`Lupusec::switch_off`](crate::Lupusec::switch_off), which update the
/// status held here once the panel confirms the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSwitch {
    id: DeviceId,
    name: Option<String>,
    device_type: &'static DeviceType,
    status: SwitchStatus,
}

impl PowerSwitch {
    pub(crate) fn from_row(
        id: DeviceId,
        device_type: &'static DeviceType,
        row: &DeviceRow,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            id,
            name: row.name.clone().filter(|n| !n.is_empty()),
            device_type,
            status: row.switch_status()?,
        })
    }

    /// Applies a fresh row, decoding before anything is changed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the row's status cannot be decoded.
    pub fn apply_row(&mut self, row: &DeviceRow) -> Result<(), ParseError> {
        self.status = row.switch_status()?;
        if let Some(name) = row.name.as_ref().filter(|n| !n.is_empty()) {
            self.name = Some(name.clone());
        }
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

    /// Returns the switch state.
    #[must_use]
    pub fn status(&self) -> SwitchStatus {
        self.status
    }

    /// Returns true if the switch is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.status.is_on()
    }

    /// Switches cannot be dimmed.
    #[must_use]
    pub fn is_dimmable(&self) -> bool {
        false
    }

    pub(crate) fn set_status(&mut self, status: SwitchStatus) {
        self.status = status;
    }
}

impl fmt::Display for PowerSwitch {
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

    fn switch(status: &str) -> PowerSwitch {
        let row = DeviceRow::with_id("9").with_name("Lamp").with_status(status);
        PowerSwitch::from_row(DeviceId::new("9"), DeviceType::power_switch(), &row).unwrap()
    }

    #[test]
    fn offline_is_not_on() {
        assert!(!switch("{WEB_MSG_PSS_OFFLINE}").is_on());
        assert!(switch("{WEB_MSG_PSS_ON}").is_on());
    }

    #[test]
    fn apply_row_updates_status() {
        let mut lamp = switch("{WEB_MSG_PSS_OFF}");
        lamp.apply_row(&DeviceRow::with_id("9").with_status("1")).unwrap();
        assert_eq!(lamp.status(), SwitchStatus::On);
        assert_eq!(lamp.name(), "Lamp");
    }

    #[test]
    fn display() {
        assert_eq!(
            switch("{WEB_MSG_PSS_ON}").to_string(),
            "Lamp (ID: 9) - Power Switch - On"
        );
        assert!(!switch("0").is_dimmable());
    }
}
