// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor device type table.
//!
//! Device list rows carry a numeric `type` column. Only the types listed
//! here are modelled; rows of any other type are dropped during a poll.

use std::fmt;

/// The kind of device a vendor type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Alarm area reported by the panel condition.
    Alarm,
    /// Door or window contact.
    BinarySensor,
    /// Remote-controllable power outlet.
    Switch,
}

impl DeviceKind {
    /// Returns a short name for diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alarm => "alarm",
            Self::BinarySensor => "binary sensor",
            Self::Switch => "switch",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known vendor device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceType {
    /// Numeric type code reported by the panel.
    pub code: u16,
    /// Kind the type is modelled as.
    pub kind: DeviceKind,
    /// Human readable type name.
    pub label: &'static str,
}

const KNOWN_TYPES: &[DeviceType] = &[
    DeviceType {
        code: 4,
        kind: DeviceKind::BinarySensor,
        label: "Door Contact",
    },
    DeviceType {
        code: 33,
        kind: DeviceKind::BinarySensor,
        label: "Window Contact",
    },
    DeviceType {
        code: 48,
        kind: DeviceKind::Switch,
        label: "Power Switch",
    },
    DeviceType {
        code: 74,
        kind: DeviceKind::Switch,
        label: "Power Switch Meter",
    },
];

impl DeviceType {
    /// Looks up a vendor type code.
    ///
    /// # Examples
    ///
    /// ```
    /// use lupusec_lib::types::{DeviceKind, DeviceType};
    ///
    /// let door = DeviceType::lookup(4).unwrap();
    /// assert_eq!(door.kind, DeviceKind::BinarySensor);
    /// assert_eq!(door.label, "Door Contact");
    ///
    /// assert!(DeviceType::lookup(999).is_none());
    /// ```
    #[must_use]
    pub fn lookup(code: u16) -> Option<&'static Self> {
        KNOWN_TYPES.iter().find(|t| t.code == code)
    }

    /// Returns the generic type used for power switch list rows, which do
    /// not always carry a type column.
    #[must_use]
    pub fn power_switch() -> &'static Self {
        &KNOWN_TYPES[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_types() {
        assert_eq!(DeviceType::lookup(33).unwrap().label, "Window Contact");
        assert_eq!(DeviceType::lookup(74).unwrap().kind, DeviceKind::Switch);
    }

    #[test]
    fn table_has_no_alarm_types() {
        assert!(KNOWN_TYPES.iter().all(|t| t.kind != DeviceKind::Alarm));
    }

    #[test]
    fn power_switch_default() {
        let pss = DeviceType::power_switch();
        assert_eq!(pss.code, 48);
        assert_eq!(pss.kind, DeviceKind::Switch);
    }

    #[test]
    fn kind_display() {
        assert_eq!(DeviceKind::BinarySensor.to_string(), "binary sensor");
        assert_eq!(DeviceKind::Alarm.to_string(), "alarm");
    }
}
