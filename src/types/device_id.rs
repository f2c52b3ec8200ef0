// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::fmt;

const AREA_PREFIX: &str = "area-";

/// Identifier of a device known to the registry.
///
/// Sensors and switches use the id the panel assigns them. Alarm areas are
/// not listed by the panel and get a reserved id of the form `area-<n>`,
/// which cannot collide with the panel's numeric ids.
///
/// # Examples
///
/// ```
/// use lupusec_lib::types::DeviceId;
///
/// let sensor = DeviceId::new("5");
/// assert_eq!(sensor.as_str(), "5");
/// assert!(sensor.area_number().is_none());
///
/// let area = DeviceId::area(1);
/// assert_eq!(area.to_string(), "area-1");
/// assert_eq!(area.area_number(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates an id from the panel's identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the reserved id of an alarm area.
    #[must_use]
    pub fn area(number: u8) -> Self {
        Self(format!("{AREA_PREFIX}{number}"))
    }

    /// Returns the area number if this is a reserved area id.
    #[must_use]
    pub fn area_number(&self) -> Option<u8> {
        self.0.strip_prefix(AREA_PREFIX)?.parse().ok()
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
