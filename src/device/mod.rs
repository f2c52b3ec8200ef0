// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Devices known to the panel.
//!
//! The registry holds three kinds of devices:
//!
//! - [`Area`]: an armable alarm area, built from the panel condition
//! - [`BinarySensor`]: a door or window contact
//! - [`PowerSwitch`]: a remote-controllable outlet
//!
//! Rows from the device lists are turned into devices by [`classify`] and
//! [`classify_switch`], which look the vendor type code up in the
//! [`DeviceType`] table.

mod area;
mod binary_sensor;
mod switch;

pub use area::Area;
pub use binary_sensor::BinarySensor;
pub use switch::PowerSwitch;

use std::fmt;

use crate::error::ParseError;
use crate::response::DeviceRow;
use crate::types::{DeviceId, DeviceKind, DeviceType};

/// A device held by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Device {
    /// Alarm area.
    Area(Area),
    /// Door or window contact.
    BinarySensor(BinarySensor),
    /// Power switch.
    Switch(PowerSwitch),
}

impl Device {
    /// Returns the registry id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        match self {
            Self::Area(area) => area.id(),
            Self::BinarySensor(sensor) => sensor.id(),
            Self::Switch(switch) => switch.id(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Area(area) => area.name(),
            Self::BinarySensor(sensor) => sensor.name(),
            Self::Switch(switch) => switch.name(),
        }
    }

    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Area(_) => DeviceKind::Alarm,
            Self::BinarySensor(_) => DeviceKind::BinarySensor,
            Self::Switch(_) => DeviceKind::Switch,
        }
    }

    /// Returns a short name of the device kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns true if the device is active: an open contact, a switch
    /// that is on, or an area whose alarm went off.
    #[must_use]
    pub fn is_on(&self) -> bool {
        match self {
            Self::Area(area) => area.is_alarm_triggered(),
            Self::BinarySensor(sensor) => sensor.is_on(),
            Self::Switch(switch) => switch.is_on(),
        }
    }

    /// Returns the area, if this is one.
    #[must_use]
    pub fn as_area(&self) -> Option<&Area> {
        match self {
            Self::Area(area) => Some(area),
            _ => None,
        }
    }

    /// Returns the binary sensor, if this is one.
    #[must_use]
    pub fn as_binary_sensor(&self) -> Option<&BinarySensor> {
        match self {
            Self::BinarySensor(sensor) => Some(sensor),
            _ => None,
        }
    }

    /// Returns the power switch, if this is one.
    #[must_use]
    pub fn as_switch(&self) -> Option<&PowerSwitch> {
        match self {
            Self::Switch(switch) => Some(switch),
            _ => None,
        }
    }

    /// Updates a sensor or switch in place from a fresh list row.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the row cannot be decoded, or if this device
    /// is an area (areas are only updated from the panel condition).
    pub fn apply_row(&mut self, row: &DeviceRow) -> Result<(), ParseError> {
        match self {
            Self::Area(area) => Err(ParseError::UnexpectedFormat(format!(
                "device row cannot update {}",
                area.id()
            ))),
            Self::BinarySensor(sensor) => sensor.apply_row(row),
            Self::Switch(switch) => switch.apply_row(row),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area(area) => area.fmt(f),
            Self::BinarySensor(sensor) => sensor.fmt(f),
            Self::Switch(switch) => switch.fmt(f),
        }
    }
}

/// Outcome of classifying a row that is not yet in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// An alarm area.
    Alarm(Area),
    /// A door or window contact.
    BinarySensor(BinarySensor),
    /// A power switch.
    Switch(PowerSwitch),
    /// A row of a type the registry does not model.
    Unknown {
        /// Vendor type code, if the row had one.
        type_code: Option<i64>,
    },
}

impl Classified {
    /// Converts into a registry device, or `None` for unknown rows.
    #[must_use]
    pub fn into_device(self) -> Option<Device> {
        match self {
            Self::Alarm(area) => Some(Device::Area(area)),
            Self::BinarySensor(sensor) => Some(Device::BinarySensor(sensor)),
            Self::Switch(switch) => Some(Device::Switch(switch)),
            Self::Unknown { .. } => None,
        }
    }
}

/// Classifies a sensor or device list row by its vendor type code.
///
/// # Errors
///
/// Returns `ParseError::MissingField` if the row has no id, or a decoding
/// error if the status of a known type cannot be read.
///
/// # Examples
///
/// ```
/// use lupusec_lib::device::{Classified, classify};
/// use lupusec_lib::response::DeviceRow;
///
/// let row = DeviceRow::with_id("5").with_type(4).with_status("{WEB_MSG_DC_OPEN}");
/// assert!(matches!(classify(&row).unwrap(), Classified::BinarySensor(_)));
///
/// let row = DeviceRow::with_id("6").with_type(999).with_status("x");
/// assert!(matches!(classify(&row).unwrap(), Classified::Unknown { type_code: Some(999) }));
/// ```
pub fn classify(row: &DeviceRow) -> Result<Classified, ParseError> {
    let Some(device_type) = row
        .type_code
        .and_then(|code| u16::try_from(code).ok())
        .and_then(DeviceType::lookup)
    else {
        return Ok(Classified::Unknown {
            type_code: row.type_code,
        });
    };
    build(row, device_type)
}

/// Classifies a power switch list row.
///
/// Every row of that list is a switch. A switch-kind type code is kept;
/// anything else falls back to the generic power switch type.
///
/// # Errors
///
/// Returns `ParseError::MissingField` if the row has no id, or a decoding
/// error if the switch status cannot be read.
pub fn classify_switch(row: &DeviceRow) -> Result<Classified, ParseError> {
    let device_type = row
        .type_code
        .and_then(|code| u16::try_from(code).ok())
        .and_then(DeviceType::lookup)
        .filter(|t| t.kind == DeviceKind::Switch)
        .unwrap_or_else(DeviceType::power_switch);
    build(row, device_type)
}

fn build(row: &DeviceRow, device_type: &'static DeviceType) -> Result<Classified, ParseError> {
    let id = row
        .identity()
        .ok_or_else(|| ParseError::MissingField("sid".to_string()))?;
    Ok(match device_type.kind {
        DeviceKind::Alarm => Classified::Unknown {
            type_code: row.type_code,
        },
        DeviceKind::BinarySensor => {
            Classified::BinarySensor(BinarySensor::from_row(id, device_type, row)?)
        }
        DeviceKind::Switch => Classified::Switch(PowerSwitch::from_row(id, device_type, row)?),
    })
}
