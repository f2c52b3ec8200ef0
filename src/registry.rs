// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of known devices.
//!
//! Every poll reconciles the fetched rows against the registry: a device
//! that is already known is updated in place and keeps its identity, new
//! rows are classified and added, and rows of unmodelled types are logged
//! and skipped. Devices missing from a poll are kept.

use std::collections::BTreeMap;

use crate::device::{Area, BinarySensor, Classified, Device, PowerSwitch};
use crate::error::ParseError;
use crate::response::{AreaRow, DeviceRow};
use crate::types::DeviceId;

/// Devices keyed by their id.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<DeviceId, Device>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles device rows against the registry.
    ///
    /// Known ids are updated through [`Device::apply_row`]. Unknown ids are
    /// passed to `constructor`; [`Classified::Unknown`] results are dropped
    /// with a warning. Rows without any id are skipped.
    ///
    /// Rows are applied in order. A decoding error aborts the pass; rows
    /// applied before it keep their new state.
    ///
    /// # Errors
    ///
    /// Returns the first decoding error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lupusec_lib::device::classify;
    /// use lupusec_lib::registry::DeviceRegistry;
    /// use lupusec_lib::response::DeviceRow;
    ///
    /// let mut registry = DeviceRegistry::new();
    /// let rows = [
    ///     DeviceRow::with_id("5").with_type(4).with_status("{WEB_MSG_DC_CLOSE}"),
    ///     DeviceRow::with_id("6").with_type(999).with_status("?"),
    /// ];
    /// let devices = registry.reconcile(&rows, classify).unwrap();
    /// assert_eq!(devices.len(), 1);
    /// ```
    pub fn reconcile<F>(
        &mut self,
        rows: &[DeviceRow],
        mut constructor: F,
    ) -> Result<&BTreeMap<DeviceId, Device>, ParseError>
    where
        F: FnMut(&DeviceRow) -> Result<Classified, ParseError>,
    {
        for row in rows {
            let Some(id) = row.identity() else {
                tracing::warn!(?row, "Skipping device row without id");
                continue;
            };

            if let Some(device) = self.devices.get_mut(&id) {
                device.apply_row(row)?;
                continue;
            }

            match constructor(row)?.into_device() {
                Some(device) => {
                    tracing::debug!(%id, kind = device.kind_name(), "Adding device");
                    self.devices.insert(id, device);
                }
                None => {
                    tracing::warn!(
                        %id,
                        type_code = ?row.type_code,
                        name = ?row.name,
                        "Ignoring device of unsupported type"
                    );
                }
            }
        }
        Ok(&self.devices)
    }

    /// Reconciles the areas reported by the panel condition.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` for an unknown mode token.
    pub fn reconcile_panel(&mut self, rows: &[AreaRow]) -> Result<(), ParseError> {
        for row in rows {
            let id = DeviceId::area(row.number);
            match self.devices.get_mut(&id) {
                Some(Device::Area(area)) => area.apply_row(row)?,
                Some(other) => {
                    return Err(ParseError::UnexpectedFormat(format!(
                        "{id} is registered as a {}",
                        other.kind_name()
                    )));
                }
                None => {
                    let area = Area::from_row(row)?;
                    tracing::debug!(%id, mode = %area.mode(), "Adding area");
                    if let Some(device) = Classified::Alarm(area).into_device() {
                        self.devices.insert(id, device);
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns a device by id.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Returns a device by id for in-place updates.
    pub fn get_mut(&mut self, id: &DeviceId) -> Option<&mut Device> {
        self.devices.get_mut(id)
    }

    /// Returns true if a device with this id is known.
    #[must_use]
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    /// Iterates over all devices in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Returns the area with the given number.
    #[must_use]
    pub fn area(&self, number: u8) -> Option<&Area> {
        self.devices.get(&DeviceId::area(number))?.as_area()
    }

    pub(crate) fn area_mut(&mut self, number: u8) -> Option<&mut Area> {
        match self.devices.get_mut(&DeviceId::area(number))? {
            Device::Area(area) => Some(area),
            _ => None,
        }
    }

    pub(crate) fn switch_mut(&mut self, id: &DeviceId) -> Option<&mut PowerSwitch> {
        match self.devices.get_mut(id)? {
            Device::Switch(switch) => Some(switch),
            _ => None,
        }
    }

    /// Returns all areas.
    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.iter().filter_map(Device::as_area)
    }

    pub(crate) fn areas_mut(&mut self) -> impl Iterator<Item = &mut Area> {
        self.devices.values_mut().filter_map(|device| match device {
            Device::Area(area) => Some(area),
            _ => None,
        })
    }

    /// Returns all door and window contacts.
    pub fn binary_sensors(&self) -> impl Iterator<Item = &BinarySensor> {
        self.iter().filter_map(Device::as_binary_sensor)
    }

    /// Returns all power switches.
    pub fn switches(&self) -> impl Iterator<Item = &PowerSwitch> {
        self.iter().filter_map(Device::as_switch)
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if no device is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
