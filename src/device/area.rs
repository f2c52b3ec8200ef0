// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alarm area device.

use std::fmt;

use crate::error::ParseError;
use crate::response::AreaRow;
use crate::types::{AreaMode, DeviceId};

/// One armable area of the alarm panel.
///
/// Areas are not part of the device list; they are built from the panel
/// condition and filed under a reserved [`DeviceId::area`] id.
///
/// # Examples
///
/// ```
/// use lupusec_lib::device::Area;
/// use lupusec_lib::response::AreaRow;
/// use lupusec_lib::types::AreaMode;
///
/// let row = AreaRow { number: 1, mode: "{AREA_MODE_1}".to_string(), alarm: true };
/// let area = Area::from_row(&row).unwrap();
/// assert_eq!(area.mode(), AreaMode::Armed);
/// assert!(area.is_alarm_triggered());
/// assert_eq!(area.to_string(), "Area 1: Armed [ALARM TRIGGERED!]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    id: DeviceId,
    number: u8,
    mode: AreaMode,
    alarm: bool,
    history_alarm: bool,
}

impl Area {
    /// Builds an area from its panel row.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` if the mode token is unknown.
    pub fn from_row(row: &AreaRow) -> Result<Self, ParseError> {
        Ok(Self {
            id: DeviceId::area(row.number),
            number: row.number,
            mode: AreaMode::from_token(&row.mode)?,
            alarm: row.alarm,
            history_alarm: false,
        })
    }

    /// Applies a fresh panel row.
    ///
    /// The row is decoded before anything is changed, so a rejected row
    /// leaves the area as it was.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` if the mode token is unknown.
    pub fn apply_row(&mut self, row: &AreaRow) -> Result<(), ParseError> {
        let mode = AreaMode::from_token(&row.mode)?;
        self.mode = mode;
        self.alarm = row.alarm;
        Ok(())
    }

    /// Returns the registry id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the area number (1-based).
    #[must_use]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("Area {}", self.number)
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> AreaMode {
        self.mode
    }

    /// Returns the mode as the panel's placeholder token.
    #[must_use]
    pub fn mode_token(&self) -> String {
        self.mode.token()
    }

    /// Returns true if the area is disarmed.
    #[must_use]
    pub fn is_disarmed(&self) -> bool {
        self.mode == AreaMode::Disarmed
    }

    /// Returns true if the area is fully armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.mode == AreaMode::Armed
    }

    /// Returns true if the area is in any home mode.
    #[must_use]
    pub fn is_home(&self) -> bool {
        self.mode.is_home()
    }

    /// Returns the raw alarm flag of the last panel poll.
    #[must_use]
    pub fn alarm_flag(&self) -> bool {
        self.alarm
    }

    /// Returns true if the alarm went off.
    ///
    /// Either the panel raises its alarm flag while the area is not
    /// disarmed, or the latest panel poll found a new alarm entry in the
    /// history.
    #[must_use]
    pub fn is_alarm_triggered(&self) -> bool {
        (self.alarm && !self.is_disarmed()) || self.history_alarm
    }

    pub(crate) fn set_mode(&mut self, mode: AreaMode) {
        self.mode = mode;
    }

    pub(crate) fn set_history_alarm(&mut self, triggered: bool) {
        self.history_alarm = triggered;
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area {}: {}", self.number, self.mode)?;
        if self.is_alarm_triggered() {
            f.write_str(" [ALARM TRIGGERED!]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(mode: &str, alarm: bool) -> AreaRow {
        AreaRow {
            number: 1,
            mode: mode.to_string(),
            alarm,
        }
    }

    #[test]
    fn disarmed_area_never_triggers_from_flag() {
        let area = Area::from_row(&row("{AREA_MODE_0}", true)).unwrap();
        assert!(area.is_disarmed());
        assert!(!area.is_alarm_triggered());
    }

    #[test]
    fn home_mode() {
        let area = Area::from_row(&row("{AREA_MODE_3}", false)).unwrap();
        assert!(area.is_home());
        assert_eq!(area.mode(), AreaMode::Home2);
        assert_eq!(area.id(), &DeviceId::area(1));
        assert_eq!(area.name(), "Area 1");
    }

    #[test]
    fn rejected_row_leaves_area_untouched() {
        let mut area = Area::from_row(&row("{AREA_MODE_1}", false)).unwrap();
        let err = area.apply_row(&row("{AREA_MODE_7}", true)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidState { .. }));
        assert_eq!(area.mode(), AreaMode::Armed);
        assert!(!area.alarm_flag());
    }

    #[test]
    fn history_alarm_triggers_even_when_flag_is_clear() {
        let mut area = Area::from_row(&row("{AREA_MODE_0}", false)).unwrap();
        area.set_history_alarm(true);
        assert!(area.is_alarm_triggered());
        area.set_history_alarm(false);
        assert!(!area.is_alarm_triggered());
    }

    #[test]
    fn set_mode_keeps_token_consistent() {
        let mut area = Area::from_row(&row("{AREA_MODE_0}", false)).unwrap();
        area.set_mode(AreaMode::Home3);
        assert_eq!(area.mode_token(), "{AREA_MODE_4}");
        assert_eq!(AreaMode::from_token(&area.mode_token()).unwrap(), area.mode());
    }
}
