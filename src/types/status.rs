// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor and power switch states.

use std::fmt;

use crate::error::ParseError;

const DC_OPEN: &str = "{WEB_MSG_DC_OPEN}";
const DC_CLOSE: &str = "{WEB_MSG_DC_CLOSE}";

const PSS_ON: &str = "{WEB_MSG_PSS_ON}";
const PSS_OFF: &str = "{WEB_MSG_PSS_OFF}";
const PSS_OFFLINE: &str = "{WEB_MSG_PSS_OFFLINE}";

/// State of a door or window contact.
///
/// Older firmware reports a placeholder token in the `status` column; newer
/// sensor lists carry a numeric `cond` flag instead and leave the status
/// empty when the contact is open. Both decode into this enum.
///
/// # Examples
///
/// ```
/// use lupusec_lib::types::SensorStatus;
///
/// assert_eq!(SensorStatus::from_token("{WEB_MSG_DC_OPEN}").unwrap(), SensorStatus::Open);
/// assert_eq!(SensorStatus::from_cond(0), SensorStatus::Closed);
/// assert_eq!(SensorStatus::from_cond(1), SensorStatus::Open);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorStatus {
    /// Contact is open.
    Open,
    /// Contact is closed.
    Closed,
}

impl SensorStatus {
    /// Decodes the `status` column.
    ///
    /// An empty string is the absence of the "closed" label and means open.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` for any other token.
    pub fn from_token(token: &str) -> Result<Self, ParseError> {
        match token.trim() {
            DC_OPEN | "" => Ok(Self::Open),
            DC_CLOSE => Ok(Self::Closed),
            other => Err(ParseError::InvalidState {
                field: "sensor status",
                value: other.to_string(),
            }),
        }
    }

    /// Decodes the numeric `cond` flag.
    #[must_use]
    pub const fn from_cond(cond: i64) -> Self {
        if cond == 0 { Self::Closed } else { Self::Open }
    }

    /// Returns the canonical placeholder token.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Open => DC_OPEN,
            Self::Closed => DC_CLOSE,
        }
    }

    /// Returns true if the contact is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("Open"),
            Self::Closed => f.write_str("Closed"),
        }
    }
}

/// State of a power switch.
///
/// # Examples
///
/// ```
/// use lupusec_lib::types::SwitchStatus;
///
/// assert_eq!(SwitchStatus::from_token("{WEB_MSG_PSS_ON}").unwrap(), SwitchStatus::On);
/// assert_eq!(SwitchStatus::from_code(0).unwrap(), SwitchStatus::Off);
/// assert!(SwitchStatus::from_code(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchStatus {
    /// Switch is on.
    On,
    /// Switch is off.
    Off,
    /// Switch does not answer the panel.
    Offline,
}

impl SwitchStatus {
    /// Decodes a status token.
    ///
    /// Accepts the placeholder tokens, plain `on`/`off`/`offline` and the
    /// numeric codes `1`/`0`/`-1`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` for anything else.
    pub fn from_token(token: &str) -> Result<Self, ParseError> {
        let token = token.trim();
        match token {
            PSS_ON => return Ok(Self::On),
            PSS_OFF => return Ok(Self::Off),
            PSS_OFFLINE => return Ok(Self::Offline),
            _ => {}
        }

        if let Ok(code) = token.parse::<i64>() {
            return Self::from_code(code);
        }

        match token.to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "offline" => Ok(Self::Offline),
            _ => Err(ParseError::InvalidState {
                field: "switch status",
                value: token.to_string(),
            }),
        }
    }

    /// Decodes a numeric status code.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` unless the code is 1, 0 or -1.
    pub fn from_code(code: i64) -> Result<Self, ParseError> {
        match code {
            1 => Ok(Self::On),
            0 => Ok(Self::Off),
            -1 => Ok(Self::Offline),
            other => Err(ParseError::InvalidState {
                field: "switch status",
                value: other.to_string(),
            }),
        }
    }

    /// Returns the canonical placeholder token.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::On => PSS_ON,
            Self::Off => PSS_OFF,
            Self::Offline => PSS_OFFLINE,
        }
    }

    /// Returns true if the switch is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for SwitchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("On"),
            Self::Off => f.write_str("Off"),
            Self::Offline => f.write_str("Offline"),
        }
    }
}
