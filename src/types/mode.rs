// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alarm area modes.
//!
//! The panel reports the mode of each area as a placeholder token of the
//! shape `{AREA_MODE_<n>}` and accepts the bare code `n` when setting it.

use std::fmt;

use crate::error::{ParseError, ValueError};

/// The mode of an alarm area.
///
/// # Examples
///
/// ```
/// use lupusec_lib::types::AreaMode;
///
/// let mode = AreaMode::from_token("{AREA_MODE_1}").unwrap();
/// assert_eq!(mode, AreaMode::Armed);
/// assert_eq!(mode.code(), 1);
/// assert_eq!(mode.token(), "{AREA_MODE_1}");
///
/// assert!(AreaMode::from_token("{AREA_MODE_9}").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaMode {
    /// Alarm is disarmed.
    Disarmed,
    /// Alarm is fully armed (away).
    Armed,
    /// Home mode, level 1.
    Home1,
    /// Home mode, level 2.
    Home2,
    /// Home mode, level 3.
    Home3,
}

impl AreaMode {
    /// All modes in code order.
    pub const ALL: [Self; 5] = [
        Self::Disarmed,
        Self::Armed,
        Self::Home1,
        Self::Home2,
        Self::Home3,
    ];

    /// Returns the numeric code the panel uses for this mode.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Disarmed => 0,
            Self::Armed => 1,
            Self::Home1 => 2,
            Self::Home2 => 3,
            Self::Home3 => 4,
        }
    }

    /// Creates a mode from its numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidModeCode` for codes above 4.
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.code() == code)
            .ok_or(ValueError::InvalidModeCode(code))
    }

    /// Returns the home mode for the given level.
    #[must_use]
    pub const fn home(level: HomeLevel) -> Self {
        match level.value() {
            1 => Self::Home1,
            2 => Self::Home2,
            _ => Self::Home3,
        }
    }

    /// Returns the placeholder token the panel reports for this mode.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{{AREA_MODE_{}}}", self.code())
    }

    /// Decodes a placeholder token such as `{AREA_MODE_2}`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidState` for anything that is not one of
    /// the five known tokens.
    pub fn from_token(token: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidState {
            field: "area mode",
            value: token.to_string(),
        };

        let code = token
            .strip_prefix("{AREA_MODE_")
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|digits| digits.len() == 1)
            .and_then(|digits| digits.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        Self::from_code(code).map_err(|_| invalid())
    }

    /// Returns true for any of the three home levels.
    #[must_use]
    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home1 | Self::Home2 | Self::Home3)
    }

    /// Returns a human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::Armed => "Armed",
            Self::Home1 => "Home 1",
            Self::Home2 => "Home 2",
            Self::Home3 => "Home 3",
        }
    }
}

impl fmt::Display for AreaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Level of the home mode (1-3).
///
/// # Examples
///
/// ```
/// use lupusec_lib::types::HomeLevel;
///
/// assert_eq!(HomeLevel::new(2).unwrap().value(), 2);
/// assert!(HomeLevel::new(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HomeLevel(u8);

impl HomeLevel {
    /// Creates a home level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHomeLevel` unless `level` is 1, 2 or 3.
    pub fn new(level: u8) -> Result<Self, ValueError> {
        if (1..=3).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ValueError::InvalidHomeLevel(level))
        }
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}
