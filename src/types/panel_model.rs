// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel firmware family.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::protocol::Endpoint;

/// The panel firmware family.
///
/// The families differ in where sensor states are listed: XT1 panels
/// report them in the device list with placeholder status tokens, XT2
/// panels have a dedicated sensor list with a numeric `cond` flag.
///
/// # Examples
///
/// ```
/// use lupusec_lib::types::PanelModel;
///
/// let model: PanelModel = "xt2".parse().unwrap();
/// assert_eq!(model, PanelModel::Xt2);
/// assert!("xt9".parse::<PanelModel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelModel {
    /// XT1 firmware.
    #[default]
    Xt1,
    /// XT2 firmware and later.
    Xt2,
}

impl PanelModel {
    /// Returns the endpoint that lists sensors for this family.
    #[must_use]
    pub const fn sensor_endpoint(&self) -> Endpoint {
        match self {
            Self::Xt1 => Endpoint::DeviceList,
            Self::Xt2 => Endpoint::SensorList,
        }
    }
}

impl fmt::Display for PanelModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xt1 => f.write_str("xt1"),
            Self::Xt2 => f.write_str("xt2"),
        }
    }
}

impl FromStr for PanelModel {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xt1" => Ok(Self::Xt1),
            "xt2" | "xt3" => Ok(Self::Xt2),
            _ => Err(ValueError::InvalidPanelModel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_endpoint_per_model() {
        assert_eq!(PanelModel::Xt1.sensor_endpoint(), Endpoint::DeviceList);
        assert_eq!(PanelModel::Xt2.sensor_endpoint(), Endpoint::SensorList);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("XT1".parse::<PanelModel>().unwrap(), PanelModel::Xt1);
    }

    #[test]
    fn display_round_trip() {
        for model in [PanelModel::Xt1, PanelModel::Xt2] {
            assert_eq!(model.to_string().parse::<PanelModel>().unwrap(), model);
        }
    }
}
