// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Lupusec panels.
//!
//! These types decode the panel's placeholder tokens and numeric codes into
//! closed enums. Decoding rejects anything outside the known set instead of
//! falling back to a default.
//!
//! # Types
//!
//! - [`AreaMode`] - Disarmed, Armed, Home 1-3
//! - [`HomeLevel`] - Level of the home mode (1-3)
//! - [`SensorStatus`] - Open/Closed state of a contact
//! - [`SwitchStatus`] - On/Off/Offline state of a power switch
//! - [`DeviceId`] - Registry key of a device
//! - [`DeviceType`] / [`DeviceKind`] - Vendor type table
//! - [`PanelModel`] - XT1 or XT2 firmware family

mod device_id;
mod device_type;
mod mode;
mod panel_model;
mod status;

pub use device_id::DeviceId;
pub use device_type::{DeviceKind, DeviceType};
pub use mode::{AreaMode, HomeLevel};
pub use panel_model::PanelModel;
pub use status::{SensorStatus, SwitchStatus};
