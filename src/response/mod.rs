// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for the panel's endpoints.
//!
//! Each structure corresponds to one endpoint. Bodies are normalized by
//! [`crate::protocol::normalize`] before they reach these types.

mod action;
mod de;
mod device_row;
mod history;
mod panel;

pub use action::ActionResult;
pub use device_row::{DeviceListResponse, DeviceRow, PowerSwitchListResponse};
pub use history::{ALARM_COLUMN, ALARM_TRIGGERED, HistoryResponse, HistoryRow};
pub use panel::{AreaRow, PanelCondResponse, PanelUpdates};
