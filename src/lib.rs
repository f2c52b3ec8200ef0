// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lupusec Lib - A Rust library to control Lupusec alarm panels.
//!
//! This library talks to the local web interface of Lupusec XT1/XT2 panels
//! and exposes the panel as a small set of devices.
//!
//! # Supported Features
//!
//! - **Alarm areas**: Read the mode of each area, arm, disarm and set home
//!   modes 1-3
//! - **Binary sensors**: Door and window contacts (open/closed)
//! - **Power switches**: Read and switch outlets
//! - **Alarm detection**: Raised alarm flag and new alarm entries in the
//!   panel history, remembered across sessions
//!
//! # Quick Start
//!
//! ```no_run
//! use lupusec_lib::Lupusec;
//!
//! #[tokio::main]
//! async fn main() -> lupusec_lib::Result<()> {
//!     let mut panel = Lupusec::http("192.168.1.50")
//!         .with_credentials("admin", "secret")
//!         .build()
//!         .await?;
//!
//!     for sensor in panel.binary_sensors().await? {
//!         println!("{sensor}");
//!     }
//!
//!     panel.set_home(1, 2).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Polling
//!
//! Each read endpoint is requested at most once per two seconds; reads in
//! between are answered from a cache. See [`cache::PollingCache`].

pub mod cache;
mod client;
pub mod clock;
pub mod device;
pub mod error;
pub mod history;
pub mod protocol;
pub mod registry;
pub mod response;
pub mod types;

pub use client::{Lupusec, LupusecBuilder};
pub use device::{Area, BinarySensor, Device, PowerSwitch};
pub use error::{DeviceError, Error, HistoryError, ParseError, ProtocolError, Result, ValueError};
pub use protocol::HttpConfig;
pub use types::{AreaMode, DeviceId, HomeLevel, PanelModel, SensorStatus, SwitchStatus};
