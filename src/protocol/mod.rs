// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the panel's web interface.
//!
//! Every request targets `http://<host>/action/<endpoint>`. Reads are plain
//! GET requests; writes are form-encoded POST requests that additionally
//! carry an `x-token` header.
//!
//! - [`HttpClient`]: the reqwest-based transport
//! - [`Protocol`]: the seam the client facade is generic over
//! - [`normalize`]: cleanup of the panel's JSON-ish bodies

mod http;
pub mod normalize;

pub use http::{HttpClient, HttpConfig};

use std::fmt;

use crate::error::{ParseError, ProtocolError};

/// An action endpoint of the web interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    /// Device list (XT1 sensor states).
    DeviceList,
    /// Sensor list (XT2 sensor states).
    SensorList,
    /// Panel condition: area modes and alarm flag.
    Panel,
    /// Power switch list.
    PowerSwitches,
    /// Event history.
    History,
    /// Change the mode of an area.
    SetMode,
    /// Switch a power switch on or off.
    SwitchPower,
    /// Obtain the write token.
    Token,
}

impl Endpoint {
    /// Returns the action name used in the URL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceList => "deviceListGet",
            Self::SensorList => "sensorListGet",
            Self::Panel => "panelCondGet",
            Self::PowerSwitches => "deviceListPSSGet",
            Self::History => "historyGet",
            Self::SetMode => "panelCondPost",
            Self::SwitchPower => "deviceSwitchPSSPost",
            Self::Token => "tokenGet",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response body from the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    body: String,
}

impl ApiResponse {
    /// Creates a response with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Normalizes the body and parses it as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the body cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        normalize::decode(&self.body)
    }
}

/// Trait for transports that can talk to the panel.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Sends a GET request to a read endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the panel answers
    /// with a non-success status.
    async fn get(&self, endpoint: Endpoint) -> Result<ApiResponse, ProtocolError>;

    /// Sends a form-encoded POST request to a write endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write token cannot be obtained, the
    /// request fails or the panel answers with a non-success status.
    async fn post(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, ProtocolError>;
}
