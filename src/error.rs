// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Lupusec library.
//!
//! Failures are grouped by where they originate: argument validation,
//! communication with the panel, decoding of panel payloads, device lookups
//! and the persisted history log.

use thiserror::Error;

use crate::types::DeviceId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value was rejected before any request was sent.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Communication with the panel failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A panel payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device operation failed.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The requested device is not known to the registry.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Home mode level other than 1, 2 or 3.
    #[error("invalid home level: {0} (expected 1, 2 or 3)")]
    InvalidHomeLevel(u8),

    /// Unknown area mode code.
    #[error("invalid area mode code: {0}")]
    InvalidModeCode(u8),

    /// Unknown panel model name.
    #[error("invalid panel model: {0}")]
    InvalidPanelModel(String),
}

/// Errors related to HTTP communication with the panel.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The panel answered with a non-success status.
    #[error("request to {endpoint} failed: HTTP {status}")]
    Status {
        /// The endpoint that was requested.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Basic authentication was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The panel refused to hand out a write token.
    #[error("fetching token failed: {0}")]
    TokenFetchFailed(String),
}

/// Errors related to decoding panel responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// The panel reported a state token outside the known set.
    #[error("invalid {field} state: {value}")]
    InvalidState {
        /// The field that carried the token.
        field: &'static str,
        /// The unrecognized token.
        value: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The operation does not apply to this kind of device.
    #[error("device {id} is a {kind}, not a {expected}")]
    WrongKind {
        /// Device the operation was addressed to.
        id: DeviceId,
        /// Actual kind of the device.
        kind: &'static str,
        /// Kind the operation requires.
        expected: &'static str,
    },
}

/// Errors related to the persisted history log.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading or writing the log file failed.
    #[error("history log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The log file does not contain a valid record list.
    #[error("history log is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
