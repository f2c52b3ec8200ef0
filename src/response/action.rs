// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result of a write request.

use serde::Deserialize;

/// Outcome reported by write endpoints and `tokenGet`.
///
/// The panel answers every POST with `{"result": <n>, "message": "..."}`;
/// only `result == 1` means success. For `tokenGet` the message carries the
/// token.
///
/// # Examples
///
/// ```
/// use lupusec_lib::response::ActionResult;
///
/// let ok: ActionResult = serde_json::from_str(r#"{"result": 1, "message": "abc"}"#).unwrap();
/// assert!(ok.is_success());
///
/// let rejected: ActionResult = serde_json::from_str(r#"{"result": "0"}"#).unwrap();
/// assert!(!rejected.is_success());
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ActionResult {
    /// Numeric result code.
    #[serde(default, deserialize_with = "super::de::opt_int")]
    result: Option<i64>,
    /// Message or token.
    #[serde(default, deserialize_with = "super::de::opt_string")]
    message: Option<String>,
}

impl ActionResult {
    /// Result code the panel uses for success.
    pub const SUCCESS: i64 = 1;

    /// Returns true if the panel accepted the request.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result == Some(Self::SUCCESS)
    }

    /// Returns the raw result code.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        self.result
    }

    /// Returns the message, or an empty string if none was sent.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_result_is_failure() {
        let result: ActionResult = serde_json::from_str(r#"{"message": "denied"}"#).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.message(), "denied");
    }

    #[test]
    fn string_result_code() {
        let result: ActionResult = serde_json::from_str(r#"{"result": "1"}"#).unwrap();
        assert!(result.is_success());
        assert_eq!(result.message(), "");
    }
}
