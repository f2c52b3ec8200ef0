// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cleanup of the panel's JSON-ish response bodies.
//!
//! The web interface emits almost-JSON: string values contain raw tab and
//! line break characters, objects and arrays may end with a trailing comma,
//! and some firmware versions prefix the body with a byte order mark.

use serde::de::DeserializeOwned;

use crate::error::ParseError;

/// Rewrites a raw response body into strict JSON.
///
/// # Examples
///
/// ```
/// use lupusec_lib::protocol::normalize::clean;
///
/// let raw = "{\"name\": \"Front\tdoor\", \"rows\": [1, 2,],}";
/// assert_eq!(clean(raw), "{\"name\": \"Frontdoor\", \"rows\": [1, 2]}");
/// ```
#[must_use]
pub fn clean(raw: &str) -> String {
    let chars: Vec<char> = raw.trim_start_matches('\u{feff}').chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if c == '\t' {
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            } else if c.is_control() {
                continue;
            }
            out.push(c);
            continue;
        }

        match c {
            '"' => in_string = true,
            ',' if closes_after(&chars[i + 1..]) => continue,
            _ => {}
        }
        out.push(c);
    }

    out
}

/// Returns true if the next significant character closes an object or array.
fn closes_after(rest: &[char]) -> bool {
    rest.iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|&c| c == '}' || c == ']')
}

/// Cleans a raw body and deserializes it.
///
/// # Errors
///
/// Returns `ParseError::Json` if the cleaned body is still not valid JSON
/// for `T`.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    let cleaned = clean(raw);
    tracing::trace!(body = %cleaned, "Decoding panel response");
    serde_json::from_str(&cleaned).map_err(ParseError::Json)
}
