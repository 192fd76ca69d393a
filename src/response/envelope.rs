// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `{ "status", "body" }` wrapper around every API answer.

use serde::Deserialize;

use crate::error::{ParseError, ProtocolError};

/// Status reported by successful calls.
pub const STATUS_OK: &str = "ok";

/// Generic API answer.
///
/// # Examples
///
/// ```
/// use vaillant_netatmo_lib::response::ApiResponse;
///
/// let response: ApiResponse<serde_json::Value> =
///     serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
/// assert!(response.is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    status: String,
    body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the reported status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns `true` if the status is `"ok"`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Checks the status, discarding any body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ApiStatus` if the status is not `"ok"`.
    pub fn ensure_ok(self) -> Result<(), ProtocolError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ProtocolError::ApiStatus(self.status))
        }
    }

    /// Checks the status and returns the body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ApiStatus` if the status is not `"ok"`, or
    /// `ParseError::MissingField` if there is no body.
    pub fn into_body(self) -> crate::Result<T> {
        if !self.is_ok() {
            return Err(ProtocolError::ApiStatus(self.status).into());
        }
        self.body
            .ok_or_else(|| ParseError::MissingField("body".to_string()).into())
    }
}
