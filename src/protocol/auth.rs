// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OAuth tokens.
//!
//! Storing tokens between runs is left to the caller; the client reports
//! every refreshed token through its token handler.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// An OAuth access/refresh token pair.
///
/// # Examples
///
/// ```
/// use vaillant_netatmo_lib::protocol::Token;
///
/// let token = Token::new("access", "refresh");
/// assert!(token.expires_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer token sent with every request.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: String,
    /// Expiry as unix epoch seconds, if known.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Token {
    /// Creates a token with unknown expiry.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: None,
        }
    }

    /// Sets the expiry.
    #[must_use]
    pub fn with_expires_at(mut self, expires_at: i64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns `true` if the expiry is known and not after `now`.
    #[must_use]
    pub fn is_expired<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now.timestamp())
    }

    /// Returns `true` if the token can be refreshed.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

/// Answer of the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// New access token.
    pub access_token: String,
    /// New refresh token.
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Converts the answer into a token, anchoring the lifetime at `now`.
    #[must_use]
    pub fn into_token<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_in
                .map(|secs| now.timestamp().saturating_add(secs)),
        }
    }
}
