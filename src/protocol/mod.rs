// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for the thermostat cloud API.
//!
//! Every call is an authenticated form-encoded POST. The [`Protocol`] trait
//! abstracts the round trip so the client can run over [`HttpClient`] or any
//! other implementation.

mod auth;
#[cfg(feature = "http")]
mod http;

pub use auth::{Token, TokenResponse};
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use crate::command::Command;
use crate::error::ProtocolError;

/// Path of the OAuth token endpoint.
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Raw answer to a successful request.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw JSON response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::error::ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Client application credentials used to refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

/// A transport able to post forms to the API.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Posts form fields to `path` and returns the body of a 2xx answer.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be sent or the status is
    /// not a success.
    async fn post_form(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<CommandResponse, ProtocolError>;

    /// Sends a command authenticated with `access_token`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
        access_token: &str,
    ) -> Result<CommandResponse, ProtocolError> {
        let mut params = command.form_params();
        params.push(("access_token", access_token.to_string()));
        self.post_form(&command.path(), &params).await
    }

    /// Exchanges a refresh token for a new token.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn refresh_token(
        &self,
        credentials: &ClientCredentials,
        refresh_token: &str,
    ) -> Result<CommandResponse, ProtocolError> {
        let params = [
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token.to_string()),
            ("client_id", credentials.client_id.clone()),
            ("client_secret", credentials.client_secret.clone()),
        ];
        self.post_form(TOKEN_PATH, &params).await
    }
}
