// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level thermostat client.
//!
//! The client owns the OAuth token, refreshes it when it has expired, and
//! exposes one method per API call. Minor mode changes are validated before a
//! request is built; a rejected change never reaches the network.
//!
//! ```no_run
//! use vaillant_netatmo_lib::ThermostatClient;
//! use vaillant_netatmo_lib::command::MinorModeRequest;
//! use vaillant_netatmo_lib::protocol::Token;
//! use vaillant_netatmo_lib::types::SetpointMode;
//!
//! # async fn example() -> vaillant_netatmo_lib::Result<()> {
//! let client = ThermostatClient::builder("client-id", "client-secret", Token::new("access", "refresh"))
//!     .on_token_refreshed(|token| println!("store {}", token.refresh_token))
//!     .build()?;
//!
//! for device in client.get_thermostats_data().await? {
//!     for module in &device.modules {
//!         client
//!             .set_minor_mode(&device.id, &module.id, &MinorModeRequest::activate(SetpointMode::Away))
//!             .await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::ClientBuilder;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::command::{
    Command, MinorModeCommand, MinorModeRequest, SystemModeCommand, ThermostatsDataCommand,
};
use crate::error::{Error, ProtocolError};
use crate::protocol::{ClientCredentials, CommandResponse, Protocol, Token, TokenResponse};
use crate::response::{ApiResponse, Device, ThermostatsData};
use crate::types::SystemMode;

/// Callback receiving every refreshed token.
pub type TokenHandler = dyn Fn(&Token) + Send + Sync;

/// Client for the thermostat cloud API.
///
/// Cloning is cheap; clones share the token.
pub struct ThermostatClient<P: Protocol> {
    protocol: Arc<P>,
    credentials: ClientCredentials,
    token: Arc<RwLock<Token>>,
    refresh_lock: Arc<Mutex<()>>,
    clock: Arc<dyn Clock>,
    token_handler: Option<Arc<TokenHandler>>,
}

impl<P: Protocol> Clone for ThermostatClient<P> {
    fn clone(&self) -> Self {
        Self {
            protocol: Arc::clone(&self.protocol),
            credentials: self.credentials.clone(),
            token: Arc::clone(&self.token),
            refresh_lock: Arc::clone(&self.refresh_lock),
            clock: Arc::clone(&self.clock),
            token_handler: self.token_handler.clone(),
        }
    }
}

impl<P: Protocol + fmt::Debug> fmt::Debug for ThermostatClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThermostatClient")
            .field("protocol", &self.protocol)
            .field("client_id", &self.credentials.client_id)
            .field("clock", &self.clock)
            .field("token_handler", &self.token_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl<P: Protocol> ThermostatClient<P> {
    /// Creates a client over an existing protocol.
    pub(crate) fn new(
        protocol: P,
        credentials: ClientCredentials,
        token: Token,
        clock: Arc<dyn Clock>,
        token_handler: Option<Arc<TokenHandler>>,
    ) -> Self {
        Self {
            protocol: Arc::new(protocol),
            credentials,
            token: Arc::new(RwLock::new(token)),
            refresh_lock: Arc::new(Mutex::new(())),
            clock,
            token_handler,
        }
    }

    /// Returns a snapshot of the current token.
    #[must_use]
    pub fn token(&self) -> Token {
        self.token.read().clone()
    }

    /// Returns the clock used for expiry checks.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Exchanges the refresh token for a new token.
    ///
    /// The token handler, if any, receives the new token.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::TokenExpired` if there is no refresh token, or
    /// an error if the token endpoint call fails.
    pub async fn refresh_token(&self) -> Result<Token, Error> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_token_locked().await
    }

    /// Performs the refresh. Callers must hold `refresh_lock`, refresh tokens
    /// are single use.
    async fn refresh_token_locked(&self) -> Result<Token, Error> {
        let refresh_token = {
            let token = self.token.read();
            if !token.can_refresh() {
                return Err(ProtocolError::TokenExpired.into());
            }
            token.refresh_token.clone()
        };

        let response = self
            .protocol
            .refresh_token(&self.credentials, &refresh_token)
            .await?;
        let token = response
            .parse::<TokenResponse>()?
            .into_token(&self.clock.now());

        *self.token.write() = token.clone();
        tracing::info!(expires_at = ?token.expires_at, "Refreshed access token");

        if let Some(handler) = &self.token_handler {
            handler(&token);
        }

        Ok(token)
    }

    fn is_token_expired(&self) -> bool {
        self.token.read().is_expired(&self.clock.now())
    }

    /// Returns a usable access token, refreshing an expired one first.
    async fn access_token(&self) -> Result<String, Error> {
        if self.is_token_expired() {
            let _guard = self.refresh_lock.lock().await;
            // Another task may have refreshed while we waited.
            if self.is_token_expired() {
                tracing::debug!("Access token expired, refreshing");
                return Ok(self.refresh_token_locked().await?.access_token);
            }
        }
        Ok(self.token.read().access_token.clone())
    }

    /// Sends a command with the current access token.
    ///
    /// # Errors
    ///
    /// Returns error if the token cannot be refreshed or the request fails.
    pub async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<CommandResponse, Error> {
        let access_token = self.access_token().await?;
        self.protocol
            .send_command(command, &access_token)
            .await
            .map_err(Error::Protocol)
    }

    /// Lists the account's thermostats.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the answer cannot be parsed.
    pub async fn get_thermostats_data(&self) -> Result<Vec<Device>, Error> {
        let response = self
            .send_command(&ThermostatsDataCommand::default())
            .await?;
        let data: ThermostatsData = response.parse::<ApiResponse<_>>()?.into_body()?;
        Ok(data.devices)
    }

    /// Switches the system mode of a module.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API reports a failure.
    pub async fn set_system_mode(
        &self,
        device_id: &str,
        module_id: &str,
        mode: SystemMode,
    ) -> Result<(), Error> {
        let cmd = SystemModeCommand::new(device_id, module_id, mode);
        let response = self.send_command(&cmd).await?;
        response
            .parse::<ApiResponse<serde_json::Value>>()?
            .ensure_ok()?;
        Ok(())
    }

    /// Activates or deactivates a minor mode.
    ///
    /// The request is validated first; nothing is sent when it is rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::Argument` if the argument combination is not allowed,
    /// or a transport error if the request fails.
    pub async fn set_minor_mode(
        &self,
        device_id: &str,
        module_id: &str,
        request: &MinorModeRequest,
    ) -> Result<(), Error> {
        let change = request.validate_and_build()?;
        let cmd = MinorModeCommand::new(device_id, module_id, change);
        let response = self.send_command(&cmd).await?;
        response
            .parse::<ApiResponse<serde_json::Value>>()?
            .ensure_ok()?;
        Ok(())
    }
}
