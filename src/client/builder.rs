// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat client builder.

use std::fmt;
use std::sync::Arc;

use crate::client::{ThermostatClient, TokenHandler};
use crate::clock::{Clock, SystemClock};
use crate::protocol::{ClientCredentials, Protocol, Token};
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};

/// Builder for [`ThermostatClient`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vaillant_netatmo_lib::ThermostatClient;
/// use vaillant_netatmo_lib::protocol::{HttpConfig, Token};
///
/// let client = ThermostatClient::builder("client-id", "client-secret", Token::new("access", "refresh"))
///     .with_config(HttpConfig::new().with_timeout(Duration::from_secs(5)))
///     .build()
///     .unwrap();
/// assert_eq!(client.token().access_token, "access");
/// ```
pub struct ClientBuilder {
    credentials: ClientCredentials,
    token: Token,
    #[cfg(feature = "http")]
    config: HttpConfig,
    clock: Arc<dyn Clock>,
    token_handler: Option<Arc<TokenHandler>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ClientBuilder");
        s.field("client_id", &self.credentials.client_id);
        #[cfg(feature = "http")]
        s.field("config", &self.config);
        s.field("clock", &self.clock)
            .field("token_handler", &self.token_handler.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http")]
impl ThermostatClient<HttpClient> {
    /// Starts building a client from OAuth application credentials and an
    /// initial token.
    #[must_use]
    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token: Token,
    ) -> ClientBuilder {
        ClientBuilder::new(client_id, client_secret, token)
    }
}

impl ClientBuilder {
    /// Creates a builder with the system clock and default HTTP settings.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token: Token,
    ) -> Self {
        Self {
            credentials: ClientCredentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
            token,
            #[cfg(feature = "http")]
            config: HttpConfig::default(),
            clock: Arc::new(SystemClock),
            token_handler: None,
        }
    }

    /// Sets the HTTP configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the clock used for token expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Registers a callback receiving every refreshed token.
    #[must_use]
    pub fn on_token_refreshed<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Token) + Send + Sync + 'static,
    {
        self.token_handler = Some(Arc::new(handler));
        self
    }

    /// Builds a client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    #[cfg(feature = "http")]
    pub fn build(self) -> crate::Result<ThermostatClient<HttpClient>> {
        let protocol = self.config.clone().into_client()?;
        Ok(self.build_with_protocol(protocol))
    }

    /// Builds a client over a custom protocol.
    #[must_use]
    pub fn build_with_protocol<P: Protocol>(self, protocol: P) -> ThermostatClient<P> {
        ThermostatClient::new(
            protocol,
            self.credentials,
            self.token,
            self.clock,
            self.token_handler,
        )
    }
}
