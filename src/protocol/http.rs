// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the thermostat cloud API.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Protocol};

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration of the HTTP transport.
///
/// # Examples
///
/// ```
/// use vaillant_netatmo_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Defaults: the public API endpoint, 10 s timeout
/// let config = HttpConfig::new();
/// assert_eq!(config.base_url(), "https://api.netatmo.com");
///
/// let config = HttpConfig::new()
///     .with_base_url("http://127.0.0.1:8080/")
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("my-thermostat/1.0");
/// assert_eq!(config.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl HttpConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.netatmo.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Sets the API base URL. A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent if set.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the HTTP client cannot
    /// be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let mut builder = Client::builder().timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url,
            client,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client posting forms to the thermostat API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a client for the default API endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        HttpConfig::new().into_client()
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Protocol for HttpClient {
    async fn post_form(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<CommandResponse, ProtocolError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self
            .client
            .post(&url)
            .form(params)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received HTTP response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !status.is_success() {
            return Err(ProtocolError::RequestFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::trace!(body = %body, "Response body");

        Ok(CommandResponse::new(body))
    }
}
