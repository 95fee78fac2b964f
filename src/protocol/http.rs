// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for a remote boiler service.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{Error, ParseError, ProtocolError};
use crate::response::{ErrorResponse, ErrorStateResponse, SetTemperatureRequest};
use crate::types::{BoilerState, Temperature};

use super::{ACTUAL_TEMPERATURE_PATH, BOILER_ERROR_PATH, BOILER_STATE_PATH, DESIRED_TEMPERATURE_PATH};

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for a boiler service.
///
/// # Examples
///
/// ```
/// use boiler_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("localhost");
/// assert_eq!(config.base_url(), "http://localhost:8000");
///
/// let config = HttpConfig::new("192.168.1.20")
///     .with_port(80)
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.base_url(), "http://192.168.1.20");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default service port.
    pub const DEFAULT_PORT: u16 = 8000;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the service on `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == 80 {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Creates a [`BoilerClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` for an empty host, or an HTTP
    /// error if the client cannot be created.
    pub fn into_client(self) -> Result<BoilerClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        BoilerClient::with_timeout(self.base_url(), self.timeout)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new("localhost")
    }
}

// ============================================================================
// BoilerClient
// ============================================================================

/// Typed client for the boiler HTTP interface.
///
/// # Examples
///
/// ```no_run
/// use boiler_lib::protocol::BoilerClient;
///
/// # async fn example() -> boiler_lib::Result<()> {
/// let client = BoilerClient::new("http://localhost:8000")?;
///
/// client.set_desired_temperature(23.0).await?;
/// let actual = client.get_actual_temperature().await?;
/// println!("{actual} °C, {}", client.get_boiler_state().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BoilerClient {
    base_url: String,
    client: Client,
}

impl BoilerClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// A bare `host:port` is treated as `http://host:port`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProtocolError> {
        Self::with_timeout(base_url, HttpConfig::DEFAULT_TIMEOUT)
    }

    fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProtocolError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ProtocolError::InvalidAddress("base URL is required".to_string()));
        }
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url.to_string()
        } else {
            format!("http://{base_url}")
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { base_url, client })
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the measured temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn get_actual_temperature(&self) -> Result<Temperature, Error> {
        let body = self.send(self.client.get(self.url(ACTUAL_TEMPERATURE_PATH))).await?;
        field(&body, "actual_temperature")
    }

    /// Fetches the setpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn get_desired_temperature(&self) -> Result<Temperature, Error> {
        let body = self.send(self.client.get(self.url(DESIRED_TEMPERATURE_PATH))).await?;
        field(&body, "desired_temperature")
    }

    /// Sets the setpoint and returns the service's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Status` with status 400 if the service
    /// rejects the value.
    pub async fn set_desired_temperature(&self, celsius: f64) -> Result<String, Error> {
        self.post_setpoint(&SetTemperatureRequest::new(celsius)).await
    }

    /// Sends an arbitrary JSON value as the setpoint.
    ///
    /// Useful for numeric strings, or to check how the service rejects
    /// malformed values.
    ///
    /// # Errors
    ///
    /// Same as [`set_desired_temperature`](Self::set_desired_temperature).
    pub async fn set_desired_temperature_value(
        &self,
        value: serde_json::Value,
    ) -> Result<String, Error> {
        self.post_setpoint(&SetTemperatureRequest {
            desired_temperature: value,
        })
        .await
    }

    /// Fetches whether the boiler is heating.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn get_boiler_state(&self) -> Result<BoilerState, Error> {
        let body = self.send(self.client.get(self.url(BOILER_STATE_PATH))).await?;
        field(&body, "state")
    }

    /// Fetches the fault code and its message.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is malformed.
    pub async fn get_error_state(&self) -> Result<ErrorStateResponse, Error> {
        let body = self.send(self.client.get(self.url(BOILER_ERROR_PATH))).await?;
        Ok(ErrorStateResponse {
            error_code: field(&body, "error_code")?,
            error_message: field(&body, "error_message")?,
        })
    }

    async fn post_setpoint(&self, request: &SetTemperatureRequest) -> Result<String, Error> {
        let body = self
            .send(self.client.post(self.url(DESIRED_TEMPERATURE_PATH)).json(request))
            .await?;
        field(&body, "message")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<serde_json::Value, Error> {
        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status();
        let text = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status = status.as_u16(), body = %text, "Received HTTP response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown").to_string());
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        serde_json::from_str(&text).map_err(|e| ParseError::Json(e).into())
    }
}

/// Extracts and deserializes one field of a JSON object.
fn field<T: DeserializeOwned>(body: &serde_json::Value, key: &str) -> Result<T, Error> {
    let value = body
        .get(key)
        .ok_or_else(|| ParseError::MissingField(key.to_string()))?;
    T::deserialize(value).map_err(|e| ParseError::Json(e).into())
}
