// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the boiler library.
//!
//! Only [`ValueError`] can be triggered by a caller of the regulation
//! engine. Transport and parsing errors only arise in the optional HTTP
//! client and server.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The regulation configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The engine was created outside a tokio runtime.
    #[error("no tokio runtime available to run the regulation loop")]
    NoRuntime,
}

impl Error {
    /// Returns `true` if this error was caused by an invalid caller value.
    #[must_use]
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Errors related to caller input validation.
///
/// Every variant leaves the appliance state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The input could not be interpreted as a number.
    #[error("invalid temperature value: {0}")]
    InvalidValue(String),

    /// The input was a number, but NaN or infinite.
    #[error("temperature must be finite, got {0}")]
    NonFinite(String),

    /// A required input field was absent.
    #[error("missing {0}")]
    MissingField(&'static str),
}

/// Errors related to HTTP communication with a boiler service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "client")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The error text returned by the service.
        message: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
