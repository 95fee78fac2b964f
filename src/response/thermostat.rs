// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat request and response bodies.

use serde::{Deserialize, Serialize};

use crate::types::Temperature;

/// Body of `GET /thermostat/actual`.
///
/// ```
/// use boiler_lib::response::ActualTemperatureResponse;
///
/// let json = r#"{"actual_temperature": 21.5}"#;
/// let response: ActualTemperatureResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.actual_temperature.to_string(), "21.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActualTemperatureResponse {
    /// The measured temperature.
    pub actual_temperature: Temperature,
}

/// Body of `GET /thermostat/desired`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesiredTemperatureResponse {
    /// The setpoint.
    pub desired_temperature: Temperature,
}

/// Body of `POST /thermostat/desired`.
///
/// The value is kept as raw JSON so that numeric strings can be accepted
/// and non-numeric values reported as invalid rather than malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTemperatureRequest {
    /// The requested setpoint.
    pub desired_temperature: serde_json::Value,
}

impl SetTemperatureRequest {
    /// Creates a request for a numeric setpoint.
    #[must_use]
    pub fn new(celsius: f64) -> Self {
        Self {
            desired_temperature: serde_json::json!(celsius),
        }
    }
}

/// Success body of `POST /thermostat/desired`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTemperatureResponse {
    /// Confirmation text.
    pub message: String,
}

impl SetTemperatureResponse {
    /// The confirmation text sent on success.
    pub const CONFIRMATION: &'static str = "Desired temperature set successfully";

    /// Creates the success confirmation.
    #[must_use]
    pub fn confirmed() -> Self {
        Self {
            message: Self::CONFIRMATION.to_string(),
        }
    }
}

/// Body of any 4xx answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn actual_temperature_wire_format() {
        let response = ActualTemperatureResponse {
            actual_temperature: Temperature::new(21.5).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"actual_temperature": 21.5})
        );
    }

    #[test]
    fn non_finite_body_is_rejected() {
        // JSON has no NaN or infinity literal; out-of-range numbers fail too
        let result: Result<DesiredTemperatureResponse, _> =
            serde_json::from_str(r#"{"desired_temperature": 1e400}"#);
        assert!(result.is_err());
    }

    #[test]
    fn request_keeps_raw_value() {
        let request: SetTemperatureRequest =
            serde_json::from_value(json!({"desired_temperature": "abc"})).unwrap();
        assert_eq!(request.desired_temperature, json!("abc"));

        let request = SetTemperatureRequest::new(23.0);
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"desired_temperature": 23.0})
        );
    }

    #[test]
    fn confirmation_text() {
        assert_eq!(
            SetTemperatureResponse::confirmed().message,
            "Desired temperature set successfully"
        );
    }
}
