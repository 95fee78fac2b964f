// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control service façade.
//!
//! [`ControlService`] exposes the five boiler operations independently of
//! any transport. It holds no state of its own: every call validates its
//! input and goes straight to the [`RegulationEngine`].
//!
//! # Examples
//!
//! ```
//! use boiler_lib::ControlService;
//! use boiler_lib::engine::RegulationConfig;
//! use boiler_lib::types::BoilerState;
//!
//! #[tokio::main]
//! async fn main() -> boiler_lib::Result<()> {
//!     let service = ControlService::new(RegulationConfig::default())?;
//!
//!     service.set_desired_temperature(&serde_json::json!(23.0))?;
//!     assert_eq!(service.get_desired_temperature().desired_temperature.to_string(), "23.0");
//!     assert_eq!(service.get_boiler_state().state, BoilerState::Heating);
//!
//!     let error = service.get_error_state();
//!     assert_eq!((error.error_code, error.error_message.as_str()), (0, "No error"));
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::engine::{RegulationConfig, RegulationEngine};
use crate::error::{Error, ValueError};
use crate::response::{
    ActualTemperatureResponse, BoilerStateResponse, DesiredTemperatureResponse,
    ErrorStateResponse, SetTemperatureResponse,
};
use crate::types::Temperature;

/// Setpoint field kept as unparsed JSON text.
#[derive(Deserialize)]
struct RawSetpoint<'a> {
    #[serde(borrow)]
    desired_temperature: Option<&'a RawValue>,
}

/// Name of the setpoint field in requests.
pub const DESIRED_TEMPERATURE_FIELD: &str = "desired_temperature";

/// Transport-agnostic boiler operations.
#[derive(Debug, Clone)]
pub struct ControlService {
    engine: RegulationEngine,
}

impl ControlService {
    /// Creates a service around a new engine.
    ///
    /// # Errors
    ///
    /// See [`RegulationEngine::new`].
    pub fn new(config: RegulationConfig) -> Result<Self, Error> {
        RegulationEngine::new(config).map(Self::with_engine)
    }

    /// Creates a service around an existing engine.
    #[must_use]
    pub fn with_engine(engine: RegulationEngine) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &RegulationEngine {
        &self.engine
    }

    /// Returns the measured temperature.
    #[must_use]
    pub fn get_actual_temperature(&self) -> ActualTemperatureResponse {
        ActualTemperatureResponse {
            actual_temperature: self.engine.read_measured(),
        }
    }

    /// Returns the setpoint.
    #[must_use]
    pub fn get_desired_temperature(&self) -> DesiredTemperatureResponse {
        DesiredTemperatureResponse {
            desired_temperature: self.engine.read_setpoint(),
        }
    }

    /// Validates and stores a new setpoint, starting regulation if needed.
    ///
    /// Accepts a JSON number or a numeric string.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidValue` or `ValueError::NonFinite` when the
    /// value is not a finite number. The state is unchanged in that case.
    pub fn set_desired_temperature(
        &self,
        value: &serde_json::Value,
    ) -> Result<SetTemperatureResponse, Error> {
        let setpoint = Temperature::from_json(value).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected desired temperature");
        })?;
        self.engine.write_temperature(setpoint);
        Ok(SetTemperatureResponse::confirmed())
    }

    /// Handles a full request body for [`set_desired_temperature`].
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` when `body` is absent, is not an
    /// object, or has no `desired_temperature` field. Otherwise fails like
    /// [`set_desired_temperature`].
    ///
    /// [`set_desired_temperature`]: Self::set_desired_temperature
    pub fn set_desired_temperature_from_body(
        &self,
        body: Option<&serde_json::Value>,
    ) -> Result<SetTemperatureResponse, Error> {
        let value = body
            .and_then(|body| body.get(DESIRED_TEMPERATURE_FIELD))
            .ok_or(ValueError::MissingField(DESIRED_TEMPERATURE_FIELD))?;
        self.set_desired_temperature(value)
    }

    /// Validates and stores the setpoint carried by a raw JSON request body.
    ///
    /// Numbers too large for `f64` are rejected as non-finite rather than
    /// as an unreadable body.
    ///
    /// # Errors
    ///
    /// Same as [`set_desired_temperature_from_body`].
    ///
    /// [`set_desired_temperature_from_body`]: Self::set_desired_temperature_from_body
    pub fn set_desired_temperature_from_slice(
        &self,
        body: &[u8],
    ) -> Result<SetTemperatureResponse, Error> {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(body) => self.set_desired_temperature_from_body(Some(&body)),
            Err(e) => {
                tracing::debug!(error = %e, "Unreadable setpoint request body");
                let raw = serde_json::from_slice::<RawSetpoint<'_>>(body)
                    .ok()
                    .and_then(|body| body.desired_temperature)
                    .ok_or(ValueError::MissingField(DESIRED_TEMPERATURE_FIELD))?;
                let setpoint = match serde_json::from_str::<serde_json::Value>(raw.get()) {
                    Ok(value) => Temperature::from_json(&value),
                    Err(_) => raw.get().parse(),
                }
                .inspect_err(|e| tracing::warn!(error = %e, "Rejected desired temperature"))?;
                self.engine.write_temperature(setpoint);
                Ok(SetTemperatureResponse::confirmed())
            }
        }
    }

    /// Returns whether the boiler is heating.
    #[must_use]
    pub fn get_boiler_state(&self) -> BoilerStateResponse {
        BoilerStateResponse {
            state: self.engine.read_state(),
        }
    }

    /// Returns the fault code and its message.
    #[must_use]
    pub fn get_error_state(&self) -> ErrorStateResponse {
        ErrorStateResponse::from(self.engine.read_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LoopState;
    use crate::types::{BoilerState, ErrorCode};
    use serde_json::json;

    fn service() -> ControlService {
        ControlService::new(RegulationConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn reads_defaults() {
        let service = service();
        assert_eq!(
            service.get_actual_temperature().actual_temperature.to_string(),
            "21.5"
        );
        assert_eq!(
            service.get_desired_temperature().desired_temperature.to_string(),
            "22.0"
        );
        assert_eq!(service.get_boiler_state().state, BoilerState::Heating);
        assert_eq!(
            service.get_error_state(),
            ErrorStateResponse {
                error_code: 0,
                error_message: "No error".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn set_accepts_numbers_and_numeric_strings() {
        let service = service();

        service.set_desired_temperature(&json!(19)).unwrap();
        assert_eq!(
            service.get_desired_temperature().desired_temperature,
            Temperature::new(19.0).unwrap()
        );

        let response = service.set_desired_temperature(&json!("23.5")).unwrap();
        assert_eq!(response, SetTemperatureResponse::confirmed());
        assert_eq!(
            service.get_desired_temperature().desired_temperature,
            Temperature::new(23.5).unwrap()
        );
        assert_eq!(service.engine().loop_state(), LoopState::Running);

        service.engine().shutdown().await;
    }

    #[tokio::test]
    async fn set_rejects_invalid_values() {
        let service = service();

        for value in [json!("abc"), json!("NaN"), json!(null), json!(true), json!([1])] {
            let err = service.set_desired_temperature(&value).unwrap_err();
            assert!(err.is_invalid_value(), "{value} accepted");
        }

        assert_eq!(
            service.get_desired_temperature().desired_temperature,
            Temperature::new(22.0).unwrap()
        );
        assert_eq!(service.engine().loop_state(), LoopState::Idle);
    }

    #[tokio::test]
    async fn body_without_field_is_missing() {
        let service = service();

        for body in [None, Some(json!({})), Some(json!([23.0])), Some(json!(23.0))] {
            let err = service
                .set_desired_temperature_from_body(body.as_ref())
                .unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::MissingField("desired_temperature"))
            ));
        }

        let body = json!({"desired_temperature": "abc"});
        let err = service
            .set_desired_temperature_from_body(Some(&body))
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::InvalidValue(_))));
    }

    #[tokio::test]
    async fn raw_body_with_out_of_range_number_is_non_finite() {
        let service = service();

        let err = service
            .set_desired_temperature_from_slice(br#"{"desired_temperature": 1e400}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::NonFinite(_))));

        let err = service
            .set_desired_temperature_from_slice(br#"{"desired_temperature": -1e400}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::NonFinite(_))));

        assert_eq!(
            service.get_desired_temperature().desired_temperature,
            Temperature::new(22.0).unwrap()
        );
        assert_eq!(service.engine().loop_state(), LoopState::Idle);
    }

    #[tokio::test]
    async fn raw_body_forms() {
        let service = service();

        service
            .set_desired_temperature_from_slice(br#"{"desired_temperature": 23.5}"#)
            .unwrap();
        assert_eq!(
            service.get_desired_temperature().desired_temperature,
            Temperature::new(23.5).unwrap()
        );

        // Another field out of range does not hide a valid setpoint
        service
            .set_desired_temperature_from_slice(br#"{"desired_temperature": "19", "x": 1e400}"#)
            .unwrap();
        assert_eq!(
            service.get_desired_temperature().desired_temperature,
            Temperature::new(19.0).unwrap()
        );

        let bodies: [&[u8]; 4] = [b"", b"{not json", b"{}", br#"{"x": 1e400}"#];
        for body in bodies {
            let err = service.set_desired_temperature_from_slice(body).unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::MissingField("desired_temperature"))
            ));
        }

        service.engine().shutdown().await;
    }

    #[tokio::test]
    async fn error_state_follows_engine() {
        let service = service();
        service.engine().set_error_code(ErrorCode::LowPressure);
        let error = service.get_error_state();
        assert_eq!(error.error_code, 1);
        assert_eq!(error.error_message, "Low pressure");
    }
}
