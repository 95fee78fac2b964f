// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! axum router for the boiler service.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{Error, ValueError};
use crate::response::{
    ActualTemperatureResponse, BoilerStateResponse, DesiredTemperatureResponse, ErrorResponse,
    ErrorStateResponse, SetTemperatureResponse,
};
use crate::service::ControlService;

use super::{
    ACTUAL_TEMPERATURE_PATH, BOILER_ERROR_PATH, BOILER_STATE_PATH, DESIRED_TEMPERATURE_PATH,
    HEALTH_PATH,
};

/// Error text for a request without a setpoint.
const MISSING_TEMPERATURE: &str = "Missing desired_temperature";
/// Error text for a setpoint that is not a finite number.
const INVALID_TEMPERATURE: &str = "Invalid temperature value";

/// Builds the HTTP router for `service`.
///
/// # Examples
///
/// ```no_run
/// use boiler_lib::ControlService;
/// use boiler_lib::engine::RegulationConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = ControlService::new(RegulationConfig::default())?;
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
/// axum::serve(listener, boiler_lib::protocol::router(service)).await?;
/// # Ok(())
/// # }
/// ```
pub fn router(service: ControlService) -> Router {
    Router::new()
        .route(ACTUAL_TEMPERATURE_PATH, get(get_actual_temperature))
        .route(
            DESIRED_TEMPERATURE_PATH,
            get(get_desired_temperature).post(set_desired_temperature),
        )
        .route(BOILER_STATE_PATH, get(get_boiler_state))
        .route(BOILER_ERROR_PATH, get(get_error_state))
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .with_state(service)
}

async fn get_actual_temperature(
    State(service): State<ControlService>,
) -> Json<ActualTemperatureResponse> {
    Json(service.get_actual_temperature())
}

async fn get_desired_temperature(
    State(service): State<ControlService>,
) -> Json<DesiredTemperatureResponse> {
    Json(service.get_desired_temperature())
}

async fn set_desired_temperature(
    State(service): State<ControlService>,
    body: Bytes,
) -> Result<Json<SetTemperatureResponse>, ApiError> {
    service
        .set_desired_temperature_from_slice(&body)
        .map(Json)
        .map_err(ApiError)
}

async fn get_boiler_state(State(service): State<ControlService>) -> Json<BoilerStateResponse> {
    Json(service.get_boiler_state())
}

async fn get_error_state(State(service): State<ControlService>) -> Json<ErrorStateResponse> {
    Json(service.get_error_state())
}

/// Maps library errors to HTTP answers.
struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            Error::Value(ValueError::MissingField(_)) => {
                (StatusCode::BAD_REQUEST, MISSING_TEMPERATURE.to_string())
            }
            Error::Value(_) => (StatusCode::BAD_REQUEST, INVALID_TEMPERATURE.to_string()),
            other => {
                tracing::error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
