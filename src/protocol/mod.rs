// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the boiler service.
//!
//! - `server` feature: [`router`] binds a [`ControlService`](crate::ControlService)
//!   to HTTP routes with axum.
//! - `client` feature: [`BoilerClient`] calls those routes with reqwest.
//!
//! | Method | Path                  | Operation                 |
//! |--------|-----------------------|---------------------------|
//! | GET    | `/thermostat/actual`  | `get_actual_temperature`  |
//! | GET    | `/thermostat/desired` | `get_desired_temperature` |
//! | POST   | `/thermostat/desired` | `set_desired_temperature` |
//! | GET    | `/boiler/state`       | `get_boiler_state`        |
//! | GET    | `/boiler/error`       | `get_error_state`         |

#[cfg(feature = "client")]
mod http;
#[cfg(feature = "server")]
mod server;

#[cfg(feature = "client")]
pub use http::{BoilerClient, HttpConfig};
#[cfg(feature = "server")]
pub use server::router;

/// Path of the measured temperature resource.
pub const ACTUAL_TEMPERATURE_PATH: &str = "/thermostat/actual";
/// Path of the setpoint resource.
pub const DESIRED_TEMPERATURE_PATH: &str = "/thermostat/desired";
/// Path of the heating state resource.
pub const BOILER_STATE_PATH: &str = "/boiler/state";
/// Path of the fault code resource.
pub const BOILER_ERROR_PATH: &str = "/boiler/error";
/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/healthz";
