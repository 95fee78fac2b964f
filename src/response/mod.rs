// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response bodies of the boiler service.
//!
//! These types are returned by [`ControlService`](crate::ControlService),
//! serialized by the HTTP server and deserialized by the HTTP client. Field
//! names are the JSON keys of the wire format.

mod boiler;
mod thermostat;

pub use boiler::{BoilerStateResponse, ErrorStateResponse};
pub use thermostat::{
    ActualTemperatureResponse, DesiredTemperatureResponse, ErrorResponse, SetTemperatureRequest,
    SetTemperatureResponse,
};
