// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boiler Lib - a simulated, remotely controllable boiler.
//!
//! The library holds the live state of one boiler (measured temperature,
//! setpoint, fault code) and regulates the measured temperature toward the
//! setpoint in a background task, independently of the callers.
//!
//! # Components
//!
//! - [`engine`]: the [`RegulationEngine`], its lifecycle and the regulation
//!   loop
//! - [`service`]: the [`ControlService`] façade with the five boiler
//!   operations
//! - [`protocol`]: HTTP server (`server` feature) and client (`client`
//!   feature)
//! - [`event`]: live notifications of loop activity
//!
//! # Regulation
//!
//! Once per tick (5 seconds by default) the measured temperature moves 0.1
//! degrees toward the setpoint. Within 0.1 degrees it snaps to the
//! setpoint and the boiler reports "not heating". The loop starts with the
//! first setpoint change and keeps ticking afterwards, so later changes are
//! followed without restarting anything.
//!
//! # Quick Start
//!
//! ```no_run
//! use boiler_lib::ControlService;
//! use boiler_lib::engine::RegulationConfig;
//!
//! #[tokio::main]
//! async fn main() -> boiler_lib::Result<()> {
//!     let service = ControlService::new(RegulationConfig::default())?;
//!
//!     service.set_desired_temperature(&serde_json::json!(23.0))?;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(75)).await;
//!     println!(
//!         "{} ({})",
//!         service.get_actual_temperature().actual_temperature,
//!         service.get_boiler_state().state,
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Serving over HTTP
//!
//! ```no_run
//! use boiler_lib::ControlService;
//! use boiler_lib::engine::RegulationConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = ControlService::new(RegulationConfig::default())?;
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, boiler_lib::protocol::router(service)).await?;
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod service;
pub mod state;
pub mod types;

pub use engine::{LoopState, RegulationConfig, RegulationEngine};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{EngineEvent, EventBus};
#[cfg(feature = "client")]
pub use protocol::{BoilerClient, HttpConfig};
pub use service::ControlService;
pub use state::{ApplianceSnapshot, ApplianceState, StateChange};
pub use types::{BoilerState, ErrorCode, Temperature};
