// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state types.
//!
//! [`ApplianceState`] is the single mutable record shared by the regulation
//! loop and the callers of the engine. Reads go through
//! [`ApplianceSnapshot`], a copy taken under one lock acquisition, so every
//! derived value (such as the heating flag) is computed from a consistent
//! pair of temperatures.
//!
//! # Examples
//!
//! ```
//! use boiler_lib::state::ApplianceState;
//! use boiler_lib::types::BoilerState;
//!
//! let state = ApplianceState::default();
//! let snapshot = state.snapshot();
//!
//! assert_eq!(snapshot.measured().to_string(), "21.5");
//! assert_eq!(snapshot.boiler_state(0.1), BoilerState::Heating);
//! ```

mod appliance_state;
mod state_change;

pub use appliance_state::{ApplianceSnapshot, ApplianceState};
pub use state_change::StateChange;
