// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! Every mutation of the appliance state goes through a [`StateChange`],
//! which is also what subscribers receive in
//! [`EngineEvent::StateChanged`](crate::event::EngineEvent::StateChanged).

use serde::Serialize;

use crate::types::{ErrorCode, Temperature};

/// A discrete change to the appliance state.
///
/// # Examples
///
/// ```
/// use boiler_lib::state::StateChange;
/// use boiler_lib::types::Temperature;
///
/// let change = StateChange::Setpoint(Temperature::new(23.0).unwrap());
/// assert!(change.is_setpoint());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChange {
    /// A caller changed the setpoint.
    Setpoint(Temperature),

    /// The regulation loop moved the measured temperature.
    Measured(Temperature),

    /// The fault code changed.
    ErrorCode(ErrorCode),
}

impl StateChange {
    /// Returns `true` for setpoint changes.
    #[must_use]
    pub fn is_setpoint(&self) -> bool {
        matches!(self, Self::Setpoint(_))
    }

    /// Returns `true` for measured temperature changes.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}
