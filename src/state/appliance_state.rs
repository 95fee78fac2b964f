// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state tracking.

use serde::Serialize;

use crate::types::{BoilerState, ErrorCode, Temperature};

use super::StateChange;

/// Live state of the simulated boiler.
///
/// The heating flag is not stored: it is always derived from the measured
/// temperature and the setpoint, see [`ApplianceSnapshot::heating`].
///
/// Only the crate mutates this type. The regulation loop owns the measured
/// temperature, callers of the engine own the setpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplianceState {
    measured: Temperature,
    setpoint: Temperature,
    error_code: ErrorCode,
}

impl ApplianceState {
    /// Creates a state with the given temperatures and no fault.
    #[must_use]
    pub fn new(measured: Temperature, setpoint: Temperature) -> Self {
        Self {
            measured,
            setpoint,
            error_code: ErrorCode::None,
        }
    }

    /// Returns the measured temperature.
    #[must_use]
    pub fn measured(&self) -> Temperature {
        self.measured
    }

    /// Returns the setpoint.
    #[must_use]
    pub fn setpoint(&self) -> Temperature {
        self.setpoint
    }

    /// Returns the current fault code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Copies the state out.
    #[must_use]
    pub fn snapshot(&self) -> ApplianceSnapshot {
        ApplianceSnapshot {
            measured: self.measured,
            setpoint: self.setpoint,
            error_code: self.error_code,
        }
    }

    /// Applies a change and returns `true` if the state actually changed.
    pub(crate) fn apply(&mut self, change: &StateChange) -> bool {
        match *change {
            StateChange::Setpoint(value) => replace(&mut self.setpoint, value),
            StateChange::Measured(value) => replace(&mut self.measured, value),
            StateChange::ErrorCode(code) => replace(&mut self.error_code, code),
        }
    }
}

impl Default for ApplianceState {
    fn default() -> Self {
        Self {
            measured: crate::engine::RegulationConfig::DEFAULT_MEASURED,
            setpoint: crate::engine::RegulationConfig::DEFAULT_SETPOINT,
            error_code: ErrorCode::None,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// A consistent copy of the appliance state.
///
/// # Examples
///
/// ```
/// use boiler_lib::state::ApplianceState;
/// use boiler_lib::types::Temperature;
///
/// let state = ApplianceState::new(
///     Temperature::new(22.95).unwrap(),
///     Temperature::new(23.0).unwrap(),
/// );
/// // Within the convergence threshold
/// assert!(!state.snapshot().heating(0.1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplianceSnapshot {
    measured: Temperature,
    setpoint: Temperature,
    error_code: ErrorCode,
}

impl ApplianceSnapshot {
    /// Returns the measured temperature.
    #[must_use]
    pub fn measured(&self) -> Temperature {
        self.measured
    }

    /// Returns the setpoint.
    #[must_use]
    pub fn setpoint(&self) -> Temperature {
        self.setpoint
    }

    /// Returns the fault code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Returns the remaining gap between measured temperature and setpoint.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.measured.distance_to(self.setpoint)
    }

    /// Returns `true` while the gap is at least `threshold`.
    #[must_use]
    pub fn heating(&self, threshold: f64) -> bool {
        self.gap() >= threshold
    }

    /// Returns the boiler state derived from this snapshot.
    #[must_use]
    pub fn boiler_state(&self, threshold: f64) -> BoilerState {
        BoilerState::from(self.heating(threshold))
    }
}
