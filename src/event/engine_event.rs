// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine event types.

use crate::state::{ApplianceSnapshot, StateChange};
use crate::types::Temperature;

/// Events emitted by the regulation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The regulation loop went from idle to running.
    LoopStarted,

    /// The appliance state changed.
    StateChanged {
        /// The specific change that occurred.
        change: StateChange,
        /// The complete state right after the change.
        snapshot: ApplianceSnapshot,
    },

    /// The measured temperature reached the setpoint.
    ///
    /// Published once per approach, not on every idle tick.
    Converged {
        /// The temperature that was reached.
        temperature: Temperature,
    },

    /// The regulation loop stopped after a shutdown request.
    LoopStopped,
}

impl EngineEvent {
    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(change: StateChange, snapshot: ApplianceSnapshot) -> Self {
        Self::StateChanged { change, snapshot }
    }

    /// Returns `true` if this is a loop lifecycle event.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::LoopStarted | Self::LoopStopped)
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }
}
