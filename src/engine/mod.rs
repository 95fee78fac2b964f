// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermal regulation engine.
//!
//! The [`RegulationEngine`] owns the [`ApplianceState`] and the background
//! loop that moves the measured temperature toward the setpoint.
//!
//! # Concurrency
//!
//! - One `parking_lot::Mutex` guards the whole state. Every read takes a
//!   snapshot under a single acquisition, so derived values never mix two
//!   different ticks.
//! - Callers only write the setpoint; the loop only writes the measured
//!   temperature.
//! - The loop is started by the first setpoint write. An atomic
//!   compare-and-set decides which writer spawns it, so concurrent writers
//!   never create a second loop.
//! - The lock is never held across an `.await` and no caller waits for a
//!   tick.
//!
//! # Examples
//!
//! ```
//! use boiler_lib::engine::{LoopState, RegulationConfig, RegulationEngine};
//!
//! #[tokio::main]
//! async fn main() -> boiler_lib::Result<()> {
//!     let engine = RegulationEngine::new(RegulationConfig::default())?;
//!     assert_eq!(engine.loop_state(), LoopState::Idle);
//!
//!     engine.write_setpoint(23.0)?;
//!     assert_eq!(engine.loop_state(), LoopState::Running);
//!
//!     engine.shutdown().await;
//!     Ok(())
//! }
//! ```

mod config;
mod lifecycle;
mod regulation_loop;

pub use config::RegulationConfig;
pub use lifecycle::LoopState;
pub use regulation_loop::{Tick, regulate};

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::Error;
use crate::event::{EngineEvent, EventBus};
use crate::state::{ApplianceSnapshot, ApplianceState, StateChange};
use crate::types::{BoilerState, ErrorCode, Temperature};

use lifecycle::Lifecycle;

/// Handle to the regulation engine.
///
/// Cloning is cheap; all clones share the same state and loop.
#[derive(Debug, Clone)]
pub struct RegulationEngine {
    inner: Arc<EngineInner>,
}

#[derive(Debug)]
pub(crate) struct EngineInner {
    state: Mutex<ApplianceState>,
    config: RegulationConfig,
    lifecycle: Lifecycle,
    task: Mutex<Option<JoinHandle<()>>>,
    shutdown_tx: watch::Sender<bool>,
    runtime: Handle,
    events: EventBus,
}

impl RegulationEngine {
    /// Creates an engine in the `Idle` state.
    ///
    /// Must be called from within a tokio runtime; the loop will later be
    /// spawned on that runtime.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the configuration does not
    /// validate, and `Error::NoRuntime` outside a tokio runtime.
    pub fn new(config: RegulationConfig) -> Result<Self, Error> {
        Self::with_event_bus(config, EventBus::new())
    }

    /// Creates an engine publishing to an existing event bus.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_event_bus(config: RegulationConfig, events: EventBus) -> Result<Self, Error> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let state = ApplianceState::new(config.initial_measured(), config.initial_setpoint());
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            inner: Arc::new(EngineInner {
                state: Mutex::new(state),
                config,
                lifecycle: Lifecycle::new(),
                task: Mutex::new(None),
                shutdown_tx,
                runtime,
                events,
            }),
        })
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &RegulationConfig {
        &self.inner.config
    }

    /// Returns the current loop lifecycle state.
    #[must_use]
    pub fn loop_state(&self) -> LoopState {
        self.inner.lifecycle.get()
    }

    /// Subscribes to engine events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.inner.events.subscribe()
    }

    /// Returns a consistent copy of the whole appliance state.
    #[must_use]
    pub fn snapshot(&self) -> ApplianceSnapshot {
        self.inner.state.lock().snapshot()
    }

    /// Returns the measured temperature.
    #[must_use]
    pub fn read_measured(&self) -> Temperature {
        self.inner.state.lock().measured()
    }

    /// Returns the setpoint.
    #[must_use]
    pub fn read_setpoint(&self) -> Temperature {
        self.inner.state.lock().setpoint()
    }

    /// Returns whether the boiler is heating.
    ///
    /// Derived from a single snapshot of measured temperature and setpoint.
    #[must_use]
    pub fn read_state(&self) -> BoilerState {
        self.snapshot().boiler_state(self.inner.config.threshold())
    }

    /// Returns the current fault code.
    #[must_use]
    pub fn read_error(&self) -> ErrorCode {
        self.inner.state.lock().error_code()
    }

    /// Stores a new setpoint and makes sure the loop is running.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFinite` for NaN or infinite values; the state
    /// is left unchanged.
    pub fn write_setpoint(&self, celsius: f64) -> Result<(), Error> {
        let setpoint = Temperature::new(celsius).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected setpoint");
        })?;
        self.write_temperature(setpoint);
        Ok(())
    }

    /// Stores an already validated setpoint and makes sure the loop is
    /// running.
    pub fn write_temperature(&self, setpoint: Temperature) {
        self.inner.apply(StateChange::Setpoint(setpoint));
        tracing::info!(%setpoint, "Setpoint updated");
        self.ensure_running();
    }

    /// Sets the fault code.
    ///
    /// Faults are never raised by the engine itself; this exists for test
    /// harnesses and simulations.
    pub fn set_error_code(&self, code: ErrorCode) {
        if self.inner.apply(StateChange::ErrorCode(code)) {
            tracing::info!(code = code.code(), message = code.message(), "Fault code set");
        }
    }

    /// Stops the loop and waits for its task to finish.
    ///
    /// The lifecycle moves to the terminal `Stopped` state. Setpoint writes
    /// are still stored afterwards, but no loop is restarted.
    pub async fn shutdown(&self) {
        // Start and stop both happen under the task lock.
        let (previous, task) = {
            let mut task = self.inner.task.lock();
            let previous = self.inner.lifecycle.stop();
            self.inner.shutdown_tx.send_replace(true);
            (previous, task.take())
        };

        if let Some(task) = task
            && let Err(e) = task.await
        {
            tracing::warn!(error = %e, "Regulation loop task ended abnormally");
        }

        if previous.is_running() {
            self.inner.events.publish(EngineEvent::LoopStopped);
        }
    }

    fn ensure_running(&self) {
        if self.inner.lifecycle.get() != LoopState::Idle {
            return;
        }

        let mut task = self.inner.task.lock();
        if !self.inner.lifecycle.try_start() {
            return;
        }
        let inner = Arc::clone(&self.inner);
        let shutdown_rx = self.inner.shutdown_tx.subscribe();
        *task = Some(
            self.inner
                .runtime
                .spawn(regulation_loop::run(inner, shutdown_rx)),
        );
        self.inner.events.publish(EngineEvent::LoopStarted);
    }
}

impl EngineInner {
    /// Applies a change under the lock and publishes it if it changed
    /// anything.
    fn apply(&self, change: StateChange) -> bool {
        let snapshot = {
            let mut state = self.state.lock();
            if !state.apply(&change) {
                return false;
            }
            state.snapshot()
        };
        self.events
            .publish(EngineEvent::state_changed(change, snapshot));
        true
    }

    /// Runs one regulation step.
    fn tick(&self) {
        let (tick, changed, snapshot) = {
            let mut state = self.state.lock();
            let tick = regulate(
                state.measured(),
                state.setpoint(),
                self.config.step(),
                self.config.threshold(),
            );
            let changed = tick
                .next_measured()
                .is_some_and(|next| state.apply(&StateChange::Measured(next)));
            (tick, changed, state.snapshot())
        };

        let Some(measured) = tick.next_measured().filter(|_| changed) else {
            return;
        };

        tracing::trace!(
            %measured,
            setpoint = %snapshot.setpoint(),
            heating = tick.is_heating(),
            "Regulation tick"
        );
        self.events.publish(EngineEvent::state_changed(
            StateChange::Measured(measured),
            snapshot,
        ));

        if measured == snapshot.setpoint() {
            tracing::debug!(temperature = %measured, "Setpoint reached");
            self.events
                .publish(EngineEvent::Converged { temperature: measured });
        }
    }
}
