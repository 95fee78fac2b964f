// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regulation loop configuration.

use std::time::Duration;

use crate::error::Error;
use crate::types::Temperature;

use super::regulation_loop::is_whole_tenths;

/// Configuration for a [`RegulationEngine`](super::RegulationEngine).
///
/// # Examples
///
/// ```
/// use boiler_lib::engine::RegulationConfig;
/// use boiler_lib::types::Temperature;
/// use std::time::Duration;
///
/// // Defaults: 5 s ticks, 0.1 degree steps, 21.5 measured, 22.0 setpoint
/// let config = RegulationConfig::default();
///
/// // Faster simulation starting from a cold boiler
/// let config = RegulationConfig::default()
///     .with_tick_period(Duration::from_millis(200))
///     .with_initial_measured(Temperature::new(15.0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegulationConfig {
    tick_period: Duration,
    step: f64,
    threshold: f64,
    initial_measured: Temperature,
    initial_setpoint: Temperature,
}

impl RegulationConfig {
    /// Default time between two ticks.
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(5);
    /// Default change of the measured temperature per tick, in degrees.
    pub const DEFAULT_STEP: f64 = 0.1;
    /// Default convergence threshold, in degrees.
    pub const DEFAULT_THRESHOLD: f64 = 0.1;
    /// Measured temperature at startup.
    pub const DEFAULT_MEASURED: Temperature = Temperature::from_finite(21.5);
    /// Setpoint at startup.
    pub const DEFAULT_SETPOINT: Temperature = Temperature::from_finite(22.0);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_period: Self::DEFAULT_TICK_PERIOD,
            step: Self::DEFAULT_STEP,
            threshold: Self::DEFAULT_THRESHOLD,
            initial_measured: Self::DEFAULT_MEASURED,
            initial_setpoint: Self::DEFAULT_SETPOINT,
        }
    }

    /// Sets the tick period.
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Sets the per-tick temperature step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the convergence threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the measured temperature at startup.
    #[must_use]
    pub fn with_initial_measured(mut self, measured: Temperature) -> Self {
        self.initial_measured = measured;
        self
    }

    /// Sets the setpoint at startup.
    #[must_use]
    pub fn with_initial_setpoint(mut self, setpoint: Temperature) -> Self {
        self.initial_setpoint = setpoint;
        self
    }

    /// Returns the tick period.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Returns the per-tick step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the convergence threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the measured temperature at startup.
    #[must_use]
    pub fn initial_measured(&self) -> Temperature {
        self.initial_measured
    }

    /// Returns the setpoint at startup.
    #[must_use]
    pub fn initial_setpoint(&self) -> Temperature {
        self.initial_setpoint
    }

    /// Checks that the loop can run with this configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the tick period is zero, if
    /// the step is not a positive multiple of 0.1, or if the threshold is
    /// not a positive finite number.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tick_period.is_zero() {
            return Err(Error::InvalidConfiguration(
                "tick period must be greater than zero".to_string(),
            ));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "step must be a positive number, got {}",
                self.step
            )));
        }
        // Measured temperatures are kept at one decimal.
        if !is_whole_tenths(self.step) {
            return Err(Error::InvalidConfiguration(format!(
                "step must be a multiple of 0.1, got {}",
                self.step
            )));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for RegulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
