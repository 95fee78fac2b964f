// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The regulation step and the background loop that drives it.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::types::Temperature;

use super::EngineInner;

/// Result of one regulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The measured temperature already equals the setpoint.
    Hold,
    /// The gap was below the threshold; measured snaps to the setpoint.
    Snap(Temperature),
    /// The boiler is heating (or cooling) and measured moves one step.
    Step(Temperature),
}

impl Tick {
    /// Returns the new measured temperature, if this tick changes it.
    #[must_use]
    pub fn next_measured(&self) -> Option<Temperature> {
        match self {
            Self::Hold => None,
            Self::Snap(t) | Self::Step(t) => Some(*t),
        }
    }

    /// Returns `true` if the boiler was heating during this tick.
    #[must_use]
    pub fn is_heating(&self) -> bool {
        matches!(self, Self::Step(_))
    }
}

/// Computes one regulation step.
///
/// Within `threshold` of the setpoint the measured temperature snaps to it.
/// Otherwise it moves `step` degrees toward the setpoint and never past it.
/// When `step` is a multiple of 0.1 the result is rounded to one decimal;
/// other steps, or a rounding that would cancel the move, keep the exact
/// value.
///
/// # Examples
///
/// ```
/// use boiler_lib::engine::{Tick, regulate};
/// use boiler_lib::types::Temperature;
///
/// let t = |c| Temperature::new(c).unwrap();
///
/// assert_eq!(regulate(t(21.5), t(23.0), 0.1, 0.1), Tick::Step(t(21.6)));
/// assert_eq!(regulate(t(23.4), t(23.0), 0.1, 0.1), Tick::Step(t(23.3)));
/// assert_eq!(regulate(t(22.95), t(23.0), 0.1, 0.1), Tick::Snap(t(23.0)));
/// assert_eq!(regulate(t(23.0), t(23.0), 0.1, 0.1), Tick::Hold);
/// ```
#[must_use]
pub fn regulate(measured: Temperature, setpoint: Temperature, step: f64, threshold: f64) -> Tick {
    let gap = setpoint.celsius() - measured.celsius();

    if gap.abs() < threshold {
        return if measured == setpoint {
            Tick::Hold
        } else {
            Tick::Snap(setpoint)
        };
    }

    if gap.abs() <= step {
        return Tick::Step(setpoint);
    }

    let exact = Temperature::from_finite(measured.celsius() + step.copysign(gap));
    let moved = if is_whole_tenths(step) {
        let rounded = exact.rounded();
        if rounded == measured { exact } else { rounded }
    } else {
        exact
    };
    // Rounding can carry a step past a setpoint with more than one decimal.
    let next = if gap > 0.0 {
        moved.celsius().min(setpoint.celsius())
    } else {
        moved.celsius().max(setpoint.celsius())
    };
    Tick::Step(Temperature::from_finite(next))
}

/// Returns `true` if `value` is a whole number of tenths.
pub(crate) fn is_whole_tenths(value: f64) -> bool {
    let tenths = value * 10.0;
    (tenths - tenths.round()).abs() < 1e-9
}

/// Runs the regulation loop until `shutdown` turns `true`.
///
/// The first tick happens immediately, then once per tick period.
pub(super) async fn run(inner: Arc<EngineInner>, mut shutdown: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(inner.config.tick_period());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        period_ms = inner.config.tick_period().as_millis(),
        "Regulation loop started"
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => break,
            _ = interval.tick() => inner.tick(),
        }
    }

    tracing::info!("Regulation loop stopped");
}
