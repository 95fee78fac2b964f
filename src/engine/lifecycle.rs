// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regulation loop lifecycle.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of the regulation loop.
///
/// `Idle` → `Running` happens at most once. `Stopped` is only reached
/// through [`RegulationEngine::shutdown`](super::RegulationEngine::shutdown)
/// and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    /// No loop task exists yet.
    Idle,
    /// The loop task is ticking.
    Running,
    /// The loop task was shut down.
    Stopped,
}

impl LoopState {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Stopped => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Running,
            _ => Self::Stopped,
        }
    }

    /// Returns `true` if the loop is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        })
    }
}

/// Atomic holder of the [`LoopState`].
///
/// All transitions are compare-and-set, so concurrent callers agree on a
/// single winner.
#[derive(Debug)]
pub(crate) struct Lifecycle(AtomicU8);

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(LoopState::Idle.as_u8()))
    }

    pub(crate) fn get(&self) -> LoopState {
        LoopState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves `Idle` to `Running`. Only one caller ever gets `true`.
    pub(crate) fn try_start(&self) -> bool {
        self.0
            .compare_exchange(
                LoopState::Idle.as_u8(),
                LoopState::Running.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Moves to `Stopped` and returns the previous state.
    pub(crate) fn stop(&self) -> LoopState {
        LoopState::from_u8(self.0.swap(LoopState::Stopped.as_u8(), Ordering::AcqRel))
    }
}
