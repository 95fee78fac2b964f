// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boiler operating state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the boiler is currently driving the temperature.
///
/// # Examples
///
/// ```
/// use boiler_lib::types::BoilerState;
///
/// assert_eq!(BoilerState::from(true), BoilerState::Heating);
/// assert_eq!(BoilerState::NotHeating.as_str(), "not heating");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoilerState {
    /// The measured temperature is still moving toward the setpoint.
    #[serde(rename = "heating")]
    Heating,
    /// The measured temperature has reached the setpoint.
    #[serde(rename = "not heating")]
    NotHeating,
}

impl BoilerState {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::NotHeating => "not heating",
        }
    }

    /// Returns `true` if the boiler is heating.
    #[must_use]
    pub const fn is_heating(&self) -> bool {
        matches!(self, Self::Heating)
    }
}

impl From<bool> for BoilerState {
    fn from(heating: bool) -> Self {
        if heating { Self::Heating } else { Self::NotHeating }
    }
}

impl fmt::Display for BoilerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
