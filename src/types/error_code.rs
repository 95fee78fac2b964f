// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boiler fault codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// A boiler fault code.
///
/// Fault codes are static data: they are read by callers, never raised as
/// errors. Codes outside the known table are kept as [`ErrorCode::Unknown`].
///
/// # Examples
///
/// ```
/// use boiler_lib::types::ErrorCode;
///
/// assert_eq!(ErrorCode::default().code(), 0);
/// assert_eq!(ErrorCode::default().message(), "No error");
/// assert_eq!(ErrorCode::from(2).message(), "Sensor fault");
/// assert_eq!(ErrorCode::from(9).message(), "Unknown error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    /// No fault.
    #[default]
    None,
    /// Water pressure too low.
    LowPressure,
    /// Temperature sensor fault.
    SensorFault,
    /// Burner failed to ignite.
    IgnitionFailure,
    /// A code outside the known table.
    Unknown(u8),
}

impl ErrorCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::LowPressure => 1,
            Self::SensorFault => 2,
            Self::IgnitionFailure => 3,
            Self::Unknown(code) => *code,
        }
    }

    /// Returns the fixed human-readable message for this code.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::None => "No error",
            Self::LowPressure => "Low pressure",
            Self::SensorFault => "Sensor fault",
            Self::IgnitionFailure => "Ignition failure",
            Self::Unknown(_) => "Unknown error",
        }
    }

    /// Returns `true` if this code signals a fault.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<u8> for ErrorCode {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::None,
            1 => Self::LowPressure,
            2 => Self::SensorFault,
            3 => Self::IgnitionFailure,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}
