// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for boiler control.
//!
//! Each type is validated at construction time, so a value that reaches
//! the regulation engine is always usable.
//!
//! # Types
//!
//! - [`Temperature`] - Finite temperature in degrees Celsius
//! - [`ErrorCode`] - Fault code with its fixed message
//! - [`BoilerState`] - Heating / not heating

mod boiler_state;
mod error_code;
mod temperature;

pub use boiler_state::BoilerState;
pub use error_code::ErrorCode;
pub use temperature::Temperature;
