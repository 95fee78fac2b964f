// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boiler status response bodies.

use serde::{Deserialize, Serialize};

use crate::types::{BoilerState, ErrorCode};

/// Body of `GET /boiler/state`.
///
/// ```
/// use boiler_lib::response::BoilerStateResponse;
/// use boiler_lib::types::BoilerState;
///
/// let response: BoilerStateResponse =
///     serde_json::from_str(r#"{"state": "not heating"}"#).unwrap();
/// assert_eq!(response.state, BoilerState::NotHeating);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoilerStateResponse {
    /// Heating or not heating.
    pub state: BoilerState,
}

/// Body of `GET /boiler/error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorStateResponse {
    /// Numeric fault code, 0 when there is no fault.
    pub error_code: u8,
    /// Fixed message for the code.
    pub error_message: String,
}

impl ErrorStateResponse {
    /// Returns the fault code as an [`ErrorCode`].
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from(self.error_code)
    }
}

impl From<ErrorCode> for ErrorStateResponse {
    fn from(code: ErrorCode) -> Self {
        Self {
            error_code: code.code(),
            error_message: code.message().to_string(),
        }
    }
}
