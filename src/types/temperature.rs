// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature type.
//!
//! Temperatures are plain degrees Celsius stored as `f64`, but a
//! [`Temperature`] can never hold NaN or an infinity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A finite temperature in degrees Celsius.
///
/// # Examples
///
/// ```
/// use boiler_lib::types::Temperature;
///
/// let t = Temperature::new(22.5).unwrap();
/// assert!((t.celsius() - 22.5).abs() < f64::EPSILON);
///
/// // Text input is accepted as long as it is a finite number
/// let t: Temperature = "23".parse().unwrap();
/// assert_eq!(t.to_string(), "23.0");
///
/// assert!(Temperature::new(f64::NAN).is_err());
/// assert!("abc".parse::<Temperature>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a new temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFinite` if `celsius` is NaN or infinite.
    pub fn new(celsius: f64) -> Result<Self, ValueError> {
        if celsius.is_finite() {
            Ok(Self(celsius))
        } else {
            Err(ValueError::NonFinite(celsius.to_string()))
        }
    }

    /// Builds a temperature from a literal known to be finite.
    pub(crate) const fn from_finite(celsius: f64) -> Self {
        Self(celsius)
    }

    /// Interprets a JSON value as a temperature.
    ///
    /// Numbers and numeric strings are accepted. Booleans, `null`, arrays
    /// and objects are not.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidValue` for non-numeric input and
    /// `ValueError::NonFinite` for numbers that are not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use boiler_lib::types::Temperature;
    /// use serde_json::json;
    ///
    /// assert!(Temperature::from_json(&json!(23.0)).is_ok());
    /// assert!(Temperature::from_json(&json!("23.5")).is_ok());
    /// assert!(Temperature::from_json(&json!(true)).is_err());
    /// ```
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValueError> {
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ValueError::InvalidValue(n.to_string()))
                .and_then(Self::new),
            serde_json::Value::String(s) => s.parse(),
            other => Err(ValueError::InvalidValue(other.to_string())),
        }
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub const fn celsius(&self) -> f64 {
        self.0
    }

    /// Returns this temperature rounded to one decimal place.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }

    /// Returns the absolute difference to `other` in degrees.
    #[must_use]
    pub fn distance_to(&self, other: Self) -> f64 {
        (other.0 - self.0).abs()
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl FromStr for Temperature {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let celsius: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValueError::InvalidValue(s.to_string()))?;
        Self::new(celsius)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(value: Temperature) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            Temperature::new(f64::NAN),
            Err(ValueError::NonFinite(_))
        ));
        assert!(Temperature::new(f64::INFINITY).is_err());
        assert!(Temperature::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn accepts_negative_and_zero() {
        assert!(Temperature::new(-12.5).is_ok());
        assert!(Temperature::new(0.0).is_ok());
    }

    #[test]
    fn parse_text() {
        let t: Temperature = " 21.5 ".parse().unwrap();
        assert!((t.celsius() - 21.5).abs() < f64::EPSILON);

        assert!(matches!(
            "abc".parse::<Temperature>(),
            Err(ValueError::InvalidValue(_))
        ));
        assert!(matches!(
            "NaN".parse::<Temperature>(),
            Err(ValueError::NonFinite(_))
        ));
        assert!("".parse::<Temperature>().is_err());
    }

    #[test]
    fn from_json_values() {
        assert!(Temperature::from_json(&json!(23)).is_ok());
        assert!(Temperature::from_json(&json!("19.5")).is_ok());
        assert!(matches!(
            Temperature::from_json(&json!("abc")),
            Err(ValueError::InvalidValue(_))
        ));
        assert!(Temperature::from_json(&json!(null)).is_err());
        assert!(Temperature::from_json(&json!(false)).is_err());
        assert!(Temperature::from_json(&json!([22.0])).is_err());
        assert!(Temperature::from_json(&json!({"value": 22.0})).is_err());
    }

    #[test]
    fn rounded_to_one_decimal() {
        let t = Temperature::new(21.6 + 0.1).unwrap().rounded();
        assert_eq!(t, Temperature::new(21.7).unwrap());
        assert_eq!(
            Temperature::new(22.04).unwrap().rounded(),
            Temperature::new(22.0).unwrap()
        );
    }

    #[test]
    fn display_one_decimal() {
        assert_eq!(Temperature::new(22.0).unwrap().to_string(), "22.0");
        assert_eq!(Temperature::new(-3.26).unwrap().to_string(), "-3.3");
    }

    #[test]
    fn serde_as_plain_number() {
        let t = Temperature::new(22.5).unwrap();
        assert_eq!(serde_json::to_value(t).unwrap(), json!(22.5));
        let back: Temperature = serde_json::from_value(json!(22.5)).unwrap();
        assert_eq!(back, t);
    }
}
