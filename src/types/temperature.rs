// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature types for Steamist controllers.
//!
//! The HTTP controller reports its reading as a compact string such as
//! `110XF` or `43XC`: a run of decimal digits, the literal `X`, then the unit
//! code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Unit a temperature is reported in.
///
/// # Examples
///
/// ```
/// use steamist_lib::types::TempUnit;
///
/// assert_eq!(TempUnit::Fahrenheit.as_str(), "F");
/// assert_eq!("C".parse::<TempUnit>().unwrap(), TempUnit::Celsius);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempUnit {
    /// Degrees Fahrenheit (`F`).
    #[serde(rename = "F")]
    Fahrenheit,
    /// Degrees Celsius (`C`).
    #[serde(rename = "C")]
    Celsius,
}

impl TempUnit {
    /// Units in the order readings are matched against them.
    const MATCH_ORDER: [Self; 2] = [Self::Fahrenheit, Self::Celsius];

    /// Returns the single-letter unit code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }

    /// Returns the suffix following the digits in a raw reading.
    const fn reading_marker(self) -> &'static str {
        match self {
            Self::Fahrenheit => "XF",
            Self::Celsius => "XC",
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TempUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Self::Fahrenheit),
            "C" => Ok(Self::Celsius),
            _ => Err(ParseError::InvalidValue {
                field: "temp_unit".to_string(),
                message: format!("expected \"F\" or \"C\", got {s:?}"),
            }),
        }
    }
}

/// A temperature reading with its unit.
///
/// # Examples
///
/// ```
/// use steamist_lib::types::{Temperature, TempUnit};
///
/// let reading: Temperature = "110XF".parse().unwrap();
/// assert_eq!(reading.value(), 110);
/// assert_eq!(reading.unit(), TempUnit::Fahrenheit);
///
/// assert!("hot".parse::<Temperature>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Temperature {
    value: i32,
    unit: TempUnit,
}

impl Temperature {
    /// Creates a new temperature.
    #[must_use]
    pub const fn new(value: i32, unit: TempUnit) -> Self {
        Self { value, unit }
    }

    /// Returns the numeric reading.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TempUnit {
        self.unit
    }

    /// Parses a raw controller reading (`<digits>X<F|C>`).
    ///
    /// Only the start of the string has to match; trailing characters after
    /// the unit code are ignored, as the controller firmware does.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidTemperature` if the reading matches
    /// neither the Fahrenheit nor the Celsius form.
    pub fn parse_reading(raw: &str) -> Result<Self, ParseError> {
        let digits_end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let (digits, rest) = raw.split_at(digits_end);

        if !digits.is_empty() {
            for unit in TempUnit::MATCH_ORDER {
                if rest.starts_with(unit.reading_marker()) {
                    let value = digits
                        .parse()
                        .map_err(|_| ParseError::InvalidTemperature(raw.to_string()))?;
                    return Ok(Self::new(value, unit));
                }
            }
        }

        Err(ParseError::InvalidTemperature(raw.to_string()))
    }
}

impl FromStr for Temperature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_reading(s)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}", self.value, self.unit)
    }
}
