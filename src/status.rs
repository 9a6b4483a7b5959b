// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized controller status.
//!
//! Both controller generations report their state through [`SteamistStatus`],
//! whether it was read from the 450's `status.xml` or from the attributes a
//! 550 announces during discovery.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::protocol::DiscoveredDevice;
use crate::types::{TempUnit, Temperature};

/// Discovery attribute holding the temperature reading.
const ATTR_TEMPERATURE: &str = "temperature";
/// Discovery attribute holding the unit code.
const ATTR_TEMP_UNIT: &str = "temp_unit";
/// Discovery attribute holding whole minutes left in the session.
const ATTR_MINUTES_LEFT: &str = "minutesleft";
/// Discovery attribute holding seconds left within the current minute.
const ATTR_SECONDS_LEFT: &str = "secondsleft";
/// Discovery attribute holding the running profile (0 when idle).
const ATTR_PROFILE: &str = "profile";

/// Status snapshot of a Steamist controller.
///
/// # Examples
///
/// ```
/// use steamist_lib::SteamistStatus;
/// use steamist_lib::types::TempUnit;
///
/// let status = SteamistStatus::new(110, TempUnit::Fahrenheit, 12, 0, true);
/// assert_eq!(status.temp(), 110);
/// assert!(status.active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamistStatus {
    temp: i32,
    temp_units: TempUnit,
    minutes_remain: i32,
    seconds_remain: i32,
    active: bool,
}

impl SteamistStatus {
    /// Creates a new status snapshot.
    #[must_use]
    pub const fn new(
        temp: i32,
        temp_units: TempUnit,
        minutes_remain: i32,
        seconds_remain: i32,
        active: bool,
    ) -> Self {
        Self {
            temp,
            temp_units,
            minutes_remain,
            seconds_remain,
            active,
        }
    }

    /// Builds a status from the attributes a controller announced during
    /// discovery.
    ///
    /// The controller is considered active whenever a profile is running.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if an attribute is missing or cannot be coerced
    /// to the expected type.
    pub fn from_discovery(device: &DiscoveredDevice) -> Result<Self, ParseError> {
        let data = device.additional_data();

        let temp = int_attr(data, ATTR_TEMPERATURE)?;
        let temp_units: TempUnit = str_attr(data, ATTR_TEMP_UNIT)?.parse()?;
        let minutes_remain = int_attr(data, ATTR_MINUTES_LEFT)?;
        let seconds_remain = int_attr(data, ATTR_SECONDS_LEFT)?;
        let profile = int_attr(data, ATTR_PROFILE)?;

        Ok(Self::new(
            temp,
            temp_units,
            minutes_remain,
            seconds_remain,
            profile != 0,
        ))
    }

    /// Returns a copy of this status with the active flag replaced.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the measured temperature.
    #[must_use]
    pub const fn temp(&self) -> i32 {
        self.temp
    }

    /// Returns the unit of [`temp`](Self::temp).
    #[must_use]
    pub const fn temp_units(&self) -> TempUnit {
        self.temp_units
    }

    /// Returns the temperature together with its unit.
    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        Temperature::new(self.temp, self.temp_units)
    }

    /// Returns the whole minutes left in the steam session.
    #[must_use]
    pub const fn minutes_remain(&self) -> i32 {
        self.minutes_remain
    }

    /// Returns the seconds left within the current minute.
    ///
    /// Always 0 for controllers that only report minutes.
    #[must_use]
    pub const fn seconds_remain(&self) -> i32 {
        self.seconds_remain
    }

    /// Returns whether steam is running.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }
}

fn attr<'a>(data: &'a HashMap<String, Value>, key: &str) -> Result<&'a Value, ParseError> {
    data.get(key)
        .ok_or_else(|| ParseError::MissingField(key.to_string()))
}

fn int_attr(data: &HashMap<String, Value>, key: &str) -> Result<i32, ParseError> {
    let invalid = |message: String| ParseError::InvalidValue {
        field: key.to_string(),
        message,
    };

    match attr(data, key)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| invalid(format!("{n} is not a 32-bit integer"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| invalid(format!("{s:?}: {e}"))),
        other => Err(invalid(format!("expected an integer, got {other}"))),
    }
}

fn str_attr<'a>(data: &'a HashMap<String, Value>, key: &str) -> Result<&'a str, ParseError> {
    match attr(data, key)? {
        Value::String(s) => Ok(s.as_str()),
        other => Err(ParseError::InvalidValue {
            field: key.to_string(),
            message: format!("expected a string, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device(attrs: Value) -> DiscoveredDevice {
        let Value::Object(map) = attrs else {
            panic!("attributes must be an object");
        };
        DiscoveredDevice::new("192.168.1.50", "steamist").with_additional_data(map)
    }

    #[test]
    fn from_discovery_maps_all_attributes() {
        let status = SteamistStatus::from_discovery(&device(json!({
            "temperature": 105,
            "temp_unit": "F",
            "minutesleft": 3,
            "secondsleft": 45,
            "profile": 1
        })))
        .unwrap();

        assert_eq!(
            status,
            SteamistStatus::new(105, TempUnit::Fahrenheit, 3, 45, true)
        );
    }

    #[test]
    fn from_discovery_idle_profile_is_inactive() {
        let status = SteamistStatus::from_discovery(&device(json!({
            "temperature": 40,
            "temp_unit": "C",
            "minutesleft": 0,
            "secondsleft": 0,
            "profile": 0
        })))
        .unwrap();

        assert!(!status.active());
        assert_eq!(status.temp_units(), TempUnit::Celsius);
    }

    #[test]
    fn from_discovery_coerces_numeric_strings() {
        let status = SteamistStatus::from_discovery(&device(json!({
            "temperature": "98",
            "temp_unit": "F",
            "minutesleft": "10",
            "secondsleft": " 5",
            "profile": "2"
        })))
        .unwrap();

        assert_eq!(status.temp(), 98);
        assert_eq!(status.minutes_remain(), 10);
        assert_eq!(status.seconds_remain(), 5);
        assert!(status.active());
    }

    #[test]
    fn from_discovery_missing_attribute_fails() {
        let err = SteamistStatus::from_discovery(&device(json!({
            "temp_unit": "F",
            "minutesleft": 3,
            "secondsleft": 45,
            "profile": 1
        })))
        .unwrap_err();

        assert!(matches!(err, ParseError::MissingField(ref f) if f == "temperature"));
    }

    #[test]
    fn from_discovery_malformed_attribute_fails() {
        let err = SteamistStatus::from_discovery(&device(json!({
            "temperature": "warm",
            "temp_unit": "F",
            "minutesleft": 3,
            "secondsleft": 45,
            "profile": 1
        })))
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { ref field, .. } if field == "temperature"));

        let err = SteamistStatus::from_discovery(&device(json!({
            "temperature": 100,
            "temp_unit": "K",
            "minutesleft": 3,
            "secondsleft": 45,
            "profile": 1
        })))
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { ref field, .. } if field == "temp_unit"));
    }

    #[test]
    fn with_active_overrides_flag_only() {
        let status = SteamistStatus::new(110, TempUnit::Fahrenheit, 0, 0, false);
        let smoothed = status.with_active(true);
        assert!(smoothed.active());
        assert_eq!(smoothed.temp(), 110);
        assert_eq!(smoothed.minutes_remain(), 0);
    }

    #[test]
    fn serializes_with_unit_code() {
        let status = SteamistStatus::new(43, TempUnit::Celsius, 5, 0, true);
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json["temp_units"], "C");
        assert_eq!(json["minutes_remain"], 5);
    }
}
