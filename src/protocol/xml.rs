// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of the `status.xml` document served by HTTP controllers.
//!
//! ```xml
//! <response>
//!   <temp0>110XF</temp0>
//!   <time0>12</time0>
//!   <led0>0</led0>
//! </response>
//! ```
//!
//! Only `temp0` and `time0` are read; other elements are ignored.

use serde::Deserialize;

use crate::error::ParseError;

/// Fields of the `<response>` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusXml {
    /// Raw temperature reading, e.g. `110XF`.
    pub temp0: Option<String>,
    /// Minutes left in the session, as a decimal string.
    pub time0: Option<String>,
}

impl StatusXml {
    /// Parses a `status.xml` body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Xml` if the body is not well-formed XML.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        quick_xml::de::from_str(body).map_err(ParseError::Xml)
    }

    /// Returns the raw temperature reading.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `temp0` is absent.
    pub fn temperature(&self) -> Result<&str, ParseError> {
        required("temp0", self.temp0.as_deref())
    }

    /// Returns the minutes left in the session.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `time0` is absent or not an integer.
    pub fn minutes_remain(&self) -> Result<i32, ParseError> {
        let raw = required("time0", self.time0.as_deref())?;
        raw.trim().parse().map_err(|e| ParseError::InvalidValue {
            field: "time0".to_string(),
            message: format!("{raw:?}: {e}"),
        })
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ParseError> {
    value.ok_or_else(|| ParseError::MissingField(format!("response.{field}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_document() {
        let xml = "<?xml version=\"1.0\"?>\
                   <response><temp0>110XF</temp0><time0>12</time0><led0>1</led0></response>";
        let status = StatusXml::parse(xml).unwrap();

        assert_eq!(status.temperature().unwrap(), "110XF");
        assert_eq!(status.minutes_remain().unwrap(), 12);
    }

    #[test]
    fn missing_fields_are_reported() {
        let status = StatusXml::parse("<response><led0>1</led0></response>").unwrap();

        assert!(matches!(
            status.temperature(),
            Err(ParseError::MissingField(ref f)) if f == "response.temp0"
        ));
        assert!(matches!(
            status.minutes_remain(),
            Err(ParseError::MissingField(ref f)) if f == "response.time0"
        ));
    }

    #[test]
    fn non_numeric_time_fails() {
        let status =
            StatusXml::parse("<response><temp0>100XF</temp0><time0>soon</time0></response>")
                .unwrap();
        assert!(matches!(
            status.minutes_remain(),
            Err(ParseError::InvalidValue { ref field, .. }) if field == "time0"
        ));
    }

    #[test]
    fn malformed_xml_fails() {
        let result = StatusXml::parse("<response><temp0>100XF</time0></response>");
        assert!(matches!(result, Err(ParseError::Xml(_))));
    }
}
