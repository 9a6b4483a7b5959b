// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Steamist library.
//!
//! Failures fall into a few groups: network communication with the
//! controller, decoding what it sent back, and misuse of the client API
//! (unknown models, operations a controller type does not provide).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the controller.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a controller response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A discovery scan finished without any controller answering.
    #[error("device not found")]
    DeviceNotFound,

    /// The operation is not implemented by this controller type.
    #[error("operation not supported: {0}")]
    UnsupportedOperation(&'static str),

    /// The model identifier does not match any known controller.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),
}

/// Errors related to network communication (HTTP/UDP).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Socket operation failed during a discovery scan.
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    /// The controller answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing controller responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML body could not be decoded.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Temperature reading did not match `<digits>XF` or `<digits>XC`.
    #[error("unrecognized temperature reading: {0:?}")]
    InvalidTemperature(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("temp0".to_string());
        assert_eq!(err.to_string(), "missing field in response: temp0");
    }

    #[test]
    fn invalid_temperature_display() {
        let err = ParseError::InvalidTemperature("abcXK".to_string());
        assert_eq!(err.to_string(), "unrecognized temperature reading: \"abcXK\"");
    }

    #[test]
    fn error_from_parse_error() {
        let err: Error = ParseError::MissingField("profile".to_string()).into();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
    }

    #[test]
    fn unsupported_errors_display() {
        assert_eq!(
            Error::UnsupportedOperation("get_status").to_string(),
            "operation not supported: get_status"
        );
        assert_eq!(
            Error::UnsupportedModel("650".to_string()).to_string(),
            "unsupported model: 650"
        );
        assert_eq!(Error::DeviceNotFound.to_string(), "device not found");
    }
}
