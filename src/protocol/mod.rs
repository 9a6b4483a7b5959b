// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports for communicating with Steamist controllers.
//!
//! # Protocols
//!
//! - [`HttpClient`]: timed GET requests against the Model 450 web interface
//! - [`StatusXml`]: decoding of the 450's `status.xml` document
//! - [`UdpScanner`]: UDP announce probes answered by the Model 550

mod discovery;
mod http;
mod xml;

pub use discovery::{
    DISCOVERY_PORT, DiscoveredDevice, DiscoveryOptions, MODEL_450, MODEL_550, Scanner, UdpScanner,
    decode_reply,
};
pub use http::{HttpClient, HttpConfig};
pub use xml::StatusXml;
