// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UDP discovery for controllers that announce themselves on port 30303
//! (Model 550).
//!
//! The controller answers the Microchip announce probe
//! `Discovery: Who is out there?` with a short text reply:
//!
//! ```text
//! steamist-550\r\n
//! 00:04:A3:12:34:56\r\n
//! temperature=105\r\n
//! temp_unit=F\r\n
//! minutesleft=3\r\n
//! secondsleft=45\r\n
//! profile=1\r\n
//! ```
//!
//! The first line is the device name, the second its MAC address. Remaining
//! lines carry extra attributes either as `key=value` / `key:value` pairs or
//! as a single JSON object.
//!
//! # Examples
//!
//! ```no_run
//! use steamist_lib::protocol::{DiscoveryOptions, Scanner, UdpScanner};
//! use std::time::Duration;
//!
//! # async fn example() -> steamist_lib::Result<()> {
//! let scanner = UdpScanner::new(DiscoveryOptions::new());
//! let devices = scanner.scan("192.168.1.70", Duration::from_secs(5)).await?;
//!
//! for device in &devices {
//!     println!("{} at {}", device.name(), device.ipaddress());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use serde_json::Value;
use tokio::net::UdpSocket;
use tokio::time::Instant;

use crate::error::ProtocolError;

/// Model identifier of the HTTP/XML controller.
pub const MODEL_450: &str = "450";
/// Model identifier of the UDP discovery controller.
pub const MODEL_550: &str = "550";

/// UDP port controllers listen on for the announce probe.
pub const DISCOVERY_PORT: u16 = 30303;

/// Probe datagram sent to the controller.
const DISCOVERY_PROBE: &[u8] = b"Discovery: Who is out there?";

/// Default scan timeout.
const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest reply datagram accepted.
const MAX_REPLY_LEN: usize = 1500;

/// Options for a discovery scan.
///
/// # Examples
///
/// ```
/// use steamist_lib::protocol::DiscoveryOptions;
/// use std::time::Duration;
///
/// let options = DiscoveryOptions::new().with_timeout(Duration::from_secs(2));
/// assert_eq!(options.timeout(), Duration::from_secs(2));
/// assert_eq!(options.port(), 30303);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    timeout: Option<Duration>,
    port: Option<u16>,
}

impl DiscoveryOptions {
    /// Creates options with the defaults (5 second timeout, port 30303).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long to wait for replies.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the UDP port the probe is sent to.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Returns the scan timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_DISCOVERY_TIMEOUT)
    }

    /// Returns the probe port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DISCOVERY_PORT)
    }
}

/// A controller that answered a discovery probe.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredDevice {
    ipaddress: String,
    name: String,
    mac: Option<String>,
    additional_data: HashMap<String, Value>,
}

impl DiscoveredDevice {
    /// Creates a device record without extra attributes.
    #[must_use]
    pub fn new(ipaddress: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ipaddress: ipaddress.into(),
            name: name.into(),
            mac: None,
            additional_data: HashMap::new(),
        }
    }

    /// Sets the MAC address.
    #[must_use]
    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = Some(mac.into());
        self
    }

    /// Adds extra attributes, replacing existing keys.
    #[must_use]
    pub fn with_additional_data(
        mut self,
        data: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        self.additional_data.extend(data);
        self
    }

    /// Returns the address the reply came from.
    #[must_use]
    pub fn ipaddress(&self) -> &str {
        &self.ipaddress
    }

    /// Returns the announced device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the announced MAC address, if any.
    #[must_use]
    pub fn mac(&self) -> Option<&str> {
        self.mac.as_deref()
    }

    /// Returns the extra attributes announced by the device.
    #[must_use]
    pub fn additional_data(&self) -> &HashMap<String, Value> {
        &self.additional_data
    }
}

/// One-shot lookup of controllers at an address.
#[allow(async_fn_in_trait)]
pub trait Scanner {
    /// Probes `address` and collects the devices that answer within `timeout`.
    ///
    /// An empty result is not an error at this level.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the probe cannot be sent or replies cannot
    /// be received.
    async fn scan(
        &self,
        address: &str,
        timeout: Duration,
    ) -> Result<Vec<DiscoveredDevice>, ProtocolError>;
}

/// [`Scanner`] speaking the UDP announce protocol.
#[derive(Debug, Clone, Default)]
pub struct UdpScanner {
    options: DiscoveryOptions,
}

impl UdpScanner {
    /// Creates a scanner with the given options.
    #[must_use]
    pub fn new(options: DiscoveryOptions) -> Self {
        Self { options }
    }

    /// Returns the scanner options.
    #[must_use]
    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }
}

impl Scanner for UdpScanner {
    async fn scan(
        &self,
        address: &str,
        timeout: Duration,
    ) -> Result<Vec<DiscoveredDevice>, ProtocolError> {
        let target = resolve(address, self.options.port()).await?;
        let broadcast = matches!(target.ip(), IpAddr::V4(ip) if ip.is_broadcast());

        let bind_addr: IpAddr = if target.is_ipv4() {
            Ipv4Addr::UNSPECIFIED.into()
        } else {
            Ipv6Addr::UNSPECIFIED.into()
        };
        let socket = UdpSocket::bind((bind_addr, 0)).await?;
        if broadcast {
            socket.set_broadcast(true)?;
        }

        tracing::debug!(
            target = %target,
            timeout_secs = timeout.as_secs_f64(),
            "Sending discovery probe"
        );
        socket.send_to(DISCOVERY_PROBE, target).await?;

        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; MAX_REPLY_LEN];
        let mut devices = Vec::new();

        loop {
            let (len, from) =
                match tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await {
                    Ok(received) => received?,
                    Err(_) => break,
                };

            if !broadcast && from.ip() != target.ip() {
                tracing::debug!(from = %from, "Ignoring reply from other host");
                continue;
            }

            let Some(device) = decode_reply(&buf[..len], from.ip()) else {
                tracing::warn!(from = %from, len, "Undecodable discovery reply");
                continue;
            };

            tracing::debug!(from = %from, name = %device.name(), "Discovery reply");
            devices.push(device);

            if !broadcast {
                break;
            }
        }

        tracing::debug!(count = devices.len(), "Discovery scan finished");

        Ok(devices)
    }
}

async fn resolve(address: &str, port: u16) -> Result<SocketAddr, ProtocolError> {
    tokio::net::lookup_host((address, port))
        .await?
        .next()
        .ok_or_else(|| ProtocolError::InvalidAddress(address.to_string()))
}

/// Decodes one announce reply.
///
/// Returns `None` for datagrams that are not announce replies, including
/// echoes of the probe itself.
#[must_use]
pub fn decode_reply(datagram: &[u8], from: IpAddr) -> Option<DiscoveredDevice> {
    if datagram == DISCOVERY_PROBE {
        return None;
    }

    let text = std::str::from_utf8(datagram).ok()?;
    let mut lines = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let name = lines.next()?;
    let mut device = DiscoveredDevice::new(from.to_string(), name);

    if let Some(mac) = lines.next() {
        device = device.with_mac(mac);
    }

    for line in lines {
        if line.starts_with('{') {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(line) {
                device = device.with_additional_data(map);
            }
            continue;
        }

        if let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) {
            device = device.with_additional_data([(key.trim().to_string(), attr_value(value))]);
        }
    }

    Some(device)
}

fn attr_value(raw: &str) -> Value {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    const FROM: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 70));

    #[test]
    fn discovery_options_default() {
        let options = DiscoveryOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(5));
        assert_eq!(options.port(), 30303);
    }

    #[test]
    fn discovery_options_chained() {
        let options = DiscoveryOptions::new()
            .with_timeout(Duration::from_secs(1))
            .with_port(40404);
        assert_eq!(options.timeout(), Duration::from_secs(1));
        assert_eq!(options.port(), 40404);
    }

    #[test]
    fn decodes_key_value_reply() {
        let reply = b"steamist-550\r\n00:04:A3:12:34:56\r\ntemperature=105\r\ntemp_unit=F\r\n\
                      minutesleft=3\r\nsecondsleft=45\r\nprofile=1\r\n";
        let device = decode_reply(reply, FROM).unwrap();

        assert_eq!(device.name(), "steamist-550");
        assert_eq!(device.mac(), Some("00:04:A3:12:34:56"));
        assert_eq!(device.ipaddress(), "192.168.1.70");

        let data = device.additional_data();
        assert_eq!(data["temperature"], json!(105));
        assert_eq!(data["temp_unit"], json!("F"));
        assert_eq!(data["profile"], json!(1));
    }

    #[test]
    fn decodes_colon_pairs_and_json_object() {
        let reply = b"steamist\nAA:BB:CC:DD:EE:FF\ntemp_unit: C\n{\"temperature\": 41, \"profile\": 0}\n";
        let device = decode_reply(reply, FROM).unwrap();

        let data = device.additional_data();
        assert_eq!(data["temp_unit"], json!("C"));
        assert_eq!(data["temperature"], json!(41));
        assert_eq!(data["profile"], json!(0));
    }

    #[test]
    fn decodes_name_only_reply() {
        let device = decode_reply(b"steamist\r\n", FROM).unwrap();
        assert_eq!(device.name(), "steamist");
        assert_eq!(device.mac(), None);
        assert!(device.additional_data().is_empty());
    }

    #[test]
    fn ignores_probe_echo_and_garbage() {
        assert!(decode_reply(DISCOVERY_PROBE, FROM).is_none());
        assert!(decode_reply(b"", FROM).is_none());
        assert!(decode_reply(b"\r\n\r\n", FROM).is_none());
        assert!(decode_reply(&[0xff, 0xfe, 0x00], FROM).is_none());
    }

    #[test]
    fn with_additional_data_replaces_keys() {
        let device = DiscoveredDevice::new("10.0.0.5", "steamist")
            .with_additional_data(attrs(json!({"profile": 0})))
            .with_additional_data(attrs(json!({"profile": 2})));
        assert_eq!(device.additional_data()["profile"], json!(2));
    }
}
