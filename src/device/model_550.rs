// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model 550 controller (UDP discovery).

use std::time::Duration;

use parking_lot::Mutex;

use crate::device::Steamist;
use crate::error::{Error, Result};
use crate::protocol::{DiscoveryOptions, MODEL_550, Scanner, UdpScanner};
use crate::status::SteamistStatus;
use crate::transition::TransitionSmoother;

/// A Model 550 controller read through its discovery announcements.
///
/// This client has no control channel to the 550: [`turn_on`](Steamist::turn_on)
/// and [`turn_off`](Steamist::turn_off) never touch the network and only arm
/// the local transition window that [`get_status`](Steamist::get_status)
/// reports through.
///
/// # Examples
///
/// ```no_run
/// use steamist_lib::{Model550, Steamist};
///
/// # async fn example() -> steamist_lib::Result<()> {
/// let steamist = Model550::new("192.168.1.70");
/// let status = steamist.get_status().await?;
/// println!("{}:{:02} left", status.minutes_remain(), status.seconds_remain());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Model550<S: Scanner = UdpScanner> {
    host: String,
    scanner: S,
    scan_timeout: Duration,
    transition: Mutex<TransitionSmoother>,
}

impl Model550 {
    /// Creates a controller using the UDP scanner with default options.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_options(host, DiscoveryOptions::new())
    }

    /// Creates a controller using the UDP scanner with custom options.
    #[must_use]
    pub fn with_options(host: impl Into<String>, options: DiscoveryOptions) -> Self {
        let scan_timeout = options.timeout();
        Self::with_scanner(host, UdpScanner::new(options)).with_scan_timeout(scan_timeout)
    }
}

impl<S: Scanner> Model550<S> {
    /// Model identifier of this controller type.
    pub const MODEL: &'static str = MODEL_550;

    /// Creates a controller backed by a custom scanner.
    #[must_use]
    pub fn with_scanner(host: impl Into<String>, scanner: S) -> Self {
        Self {
            host: host.into(),
            scanner,
            scan_timeout: DiscoveryOptions::new().timeout(),
            transition: Mutex::new(TransitionSmoother::new()),
        }
    }

    /// Sets how long a status scan waits for the controller.
    #[must_use]
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Returns the controller address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the scan timeout.
    #[must_use]
    pub fn scan_timeout(&self) -> Duration {
        self.scan_timeout
    }

    /// Returns a snapshot of the transition state.
    #[must_use]
    pub fn transition(&self) -> TransitionSmoother {
        *self.transition.lock()
    }
}

impl<S: Scanner> Steamist for Model550<S> {
    fn model(&self) -> &'static str {
        Self::MODEL
    }

    async fn get_status(&self) -> Result<SteamistStatus> {
        let devices = self.scanner.scan(&self.host, self.scan_timeout).await?;

        let Some(device) = devices.first() else {
            tracing::debug!(host = %self.host, "No controller answered the scan");
            return Err(Error::DeviceNotFound);
        };

        let reported = SteamistStatus::from_discovery(device)?;
        let active = self.transition.lock().is_active(reported.active());
        let status = reported.with_active(active);

        tracing::debug!(
            host = %self.host,
            temp = status.temp(),
            units = %status.temp_units(),
            minutes_remain = status.minutes_remain(),
            seconds_remain = status.seconds_remain(),
            active,
            "Polled Model 550 status"
        );

        Ok(status)
    }

    async fn turn_on(&self) -> Result<()> {
        self.transition.lock().arm(true);
        Ok(())
    }

    async fn turn_off(&self) -> Result<()> {
        self.transition.lock().arm(false);
        Ok(())
    }
}
