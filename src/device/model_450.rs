// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model 450 controller (HTTP/XML).

use parking_lot::Mutex;

use crate::device::Steamist;
use crate::error::Result;
use crate::protocol::{HttpClient, HttpConfig, MODEL_450, StatusXml};
use crate::status::SteamistStatus;
use crate::transition::TransitionSmoother;
use crate::types::Temperature;

/// Status document path.
pub const STATUS_ENDPOINT: &str = "/status.xml";
/// LED command path.
pub const SET_ENDPOINT: &str = "/leds.cgi";

/// LED id that starts the steam generator.
pub const STEAM_ON_LED: u8 = 6;
/// LED id that stops the steam generator.
pub const STEAM_OFF_LED: u8 = 7;

/// A Model 450 controller reached over its web interface.
///
/// Status is read from `/status.xml`; steam is switched by "pressing"
/// LED buttons through `/leds.cgi`. The controller does not report
/// seconds, so [`SteamistStatus::seconds_remain`] is always 0.
///
/// # Examples
///
/// ```no_run
/// use steamist_lib::{Model450, Steamist};
///
/// # async fn example() -> steamist_lib::Result<()> {
/// let steamist = Model450::new("192.168.1.60")?;
///
/// steamist.turn_on().await?;
/// let status = steamist.get_status().await?;
/// println!("{}°{} with {} min left", status.temp(), status.temp_units(), status.minutes_remain());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Model450 {
    client: HttpClient,
    transition: Mutex<TransitionSmoother>,
}

impl Model450 {
    /// Model identifier of this controller type.
    pub const MODEL: &'static str = MODEL_450;

    /// Creates a controller with its own HTTP session and default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Ok(Self::from_client(HttpConfig::new(host).into_client()?))
    }

    /// Creates a controller that sends requests through a shared session.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty.
    pub fn with_session(host: impl Into<String>, session: reqwest::Client) -> Result<Self> {
        Self::with_config(HttpConfig::new(host), session)
    }

    /// Creates a controller from a full HTTP configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty.
    pub fn with_config(config: HttpConfig, session: reqwest::Client) -> Result<Self> {
        Ok(Self::from_client(config.into_client_with_session(session)?))
    }

    /// Creates a controller around an existing client.
    #[must_use]
    pub fn from_client(client: HttpClient) -> Self {
        Self {
            client,
            transition: Mutex::new(TransitionSmoother::new()),
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns a snapshot of the transition state.
    #[must_use]
    pub fn transition(&self) -> TransitionSmoother {
        *self.transition.lock()
    }

    /// Presses an LED button on the controller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn set_led(&self, id: u8) -> Result<()> {
        self.client
            .get(SET_ENDPOINT, &[("led", id.to_string())])
            .await?;
        Ok(())
    }

    async fn set_steam(&self, on: bool) -> Result<()> {
        let led = if on { STEAM_ON_LED } else { STEAM_OFF_LED };
        self.set_led(led).await?;
        self.transition.lock().arm(on);
        Ok(())
    }
}

impl Steamist for Model450 {
    fn model(&self) -> &'static str {
        Self::MODEL
    }

    async fn get_status(&self) -> Result<SteamistStatus> {
        let body = self.client.get(STATUS_ENDPOINT, &[]).await?;
        let response = StatusXml::parse(&body)?;

        let temperature = Temperature::parse_reading(response.temperature()?)?;
        let minutes_remain = response.minutes_remain()?;
        let active = self.transition.lock().is_active(minutes_remain > 0);

        let status = SteamistStatus::new(
            temperature.value(),
            temperature.unit(),
            minutes_remain,
            0,
            active,
        );

        tracing::debug!(
            base_url = %self.client.base_url(),
            temp = status.temp(),
            units = %status.temp_units(),
            minutes_remain,
            active,
            "Polled Model 450 status"
        );

        Ok(status)
    }

    async fn turn_on(&self) -> Result<()> {
        self.set_steam(true).await
    }

    async fn turn_off(&self) -> Result<()> {
        self.set_steam(false).await
    }
}
