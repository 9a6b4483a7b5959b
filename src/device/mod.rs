// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller abstraction over both Steamist hardware generations.
//!
//! # Controller Differences
//!
//! ## Model 450
//!
//! Status and control go over HTTP. Each call is one GET request.
//!
//! ## Model 550
//!
//! Status is read from discovery announcements over UDP. There is no control
//! channel, so on/off commands only update the local transition window.
//!
//! Both report through [`SteamistStatus`], and both hold the commanded state
//! for ten seconds after `turn_on`/`turn_off` so a poll right after a command
//! does not show the stale state.
//!
//! # Choosing a Controller
//!
//! ```no_run
//! use steamist_lib::{AnySteamist, Steamist, MODEL_550};
//!
//! # async fn example() -> steamist_lib::Result<()> {
//! let steamist = AnySteamist::create("192.168.1.70", MODEL_550, reqwest::Client::new)?;
//! assert_eq!(steamist.model(), MODEL_550);
//!
//! let status = steamist.get_status().await?;
//! # Ok(())
//! # }
//! ```

mod model_450;
mod model_550;

pub use model_450::{Model450, SET_ENDPOINT, STATUS_ENDPOINT, STEAM_OFF_LED, STEAM_ON_LED};
pub use model_550::Model550;

use crate::error::{Error, Result};
use crate::protocol::{HttpConfig, MODEL_450, MODEL_550};
use crate::status::SteamistStatus;

/// Status and control operations shared by all controllers.
///
/// Implementations override the operations their hardware supports. The
/// provided bodies fail with [`Error::UnsupportedOperation`].
#[allow(async_fn_in_trait)]
pub trait Steamist {
    /// Returns the model identifier of this controller type.
    fn model(&self) -> &'static str;

    /// Reads the current status.
    ///
    /// # Errors
    ///
    /// Returns error if the controller cannot be reached or its answer
    /// cannot be parsed.
    async fn get_status(&self) -> Result<SteamistStatus> {
        Err(Error::UnsupportedOperation("get_status"))
    }

    /// Starts the steam generator.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be delivered.
    async fn turn_on(&self) -> Result<()> {
        Err(Error::UnsupportedOperation("turn_on"))
    }

    /// Stops the steam generator.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be delivered.
    async fn turn_off(&self) -> Result<()> {
        Err(Error::UnsupportedOperation("turn_off"))
    }
}

/// A controller of either generation, chosen from its model identifier.
#[derive(Debug)]
pub enum AnySteamist {
    /// HTTP/XML controller.
    Model450(Model450),
    /// UDP discovery controller.
    Model550(Model550),
}

impl AnySteamist {
    /// Creates the controller matching `model`.
    ///
    /// [`MODEL_550`] selects the discovery controller. Every other string,
    /// including unknown ones, selects the HTTP controller, whose session is
    /// obtained from `session_factory` only in that case.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP controller cannot be created.
    pub fn create<F>(host: impl Into<String>, model: &str, session_factory: F) -> Result<Self>
    where
        F: FnOnce() -> reqwest::Client,
    {
        if model == MODEL_550 {
            return Ok(Self::Model550(Model550::new(host)));
        }

        if model != MODEL_450 {
            tracing::warn!(model, "Unknown model identifier, assuming Model 450");
        }

        let config = HttpConfig::new(host);
        Ok(Self::Model450(Model450::with_config(
            config,
            session_factory(),
        )?))
    }

    /// Creates the controller matching `model`, rejecting unknown identifiers.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedModel` if `model` is neither [`MODEL_450`]
    /// nor [`MODEL_550`], or error if the HTTP controller cannot be created.
    pub fn try_create<F>(host: impl Into<String>, model: &str, session_factory: F) -> Result<Self>
    where
        F: FnOnce() -> reqwest::Client,
    {
        match model {
            MODEL_450 | MODEL_550 => Self::create(host, model, session_factory),
            _ => Err(Error::UnsupportedModel(model.to_string())),
        }
    }
}

impl From<Model450> for AnySteamist {
    fn from(steamist: Model450) -> Self {
        Self::Model450(steamist)
    }
}

impl From<Model550> for AnySteamist {
    fn from(steamist: Model550) -> Self {
        Self::Model550(steamist)
    }
}

impl Steamist for AnySteamist {
    fn model(&self) -> &'static str {
        match self {
            Self::Model450(s) => s.model(),
            Self::Model550(s) => s.model(),
        }
    }

    async fn get_status(&self) -> Result<SteamistStatus> {
        match self {
            Self::Model450(s) => s.get_status().await,
            Self::Model550(s) => s.get_status().await,
        }
    }

    async fn turn_on(&self) -> Result<()> {
        match self {
            Self::Model450(s) => s.turn_on().await,
            Self::Model550(s) => s.turn_on().await,
        }
    }

    async fn turn_off(&self) -> Result<()> {
        match self {
            Self::Model450(s) => s.turn_off().await,
            Self::Model550(s) => s.turn_off().await,
        }
    }
}
