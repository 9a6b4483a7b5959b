// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Steamist Lib - A Rust library to poll and control Steamist steam shower
//! controllers.
//!
//! Two hardware generations are supported:
//!
//! - **Model 450**: HTTP web interface (`/status.xml`, `/leds.cgi`)
//! - **Model 550**: UDP announce replies on port 30303 (status only)
//!
//! Both report a normalized [`SteamistStatus`]. After `turn_on`/`turn_off`,
//! the commanded state is reported for ten seconds while the hardware
//! catches up (see [`TransitionSmoother`]).
//!
//! # Quick Start
//!
//! ## Choosing the Controller from its Model
//!
//! ```no_run
//! use steamist_lib::{AnySteamist, Steamist};
//!
//! #[tokio::main]
//! async fn main() -> steamist_lib::Result<()> {
//!     let steamist = AnySteamist::create("192.168.1.60", "450", reqwest::Client::new)?;
//!
//!     steamist.turn_on().await?;
//!
//!     let status = steamist.get_status().await?;
//!     println!(
//!         "{}°{} active={} ({} min left)",
//!         status.temp(),
//!         status.temp_units(),
//!         status.active(),
//!         status.minutes_remain()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Model 450 with a Custom Timeout
//!
//! ```no_run
//! use std::time::Duration;
//! use steamist_lib::{Model450, Steamist};
//! use steamist_lib::protocol::HttpConfig;
//!
//! # async fn example() -> steamist_lib::Result<()> {
//! let config = HttpConfig::new("192.168.1.60").with_timeout(Duration::from_secs(3));
//! let steamist = Model450::with_config(config, reqwest::Client::new())?;
//!
//! steamist.turn_off().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Model 550
//!
//! ```no_run
//! use steamist_lib::{Error, Model550, Steamist};
//!
//! # async fn example() -> steamist_lib::Result<()> {
//! let steamist = Model550::new("192.168.1.70");
//!
//! match steamist.get_status().await {
//!     Ok(status) => println!("{}:{:02} left", status.minutes_remain(), status.seconds_remain()),
//!     Err(Error::DeviceNotFound) => println!("controller did not answer"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

mod device;
pub mod error;
pub mod protocol;
mod status;
mod transition;
pub mod types;

pub use device::{
    AnySteamist, Model450, Model550, SET_ENDPOINT, STATUS_ENDPOINT, STEAM_OFF_LED, STEAM_ON_LED,
    Steamist,
};
pub use error::{Error, ParseError, ProtocolError, Result};
pub use protocol::{
    DiscoveredDevice, DiscoveryOptions, HttpClient, HttpConfig, MODEL_450, MODEL_550, Scanner,
    UdpScanner,
};
pub use status::SteamistStatus;
pub use transition::{TRANSITION_WINDOW, TransitionSmoother};
pub use types::{TempUnit, Temperature};
