// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Steamist controller readings.
//!
//! - [`TempUnit`] - Fahrenheit or Celsius
//! - [`Temperature`] - A reading parsed from the controller's `<digits>X<F|C>` form

mod temperature;

pub use temperature::{TempUnit, Temperature};
