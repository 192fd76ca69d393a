// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for thermostat control.
//!
//! # Types
//!
//! - [`SystemMode`] - Summer/Winter/Frostguard operating mode
//! - [`SetpointMode`] - Manual, away and hot water boost overrides
//! - [`ZoneId`] - Heating zone selected by a weekly program

mod mode;
mod zone;

pub use mode::{SetpointMode, SystemMode};
pub use zone::ZoneId;
