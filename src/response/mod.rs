// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for thermostat API answers.
//!
//! Every answer is wrapped in an [`ApiResponse`] envelope. Device listings
//! carry a [`ThermostatsData`] body.

mod device;
mod envelope;

pub use device::{Device, Measured, Module, Setpoint, ThermostatsData};
pub use envelope::{ApiResponse, STATUS_OK};
