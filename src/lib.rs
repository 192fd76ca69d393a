// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vaillant Netatmo Lib - A Rust library to control Vaillant thermostats.
//!
//! This library provides an async client for the Netatmo cloud API used by
//! Vaillant thermostats, plus the local logic around it.
//!
//! # Supported Features
//!
//! - **Device listing**: Devices, modules, measured temperatures, programs
//! - **System mode**: Summer, winter, frost guard
//! - **Minor modes**: Manual override, away, hot water boost, validated
//!   before anything is sent
//! - **Weekly programs**: Resolve the zone active at any point in time
//! - **OAuth**: Automatic refresh of expired access tokens
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use vaillant_netatmo_lib::{SetpointMode, SystemClock, ThermostatClient, Token};
//! use vaillant_netatmo_lib::command::MinorModeRequest;
//!
//! #[tokio::main]
//! async fn main() -> vaillant_netatmo_lib::Result<()> {
//!     let client = ThermostatClient::builder("client-id", "client-secret", Token::new("access", "refresh"))
//!         .build()?;
//!
//!     let devices = client.get_thermostats_data().await?;
//!     let device = &devices[0];
//!     let module = &device.modules[0];
//!
//!     if let Some(zone) = module.active_zone(&SystemClock) {
//!         println!("Current zone: {:?}", zone.name);
//!     }
//!
//!     // Manual override to 21.5 °C for two hours
//!     let request = MinorModeRequest::activate(SetpointMode::Manual)
//!         .with_temperature(21.5)
//!         .with_end_time(Utc::now() + Duration::hours(2));
//!     client.set_minor_mode(&device.id, &module.id, &request).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
pub mod clock;
pub mod command;
pub mod error;
pub mod protocol;
pub mod response;
pub mod schedule;
pub mod types;

pub use client::{ClientBuilder, ThermostatClient, TokenHandler};
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{
    Command, MinorModeCommand, MinorModeRequest, NormalizedMinorMode, SystemModeCommand,
    ThermostatsDataCommand,
};
pub use error::{Argument, ArgumentError, Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{Protocol, Token};
pub use response::{Device, Module};
pub use schedule::{Program, ScheduleEntry, ThermProgram, Zone};
pub use types::{SetpointMode, SystemMode, ZoneId};
