// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records returned by `getthermostatsdata`.
//!
//! Only the fields this library works with are modelled; unknown fields are
//! ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::clock::Clock;
use crate::schedule::{ThermProgram, Zone};
use crate::types::{SetpointMode, SystemMode};

/// Body of a `getthermostatsdata` answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThermostatsData {
    /// Devices of the account.
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// State of a minor mode override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Setpoint {
    /// Whether the override is active.
    pub setpoint_activate: bool,
    /// End of the override as unix epoch seconds.
    #[serde(default)]
    pub setpoint_endtime: Option<i64>,
    /// Target temperature of the override.
    #[serde(default)]
    pub setpoint_temp: Option<f64>,
}

impl Setpoint {
    /// Returns the end of the override.
    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.setpoint_endtime
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Temperatures measured by a module.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Measured {
    /// Room temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Current target temperature.
    #[serde(default)]
    pub setpoint_temp: Option<f64>,
    /// Estimated target temperature.
    #[serde(default)]
    pub est_setpoint_temp: Option<f64>,
}

/// A thermostat module attached to a device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Module {
    /// Module identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Module type.
    #[serde(rename = "type")]
    pub module_type: String,
    /// Display name.
    #[serde(default)]
    pub module_name: String,
    /// Firmware version.
    #[serde(default, deserialize_with = "string_or_number")]
    pub firmware: String,
    /// Away override state.
    #[serde(default)]
    pub setpoint_away: Setpoint,
    /// Manual override state.
    #[serde(default)]
    pub setpoint_manual: Setpoint,
    /// Measured temperatures.
    #[serde(default)]
    pub measured: Measured,
    /// Weekly programs stored on the module.
    #[serde(default)]
    pub therm_program_list: Vec<ThermProgram>,
}

impl Module {
    /// Returns the program the module currently follows.
    #[must_use]
    pub fn active_program(&self) -> Option<&ThermProgram> {
        self.therm_program_list.iter().find(|p| p.selected)
    }

    /// Returns the zone of the selected program active right now.
    #[must_use]
    pub fn active_zone(&self, clock: &dyn Clock) -> Option<&Zone> {
        self.active_program()?.active_zone(clock)
    }

    /// Returns the active module-level override, manual taking precedence.
    #[must_use]
    pub fn active_minor_mode(&self) -> Option<SetpointMode> {
        if self.setpoint_manual.setpoint_activate {
            Some(SetpointMode::Manual)
        } else if self.setpoint_away.setpoint_activate {
            Some(SetpointMode::Away)
        } else {
            None
        }
    }
}

/// A thermostat relay station and its modules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Device {
    /// Device identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Device type.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Display name.
    #[serde(default)]
    pub station_name: String,
    /// Firmware version.
    #[serde(default, deserialize_with = "string_or_number")]
    pub firmware: String,
    /// Current system mode.
    pub system_mode: SystemMode,
    /// Default override duration in minutes.
    #[serde(default)]
    pub setpoint_default_duration: Option<u32>,
    /// Hot water boost state.
    #[serde(default)]
    pub setpoint_hwb: Setpoint,
    /// Attached modules.
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Device {
    /// Returns the module with the given identifier.
    #[must_use]
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Returns `true` if hot water boost is on.
    #[must_use]
    pub fn is_hwb_active(&self) -> bool {
        self.setpoint_hwb.setpoint_activate
    }
}

/// Firmware is a string on some devices and a number on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
