// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating modes of a thermostat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Coarse operating mode of a device.
///
/// # Examples
///
/// ```
/// use vaillant_netatmo_lib::types::SystemMode;
///
/// assert_eq!(SystemMode::Summer.as_str(), "summer");
/// assert_eq!("winter".parse::<SystemMode>().unwrap(), SystemMode::Winter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemMode {
    /// Hot water only, no heating.
    Summer,
    /// Heating and hot water.
    Winter,
    /// Frost protection only.
    Frostguard,
}

impl SystemMode {
    /// Returns the API wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Winter => "winter",
            Self::Frostguard => "frostguard",
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summer" => Ok(Self::Summer),
            "winter" => Ok(Self::Winter),
            "frostguard" => Ok(Self::Frostguard),
            _ => Err(ValueError::InvalidSystemMode(s.to_string())),
        }
    }
}

/// A minor mode layered on top of the system mode.
///
/// Modes fall into two classes with different argument rules, see
/// [`SetpointMode::is_timed_absence`].
///
/// # Examples
///
/// ```
/// use vaillant_netatmo_lib::types::SetpointMode;
///
/// assert_eq!(SetpointMode::Hwb.as_str(), "hwb");
/// assert!(SetpointMode::Away.is_timed_absence());
/// assert!(!SetpointMode::Manual.is_timed_absence());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetpointMode {
    /// Manual temperature override until an end time.
    Manual,
    /// Away from home.
    Away,
    /// Hot water boost.
    Hwb,
}

impl SetpointMode {
    /// Returns the API wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Away => "away",
            Self::Hwb => "hwb",
        }
    }

    /// Returns `true` for modes that never take a temperature.
    #[must_use]
    pub const fn is_timed_absence(&self) -> bool {
        matches!(self, Self::Away | Self::Hwb)
    }
}

impl fmt::Display for SetpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetpointMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "away" => Ok(Self::Away),
            "hwb" => Ok(Self::Hwb),
            _ => Err(ValueError::InvalidSetpointMode(s.to_string())),
        }
    }
}
