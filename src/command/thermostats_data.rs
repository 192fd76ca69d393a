// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device listing command.

use crate::command::Command;

/// Command to read all thermostats of the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermostatsDataCommand {
    device_type: String,
}

impl ThermostatsDataCommand {
    /// Device type of Vaillant thermostats.
    pub const VAILLANT: &'static str = "NAVaillant";

    /// Creates a command listing devices of another type.
    #[must_use]
    pub fn with_device_type(device_type: impl Into<String>) -> Self {
        Self {
            device_type: device_type.into(),
        }
    }
}

impl Default for ThermostatsDataCommand {
    fn default() -> Self {
        Self::with_device_type(Self::VAILLANT)
    }
}

impl Command for ThermostatsDataCommand {
    fn endpoint(&self) -> &'static str {
        "getthermostatsdata"
    }

    fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![("device_type", self.device_type.clone())]
    }
}
