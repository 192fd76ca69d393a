// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System mode command.

use crate::command::Command;
use crate::types::SystemMode;

/// Command to switch the system mode of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemModeCommand {
    device_id: String,
    module_id: String,
    mode: SystemMode,
}

impl SystemModeCommand {
    /// Creates a system mode command.
    #[must_use]
    pub fn new(device_id: impl Into<String>, module_id: impl Into<String>, mode: SystemMode) -> Self {
        Self {
            device_id: device_id.into(),
            module_id: module_id.into(),
            mode,
        }
    }

    /// Returns the requested mode.
    #[must_use]
    pub const fn mode(&self) -> SystemMode {
        self.mode
    }
}

impl Command for SystemModeCommand {
    fn endpoint(&self) -> &'static str {
        "setsystemmode"
    }

    fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("device_id", self.device_id.clone()),
            ("module_id", self.module_id.clone()),
            ("system_mode", self.mode.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_params() {
        let cmd = SystemModeCommand::new("device", "module", SystemMode::Frostguard);
        assert_eq!(
            cmd.form_params(),
            vec![
                ("device_id", "device".to_string()),
                ("module_id", "module".to_string()),
                ("system_mode", "frostguard".to_string()),
            ]
        );
    }
}
