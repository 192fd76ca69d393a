// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat API command definitions.
//!
//! Each command names an API endpoint and the form fields posted to it. The
//! access token is appended by the transport.
//!
//! # Available Commands
//!
//! | Command Type | Endpoint | Purpose |
//! |-------------|----------|---------|
//! | [`ThermostatsDataCommand`] | `getthermostatsdata` | Read devices and modules |
//! | [`SystemModeCommand`] | `setsystemmode` | Switch summer/winter/frostguard |
//! | [`MinorModeCommand`] | `setminormode` | Manual, away or hot water boost override |
//!
//! # Examples
//!
//! ```
//! use vaillant_netatmo_lib::command::{Command, SystemModeCommand};
//! use vaillant_netatmo_lib::types::SystemMode;
//!
//! let cmd = SystemModeCommand::new("device", "module", SystemMode::Summer);
//! assert_eq!(cmd.endpoint(), "setsystemmode");
//! assert_eq!(cmd.form_params()[2], ("system_mode", "summer".to_string()));
//! ```

mod minor_mode;
mod system_mode;
mod thermostats_data;

pub use minor_mode::{
    ArgumentPolicy, MinorModeCommand, MinorModeRequest, NormalizedMinorMode, validate_and_build,
};
pub use system_mode::SystemModeCommand;
pub use thermostats_data::ThermostatsDataCommand;

/// A request that can be posted to the thermostat API.
pub trait Command {
    /// Returns the endpoint name, appended to `/api/`.
    fn endpoint(&self) -> &'static str;

    /// Returns the form fields in the order they are sent.
    fn form_params(&self) -> Vec<(&'static str, String)>;

    /// Returns the endpoint path relative to the API base URL.
    fn path(&self) -> String {
        format!("/api/{}", self.endpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SystemMode;

    #[test]
    fn command_path() {
        let cmd = SystemModeCommand::new("device", "module", SystemMode::Winter);
        assert_eq!(cmd.path(), "/api/setsystemmode");
    }

    #[test]
    fn thermostats_data_path() {
        assert_eq!(
            ThermostatsDataCommand::default().path(),
            "/api/getthermostatsdata"
        );
    }
}
