// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minor mode changes and their argument rules.
//!
//! | Mode | Activate | Required | Forbidden |
//! |------|----------|----------|-----------|
//! | manual | yes | temperature, end time | - |
//! | manual | no | - | temperature, end time |
//! | away, hwb | yes | - | temperature |
//! | away, hwb | no | - | temperature, end time |
//!
//! Requests are checked before anything is sent, so a rejected request never
//! reaches the network.

use chrono::{DateTime, TimeZone, Utc};

use crate::command::Command;
use crate::error::{Argument, ArgumentError};
use crate::types::SetpointMode;

/// Which optional arguments a mode change must and must not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentPolicy {
    /// Arguments that must be present.
    pub required: &'static [Argument],
    /// Arguments that must be absent.
    pub forbidden: &'static [Argument],
}

impl ArgumentPolicy {
    /// Returns the policy for a mode and activation flag.
    #[must_use]
    pub const fn for_mode(mode: SetpointMode, activate: bool) -> Self {
        const BOTH: &[Argument] = &[Argument::Temperature, Argument::EndTime];
        const TEMPERATURE: &[Argument] = &[Argument::Temperature];

        match (mode.is_timed_absence(), activate) {
            (false, true) => Self {
                required: BOTH,
                forbidden: &[],
            },
            (true, true) => Self {
                required: &[],
                forbidden: TEMPERATURE,
            },
            (_, false) => Self {
                required: &[],
                forbidden: BOTH,
            },
        }
    }
}

/// A requested minor mode change before validation.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vaillant_netatmo_lib::command::MinorModeRequest;
/// use vaillant_netatmo_lib::types::SetpointMode;
///
/// let end = Utc.with_ymd_and_hms(2021, 11, 22, 18, 0, 0).unwrap();
/// let normalized = MinorModeRequest::activate(SetpointMode::Manual)
///     .with_temperature(21.5)
///     .with_end_time(end)
///     .validate_and_build()
///     .unwrap();
/// assert_eq!(normalized.setpoint_endtime(), Some(end.timestamp()));
///
/// // Away never takes a temperature
/// assert!(MinorModeRequest::activate(SetpointMode::Away)
///     .with_temperature(21.5)
///     .validate_and_build()
///     .is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MinorModeRequest {
    mode: SetpointMode,
    activate: bool,
    setpoint_temp: Option<f64>,
    setpoint_endtime: Option<DateTime<Utc>>,
}

impl MinorModeRequest {
    /// Creates a request with no optional arguments.
    #[must_use]
    pub const fn new(mode: SetpointMode, activate: bool) -> Self {
        Self {
            mode,
            activate,
            setpoint_temp: None,
            setpoint_endtime: None,
        }
    }

    /// Creates a request that activates `mode`.
    #[must_use]
    pub const fn activate(mode: SetpointMode) -> Self {
        Self::new(mode, true)
    }

    /// Creates a request that deactivates `mode`.
    #[must_use]
    pub const fn deactivate(mode: SetpointMode) -> Self {
        Self::new(mode, false)
    }

    /// Sets the target temperature.
    #[must_use]
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.setpoint_temp = Some(temp);
        self
    }

    /// Sets the time at which the mode ends.
    #[must_use]
    pub fn with_end_time<Tz: TimeZone>(mut self, end: DateTime<Tz>) -> Self {
        self.setpoint_endtime = Some(end.with_timezone(&Utc));
        self
    }

    /// Returns the requested mode.
    #[must_use]
    pub const fn mode(&self) -> SetpointMode {
        self.mode
    }

    /// Returns whether the mode is being activated.
    #[must_use]
    pub const fn is_activate(&self) -> bool {
        self.activate
    }

    fn has(&self, argument: Argument) -> bool {
        match argument {
            Argument::Temperature => self.setpoint_temp.is_some(),
            Argument::EndTime => self.setpoint_endtime.is_some(),
        }
    }

    /// Checks the argument combination and produces the normalized change.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Unsupported` naming every missing and
    /// unexpected argument, or `ArgumentError::NonFiniteTemperature`.
    pub fn validate_and_build(&self) -> Result<NormalizedMinorMode, ArgumentError> {
        validate_and_build(self)
    }
}

/// A validated minor mode change, ready for transport.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMinorMode {
    mode: SetpointMode,
    activate: bool,
    setpoint_temp: Option<f64>,
    setpoint_endtime: Option<i64>,
}

impl NormalizedMinorMode {
    /// Returns the mode.
    #[must_use]
    pub const fn mode(&self) -> SetpointMode {
        self.mode
    }

    /// Returns whether the mode is being activated.
    #[must_use]
    pub const fn is_activate(&self) -> bool {
        self.activate
    }

    /// Returns the target temperature, if any.
    #[must_use]
    pub const fn setpoint_temp(&self) -> Option<f64> {
        self.setpoint_temp
    }

    /// Returns the end time as unix epoch seconds, if any.
    #[must_use]
    pub const fn setpoint_endtime(&self) -> Option<i64> {
        self.setpoint_endtime
    }

    fn push_params(&self, params: &mut Vec<(&'static str, String)>) {
        params.push(("setpoint_mode", self.mode.as_str().to_string()));
        params.push(("activate", self.activate.to_string()));
        if let Some(temp) = self.setpoint_temp {
            params.push((Argument::Temperature.as_str(), temp.to_string()));
        }
        if let Some(end) = self.setpoint_endtime {
            params.push((Argument::EndTime.as_str(), end.to_string()));
        }
    }
}

/// Rounds a point in time to the nearest epoch second.
fn epoch_seconds(time: &DateTime<Utc>) -> i64 {
    let secs = time.timestamp();
    if time.timestamp_subsec_nanos() >= 500_000_000 {
        secs + 1
    } else {
        secs
    }
}

/// Checks a minor mode request against its [`ArgumentPolicy`].
///
/// # Errors
///
/// Returns `ArgumentError::Unsupported` if a required argument is absent or a
/// forbidden one is present, and `ArgumentError::NonFiniteTemperature` for a
/// NaN or infinite temperature.
pub fn validate_and_build(request: &MinorModeRequest) -> Result<NormalizedMinorMode, ArgumentError> {
    let policy = ArgumentPolicy::for_mode(request.mode, request.activate);

    let missing: Vec<Argument> = policy
        .required
        .iter()
        .copied()
        .filter(|a| !request.has(*a))
        .collect();
    let unexpected: Vec<Argument> = policy
        .forbidden
        .iter()
        .copied()
        .filter(|a| request.has(*a))
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        tracing::debug!(
            mode = %request.mode,
            activate = request.activate,
            ?missing,
            ?unexpected,
            "Rejected minor mode request"
        );
        return Err(ArgumentError::Unsupported {
            mode: request.mode.as_str(),
            activate: request.activate,
            missing,
            unexpected,
        });
    }

    if let Some(temp) = request.setpoint_temp
        && !temp.is_finite()
    {
        tracing::debug!(mode = %request.mode, temp, "Rejected non-finite temperature");
        return Err(ArgumentError::NonFiniteTemperature);
    }

    Ok(NormalizedMinorMode {
        mode: request.mode,
        activate: request.activate,
        setpoint_temp: request.setpoint_temp,
        setpoint_endtime: request.setpoint_endtime.as_ref().map(epoch_seconds),
    })
}

/// Command that changes a module's minor mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MinorModeCommand {
    device_id: String,
    module_id: String,
    change: NormalizedMinorMode,
}

impl MinorModeCommand {
    /// Creates a command from an already validated change.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        module_id: impl Into<String>,
        change: NormalizedMinorMode,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            module_id: module_id.into(),
            change,
        }
    }

    /// Returns the validated change.
    #[must_use]
    pub fn change(&self) -> &NormalizedMinorMode {
        &self.change
    }
}

impl Command for MinorModeCommand {
    fn endpoint(&self) -> &'static str {
        "setminormode"
    }

    fn form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("device_id", self.device_id.clone()),
            ("module_id", self.module_id.clone()),
        ];
        self.change.push_params(&mut params);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 11, 22, 18, 0, 0).unwrap()
    }

    fn assert_rejected(
        request: &MinorModeRequest,
        expected_missing: &[Argument],
        expected_unexpected: &[Argument],
    ) {
        match request.validate_and_build() {
            Err(ArgumentError::Unsupported {
                missing,
                unexpected,
                ..
            }) => {
                assert_eq!(missing, expected_missing);
                assert_eq!(unexpected, expected_unexpected);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    // ========== Manual ==========

    #[test]
    fn manual_activate_with_temp_and_endtime_accepts() {
        let end = Utc::now() + TimeDelta::seconds(1);
        let normalized = MinorModeRequest::activate(SetpointMode::Manual)
            .with_temperature(25.0)
            .with_end_time(end)
            .validate_and_build()
            .unwrap();

        assert_eq!(normalized.mode(), SetpointMode::Manual);
        assert!(normalized.is_activate());
        assert_eq!(normalized.setpoint_temp(), Some(25.0));
        assert_eq!(normalized.setpoint_endtime(), Some(epoch_seconds(&end)));
    }

    #[test]
    fn manual_activate_missing_arguments_rejects() {
        use Argument::{EndTime, Temperature};

        assert_rejected(
            &MinorModeRequest::activate(SetpointMode::Manual),
            &[Temperature, EndTime],
            &[],
        );
        assert_rejected(
            &MinorModeRequest::activate(SetpointMode::Manual).with_end_time(end()),
            &[Temperature],
            &[],
        );
        assert_rejected(
            &MinorModeRequest::activate(SetpointMode::Manual).with_temperature(25.0),
            &[EndTime],
            &[],
        );
    }

    #[test]
    fn manual_deactivate_without_arguments_accepts() {
        let normalized = MinorModeRequest::deactivate(SetpointMode::Manual)
            .validate_and_build()
            .unwrap();
        assert!(!normalized.is_activate());
        assert_eq!(normalized.setpoint_temp(), None);
        assert_eq!(normalized.setpoint_endtime(), None);
    }

    #[test]
    fn manual_deactivate_with_arguments_rejects() {
        use Argument::{EndTime, Temperature};

        let base = MinorModeRequest::deactivate(SetpointMode::Manual);
        assert_rejected(&base.clone().with_temperature(25.0), &[], &[Temperature]);
        assert_rejected(&base.clone().with_end_time(end()), &[], &[EndTime]);
        assert_rejected(
            &base.with_temperature(25.0).with_end_time(end()),
            &[],
            &[Temperature, EndTime],
        );
    }

    // ========== Away / hot water boost ==========

    #[test]
    fn timed_activate_without_temp_accepts() {
        for mode in [SetpointMode::Away, SetpointMode::Hwb] {
            let bare = MinorModeRequest::activate(mode).validate_and_build().unwrap();
            assert_eq!(bare.setpoint_endtime(), None);

            let timed = MinorModeRequest::activate(mode)
                .with_end_time(end())
                .validate_and_build()
                .unwrap();
            assert_eq!(timed.mode(), mode);
            assert_eq!(timed.setpoint_endtime(), Some(end().timestamp()));
        }
    }

    #[test]
    fn timed_activate_with_temp_rejects() {
        for mode in [SetpointMode::Away, SetpointMode::Hwb] {
            let base = MinorModeRequest::activate(mode).with_temperature(25.0);
            assert_rejected(&base, &[], &[Argument::Temperature]);
            assert_rejected(&base.with_end_time(end()), &[], &[Argument::Temperature]);
        }
    }

    #[test]
    fn timed_deactivate_accepts_only_without_arguments() {
        use Argument::{EndTime, Temperature};

        for mode in [SetpointMode::Away, SetpointMode::Hwb] {
            assert!(MinorModeRequest::deactivate(mode).validate_and_build().is_ok());

            let base = MinorModeRequest::deactivate(mode);
            assert_rejected(&base.clone().with_temperature(25.0), &[], &[Temperature]);
            assert_rejected(&base.clone().with_end_time(end()), &[], &[EndTime]);
            assert_rejected(
                &base.with_temperature(25.0).with_end_time(end()),
                &[],
                &[Temperature, EndTime],
            );
        }
    }

    #[test]
    fn rejection_names_mode_and_activation() {
        let err = MinorModeRequest::deactivate(SetpointMode::Hwb)
            .with_end_time(end())
            .validate_and_build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "deactivating hwb mode: unexpected setpoint_endtime"
        );
    }

    // ========== Normalization ==========

    #[test]
    fn end_time_rounds_to_nearest_second() {
        let base = end();
        assert_eq!(
            epoch_seconds(&(base + TimeDelta::milliseconds(499))),
            base.timestamp()
        );
        assert_eq!(
            epoch_seconds(&(base + TimeDelta::milliseconds(500))),
            base.timestamp() + 1
        );
    }

    #[test]
    fn end_time_is_converted_from_any_timezone() {
        let local = chrono::FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2021, 11, 22, 19, 0, 0)
            .unwrap();
        let normalized = MinorModeRequest::activate(SetpointMode::Away)
            .with_end_time(local)
            .validate_and_build()
            .unwrap();
        assert_eq!(normalized.setpoint_endtime(), Some(end().timestamp()));
    }

    #[test]
    fn command_form_params_only_include_present_arguments() {
        let change = MinorModeRequest::deactivate(SetpointMode::Hwb)
            .validate_and_build()
            .unwrap();
        let cmd = MinorModeCommand::new("device", "module", change);
        assert_eq!(cmd.endpoint(), "setminormode");
        assert_eq!(
            cmd.form_params(),
            vec![
                ("device_id", "device".to_string()),
                ("module_id", "module".to_string()),
                ("setpoint_mode", "hwb".to_string()),
                ("activate", "false".to_string()),
            ]
        );
    }

    #[test]
    fn command_form_params_format_temperature_and_endtime() {
        let change = MinorModeRequest::activate(SetpointMode::Manual)
            .with_temperature(25.0)
            .with_end_time(end())
            .validate_and_build()
            .unwrap();
        let params = MinorModeCommand::new("d", "m", change).form_params();
        assert!(params.contains(&("setpoint_temp", "25".to_string())));
        assert!(params.contains(&("setpoint_endtime", end().timestamp().to_string())));
    }

    #[test]
    fn rejects_non_finite_temperature() {
        for temp in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = MinorModeRequest::activate(SetpointMode::Manual)
                .with_temperature(temp)
                .with_end_time(end())
                .validate_and_build();
            assert_eq!(result, Err(ArgumentError::NonFiniteTemperature));
        }
    }

    #[test]
    fn policy_table() {
        assert_eq!(
            ArgumentPolicy::for_mode(SetpointMode::Manual, true).required.len(),
            2
        );
        assert!(
            ArgumentPolicy::for_mode(SetpointMode::Away, true)
                .required
                .is_empty()
        );
        assert_eq!(
            ArgumentPolicy::for_mode(SetpointMode::Hwb, false).forbidden,
            &[Argument::Temperature, Argument::EndTime]
        );
    }
}
