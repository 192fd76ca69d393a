// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the thermostat client.
//!
//! Failures fall into four groups: invalid values given to constructors,
//! argument combinations rejected before a request is built, transport
//! failures, and response parsing failures.

use std::fmt;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A minor-mode request was rejected locally. Never retried.
    #[error("unsupported arguments: {0}")]
    Argument(#[from] ArgumentError),

    /// The request could not be completed.
    #[error("request failed: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },

    /// A program must contain at least one schedule entry.
    #[error("program has no schedule entries")]
    EmptyProgram,

    /// Two schedule entries share the same minute offset.
    #[error("duplicate schedule entry at minute offset {0}")]
    DuplicateOffset(u32),

    /// An unknown system mode string was provided.
    #[error("invalid system mode: {0}")]
    InvalidSystemMode(String),

    /// An unknown setpoint mode string was provided.
    #[error("invalid setpoint mode: {0}")]
    InvalidSetpointMode(String),
}

/// An optional argument of a minor-mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Argument {
    /// The target temperature.
    Temperature,
    /// The time at which the override ends.
    EndTime,
}

impl Argument {
    /// Returns the form field name of the argument.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "setpoint_temp",
            Self::EndTime => "setpoint_endtime",
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when a minor-mode request has an illegal argument set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Arguments are missing or not allowed for this mode and activation flag.
    #[error("{}", describe_unsupported(.mode, .activate, .missing, .unexpected))]
    Unsupported {
        /// Wire name of the requested mode.
        mode: &'static str,
        /// Whether the mode was being activated.
        activate: bool,
        /// Arguments that must be supplied but were not.
        missing: Vec<Argument>,
        /// Arguments that were supplied but are not allowed.
        unexpected: Vec<Argument>,
    },

    /// The target temperature is NaN or infinite.
    #[error("setpoint_temp must be a finite number")]
    NonFiniteTemperature,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_unsupported(
    mode: &str,
    activate: &bool,
    missing: &[Argument],
    unexpected: &[Argument],
) -> String {
    let action = if *activate { "activating" } else { "deactivating" };
    let join = |args: &[Argument]| {
        args.iter()
            .map(Argument::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", join(missing)));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected {}", join(unexpected)));
    }
    format!("{action} {mode} mode: {}", parts.join("; "))
}

/// Errors related to communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the network level.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("HTTP {status} - {reason}")]
    RequestFailed {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase.
        reason: String,
    },

    /// The access token was refused.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The access token expired and no refresh was possible.
    #[error("access token expired")]
    TokenExpired,

    /// The API answered 2xx but reported a failure status in the body.
    #[error("API returned status '{0}'")]
    ApiStatus(String),

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 10_079,
            actual: 10_080,
        };
        assert_eq!(err.to_string(), "value 10080 is out of range [0, 10079]");
    }

    #[test]
    fn unsupported_arguments_names_missing() {
        let err = ArgumentError::Unsupported {
            mode: "manual",
            activate: true,
            missing: vec![Argument::Temperature, Argument::EndTime],
            unexpected: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "activating manual mode: missing setpoint_temp, setpoint_endtime"
        );
    }

    #[test]
    fn unsupported_arguments_names_unexpected() {
        let err = ArgumentError::Unsupported {
            mode: "away",
            activate: false,
            missing: Vec::new(),
            unexpected: vec![Argument::EndTime],
        };
        assert_eq!(
            err.to_string(),
            "deactivating away mode: unexpected setpoint_endtime"
        );
    }

    #[test]
    fn non_finite_temperature_display() {
        assert_eq!(
            ArgumentError::NonFiniteTemperature.to_string(),
            "setpoint_temp must be a finite number"
        );
    }

    #[test]
    fn error_from_argument_error() {
        let err: Error = ArgumentError::Unsupported {
            mode: "hwb",
            activate: true,
            missing: Vec::new(),
            unexpected: vec![Argument::Temperature],
        }
        .into();
        assert!(matches!(err, Error::Argument(_)));
    }

    #[test]
    fn request_failed_display() {
        let err = ProtocolError::RequestFailed {
            status: 400,
            reason: "Bad Request".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400 - Bad Request");
    }
}
