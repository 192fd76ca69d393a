// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Injectable time source.
//!
//! Schedule resolution and token expiry checks read the current time through
//! the [`Clock`] trait so they stay deterministic under test.
//!
//! # Examples
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use vaillant_netatmo_lib::clock::{Clock, FixedClock};
//!
//! let instant = FixedOffset::east_opt(3600)
//!     .unwrap()
//!     .with_ymd_and_hms(2021, 11, 22, 1, 0, 0)
//!     .unwrap();
//! let clock = FixedClock::new(instant);
//! assert_eq!(clock.now(), instant);
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};

/// A source of the current point in time.
///
/// The returned value carries its UTC offset so that both the local wall-clock
/// fields (for weekly schedules) and the absolute instant (for epoch
/// timestamps) are available.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current point in time.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The local system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    /// Creates a clock that always returns `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
