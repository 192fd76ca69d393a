// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heating zone identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a heating zone selected by a weekly program.
///
/// # Examples
///
/// ```
/// use vaillant_netatmo_lib::types::ZoneId;
///
/// let zone = ZoneId::new(2);
/// assert_eq!(zone.value(), 2);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ZoneId(u32);

impl ZoneId {
    /// Creates a zone identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ZoneId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
