// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat programs as reported in device records.

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Deserializer};

use crate::clock::Clock;
use crate::schedule::{Program, ScheduleEntry};
use crate::types::ZoneId;

/// A heating zone referenced by a program's timetable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Zone {
    /// Zone identifier.
    pub id: ZoneId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Vendor zone type code.
    #[serde(rename = "type", default)]
    pub zone_type: Option<u32>,
    /// Target temperature of the zone.
    #[serde(default)]
    pub temp: Option<f64>,
}

/// A named weekly program with its zones.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vaillant_netatmo_lib::schedule::ThermProgram;
///
/// let json = r#"{
///     "program_id": "p1",
///     "name": "Default",
///     "selected": true,
///     "zones": [{"id": 0, "name": "Comfort", "temp": 21}, {"id": 1, "name": "Night", "temp": 17}],
///     "timetable": [{"id": 1, "m_offset": 0}, {"id": 0, "m_offset": 420}]
/// }"#;
/// let program: ThermProgram = serde_json::from_str(json).unwrap();
///
/// // Monday 08:00
/// let now = NaiveDate::from_ymd_opt(2021, 11, 22).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// assert_eq!(program.active_zone_at(&now).unwrap().name.as_deref(), Some("Comfort"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThermProgram {
    /// Program identifier.
    pub program_id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Zones referenced by the timetable.
    #[serde(default)]
    pub zones: Vec<Zone>,
    /// Weekly zone changes, `None` if the reported timetable is invalid.
    #[serde(default, deserialize_with = "lenient_timetable")]
    pub timetable: Option<Program>,
    /// Whether this program is the one the device currently follows.
    #[serde(default)]
    pub selected: bool,
}

impl ThermProgram {
    /// Returns the zone with the given identifier.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Returns the zone active at the given wall-clock time.
    ///
    /// `None` if the timetable is invalid or references a zone the program
    /// doesn't define.
    #[must_use]
    pub fn active_zone_at<T: Datelike + Timelike>(&self, now: &T) -> Option<&Zone> {
        self.zone(self.timetable.as_ref()?.active_zone_id_at(now))
    }

    /// Returns the zone active at the clock's current time.
    #[must_use]
    pub fn active_zone(&self, clock: &dyn Clock) -> Option<&Zone> {
        self.active_zone_at(&clock.now())
    }
}

/// Keeps a bad timetable from failing the whole device listing.
fn lenient_timetable<'de, D>(deserializer: D) -> Result<Option<Program>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<ScheduleEntry>::deserialize(deserializer)?;
    match Program::new(entries) {
        Ok(program) => Ok(Some(program)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid timetable");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn program() -> ThermProgram {
        serde_json::from_value(serde_json::json!({
            "program_id": "abc",
            "zones": [
                {"id": 0, "name": "Comfort", "type": 0, "temp": 21.5},
                {"id": 1, "name": "Night", "type": 1, "temp": 17}
            ],
            "timetable": [
                {"id": 1, "m_offset": 0},
                {"id": 0, "m_offset": 420},
                {"id": 1, "m_offset": 1320},
                {"id": 5, "m_offset": 9000}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn defaults_for_optional_fields() {
        let program = program();
        assert!(!program.selected);
        assert!(program.name.is_none());
    }

    #[test]
    fn active_zone_resolves_definition() {
        let program = program();
        let now = NaiveDate::from_ymd_opt(2021, 11, 22)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let zone = program.active_zone_at(&now).unwrap();
        assert_eq!(zone.id, ZoneId::new(0));
        assert_eq!(zone.temp, Some(21.5));
    }

    #[test]
    fn invalid_timetable_has_no_active_zone() {
        let now = NaiveDate::from_ymd_opt(2021, 11, 22)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        for timetable in [
            serde_json::json!([]),
            serde_json::json!([{"id": 0, "m_offset": 10080}]),
            serde_json::json!([{"id": 0, "m_offset": 60}, {"id": 1, "m_offset": 60}]),
        ] {
            let program: ThermProgram = serde_json::from_value(serde_json::json!({
                "program_id": "broken",
                "zones": [{"id": 0}, {"id": 1}],
                "timetable": timetable
            }))
            .unwrap();
            assert!(program.timetable.is_none());
            assert!(program.active_zone_at(&now).is_none());
        }
    }

    #[test]
    fn missing_timetable_is_none() {
        let program: ThermProgram =
            serde_json::from_value(serde_json::json!({"program_id": "bare"})).unwrap();
        assert!(program.timetable.is_none());
    }

    #[test]
    fn active_zone_unknown_id_is_none() {
        let program = program();
        // Sunday 07:00, after the change to undefined zone 5
        let now = NaiveDate::from_ymd_opt(2021, 11, 28)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        assert!(program.active_zone_at(&now).is_none());
    }
}
