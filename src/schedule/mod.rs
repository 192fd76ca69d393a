// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekly heating programs.
//!
//! A [`Program`] is a circular list of zone changes anchored to minutes since
//! Monday 00:00. The zone active at a given time is the one set by the latest
//! change at or before that minute; before the first change of the week, the
//! last change of the previous week still applies.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use vaillant_netatmo_lib::schedule::{Program, ScheduleEntry};
//! use vaillant_netatmo_lib::types::ZoneId;
//!
//! let program = Program::new(vec![
//!     ScheduleEntry::new(ZoneId::new(1), 0),
//!     ScheduleEntry::new(ZoneId::new(0), 60),
//!     ScheduleEntry::new(ZoneId::new(2), 120),
//! ])
//! .unwrap();
//!
//! // Monday 01:30
//! let now = NaiveDate::from_ymd_opt(2021, 11, 22)
//!     .unwrap()
//!     .and_hms_opt(1, 30, 0)
//!     .unwrap();
//! assert_eq!(program.active_zone_id_at(&now), ZoneId::new(0));
//! ```

mod therm_program;

pub use therm_program::{ThermProgram, Zone};

use chrono::{Datelike, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::ValueError;
use crate::types::ZoneId;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Minutes in one week.
pub const MINUTES_PER_WEEK: u32 = 7 * MINUTES_PER_DAY;

/// Returns the minutes elapsed since Monday 00:00 for a wall-clock time.
///
/// Seconds are discarded.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vaillant_netatmo_lib::schedule::week_minute;
///
/// // Tuesday 02:05
/// let t = NaiveDate::from_ymd_opt(2021, 11, 23).unwrap().and_hms_opt(2, 5, 59).unwrap();
/// assert_eq!(week_minute(&t), 1440 + 125);
/// ```
#[must_use]
pub fn week_minute<T: Datelike + Timelike>(now: &T) -> u32 {
    now.weekday().num_days_from_monday() * MINUTES_PER_DAY + now.hour() * 60 + now.minute()
}

/// A single zone change within a weekly program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Zone that becomes active.
    #[serde(rename = "id")]
    pub zone_id: ZoneId,
    /// Minutes since Monday 00:00 at which the zone becomes active.
    #[serde(rename = "m_offset")]
    pub minute_offset: u32,
}

impl ScheduleEntry {
    /// Creates a schedule entry.
    #[must_use]
    pub const fn new(zone_id: ZoneId, minute_offset: u32) -> Self {
        Self {
            zone_id,
            minute_offset,
        }
    }
}

/// A normalized weekly program.
///
/// Entries are sorted by offset, offsets are unique and lie within one week,
/// and there is at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScheduleEntry>", into = "Vec<ScheduleEntry>")]
pub struct Program {
    entries: Vec<ScheduleEntry>,
}

impl Program {
    /// Creates a program from entries in any order.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyProgram` if `entries` is empty,
    /// `ValueError::OutOfRange` if an offset is not within one week, and
    /// `ValueError::DuplicateOffset` if two entries share an offset.
    pub fn new(mut entries: Vec<ScheduleEntry>) -> Result<Self, ValueError> {
        if entries.is_empty() {
            return Err(ValueError::EmptyProgram);
        }

        if let Some(entry) = entries
            .iter()
            .find(|e| e.minute_offset >= MINUTES_PER_WEEK)
        {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: MINUTES_PER_WEEK - 1,
                actual: entry.minute_offset,
            });
        }

        entries.sort_by_key(|e| e.minute_offset);

        if let Some(pair) = entries
            .windows(2)
            .find(|w| w[0].minute_offset == w[1].minute_offset)
        {
            return Err(ValueError::DuplicateOffset(pair[0].minute_offset));
        }

        Ok(Self { entries })
    }

    /// Returns the entries sorted by offset.
    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Returns the entry active at the given week minute.
    fn active_entry(&self, minute: u32) -> &ScheduleEntry {
        let idx = self.entries.partition_point(|e| e.minute_offset <= minute);
        // Before the first change of the week the last one still applies.
        let idx = idx.checked_sub(1).unwrap_or(self.entries.len() - 1);
        &self.entries[idx]
    }

    /// Returns the zone active at the given wall-clock time.
    #[must_use]
    pub fn active_zone_id_at<T: Datelike + Timelike>(&self, now: &T) -> ZoneId {
        let minute = week_minute(now);
        let zone_id = self.active_entry(minute).zone_id;
        tracing::trace!(week_minute = minute, zone = %zone_id, "Resolved active zone");
        zone_id
    }

    /// Returns the zone active at the clock's current time.
    #[must_use]
    pub fn active_zone_id(&self, clock: &dyn Clock) -> ZoneId {
        self.active_zone_id_at(&clock.now())
    }

    /// Returns the next zone change after the given time and how long until
    /// it happens. Wraps into the following week.
    #[must_use]
    pub fn next_change_at<T: Datelike + Timelike>(&self, now: &T) -> (ScheduleEntry, TimeDelta) {
        let minute = week_minute(now);
        let idx = self.entries.partition_point(|e| e.minute_offset <= minute);
        let next = self.entries.get(idx).unwrap_or(&self.entries[0]);

        let mut until = (next.minute_offset + MINUTES_PER_WEEK - minute) % MINUTES_PER_WEEK;
        if until == 0 {
            until = MINUTES_PER_WEEK;
        }

        (*next, TimeDelta::minutes(i64::from(until)))
    }
}

impl TryFrom<Vec<ScheduleEntry>> for Program {
    type Error = ValueError;

    fn try_from(entries: Vec<ScheduleEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Program> for Vec<ScheduleEntry> {
    fn from(program: Program) -> Self {
        program.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

    fn entry(zone: u32, offset: u32) -> ScheduleEntry {
        ScheduleEntry::new(ZoneId::new(zone), offset)
    }

    /// Three changes per day (zones 1, 0, 2 at 00:00, 01:00, 02:00) for all seven days.
    fn three_slots_per_day() -> Program {
        let entries = (0..7)
            .flat_map(|day| {
                let base = day * MINUTES_PER_DAY;
                [entry(1, base), entry(0, base + 60), entry(2, base + 120)]
            })
            .collect();
        Program::new(entries).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 11, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn week_minute_starts_monday() {
        assert_eq!(week_minute(&at(22, 0, 0)), 0);
        assert_eq!(week_minute(&at(28, 23, 59)), MINUTES_PER_WEEK - 1);
    }

    #[test]
    fn week_minute_ignores_seconds() {
        let t = NaiveDate::from_ymd_opt(2021, 11, 22)
            .unwrap()
            .and_hms_opt(0, 59, 59)
            .unwrap();
        assert_eq!(week_minute(&t), 59);
    }

    #[test]
    fn active_zone_around_boundaries_every_day() {
        let program = three_slots_per_day();
        // 2021-11-22 is a Monday; 29 is the following Monday.
        for day in 22..=29 {
            for (hour, minute, expected) in [
                (0, 0, 1),
                (0, 59, 1),
                (1, 0, 0),
                (1, 1, 0),
                (1, 59, 0),
                (2, 0, 2),
                (2, 1, 2),
                (23, 59, 2),
            ] {
                assert_eq!(
                    program.active_zone_id_at(&at(day, hour, minute)),
                    ZoneId::new(expected),
                    "day {day} {hour:02}:{minute:02}"
                );
            }
        }
    }

    #[test]
    fn active_zone_wraps_to_last_entry_before_first_change() {
        let program = Program::new(vec![entry(3, 480), entry(4, 8000)]).unwrap();
        // Monday 00:00, before the first change at Monday 08:00
        assert_eq!(program.active_zone_id_at(&at(22, 0, 0)), ZoneId::new(4));
        assert_eq!(program.active_zone_id_at(&at(22, 7, 59)), ZoneId::new(4));
        assert_eq!(program.active_zone_id_at(&at(22, 8, 0)), ZoneId::new(3));
    }

    #[test]
    fn single_entry_program_is_always_active() {
        let program = Program::new(vec![entry(7, 3000)]).unwrap();
        assert_eq!(program.active_zone_id_at(&at(22, 0, 0)), ZoneId::new(7));
        assert_eq!(program.active_zone_id_at(&at(28, 23, 59)), ZoneId::new(7));
    }

    #[test]
    fn active_zone_is_idempotent() {
        let program = three_slots_per_day();
        let now = at(24, 1, 30);
        assert_eq!(
            program.active_zone_id_at(&now),
            program.active_zone_id_at(&now)
        );
    }

    #[test]
    fn active_zone_uses_clock_local_time() {
        let program = three_slots_per_day();
        // 01:30 local on Wednesday, 00:30 UTC
        let instant = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2021, 11, 24, 1, 30, 0)
            .unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(program.active_zone_id(&clock), ZoneId::new(0));
    }

    #[test]
    fn new_sorts_entries() {
        let program = Program::new(vec![entry(2, 120), entry(1, 0), entry(0, 60)]).unwrap();
        let offsets: Vec<u32> = program.entries().iter().map(|e| e.minute_offset).collect();
        assert_eq!(offsets, vec![0, 60, 120]);
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Program::new(Vec::new()), Err(ValueError::EmptyProgram));
    }

    #[test]
    fn new_rejects_offset_outside_week() {
        assert!(matches!(
            Program::new(vec![entry(1, MINUTES_PER_WEEK)]),
            Err(ValueError::OutOfRange { actual: 10_080, .. })
        ));
    }

    #[test]
    fn new_rejects_duplicate_offsets() {
        assert_eq!(
            Program::new(vec![entry(1, 60), entry(2, 60)]),
            Err(ValueError::DuplicateOffset(60))
        );
    }

    #[test]
    fn deserialize_raw_timetable() {
        let json = r#"[{"id": 0, "m_offset": 60}, {"id": 1, "m_offset": 0}]"#;
        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.entries()[0], entry(1, 0));
        assert_eq!(program.entries()[1], entry(0, 60));
    }

    #[test]
    fn deserialize_rejects_empty_timetable() {
        assert!(serde_json::from_str::<Program>("[]").is_err());
    }

    #[test]
    fn next_change_within_day() {
        let program = three_slots_per_day();
        let (next, until) = program.next_change_at(&at(22, 0, 30));
        assert_eq!(next, entry(0, 60));
        assert_eq!(until, TimeDelta::minutes(30));
    }

    #[test]
    fn next_change_at_exact_boundary_skips_current() {
        let program = three_slots_per_day();
        let (next, until) = program.next_change_at(&at(22, 1, 0));
        assert_eq!(next, entry(2, 120));
        assert_eq!(until, TimeDelta::minutes(60));
    }

    #[test]
    fn next_change_wraps_week() {
        let program = three_slots_per_day();
        // Sunday 23:00 -> Monday 00:00
        let (next, until) = program.next_change_at(&at(28, 23, 0));
        assert_eq!(next, entry(1, 0));
        assert_eq!(until, TimeDelta::minutes(60));
    }

    #[test]
    fn next_change_single_entry_is_one_week_away() {
        let program = Program::new(vec![entry(7, 0)]).unwrap();
        let (next, until) = program.next_change_at(&at(22, 0, 0));
        assert_eq!(next, entry(7, 0));
        assert_eq!(until, TimeDelta::minutes(i64::from(MINUTES_PER_WEEK)));
    }
}
