// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Weekly recurring availability schedule for a coach.
//!
//! Times are wall-clock `HH:mm` strings interpreted in the schedule's
//! timezone. Scalar policy bounds are declared here; intra-day consistency
//! (overlaps, break gaps) is enforced by `services::schedule_rules`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// A single `[start_time, end_time)` interval within one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Wall-clock start, `HH:mm` 24-hour
    pub start_time: String,
    /// Wall-clock end, `HH:mm` 24-hour, must be after start
    pub end_time: String,
    /// Inactive ranges are retained but never offered as slots
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl TimeRange {
    pub fn new(start_time: &str, end_time: &str) -> Self {
        Self {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            is_active: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Day of the week, serialized as its lowercase English name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coach's weekly recurring schedule plus booking policy scalars.
///
/// One document per coach; the store keys on `coach_id` so a second save
/// replaces rather than duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeeklySchedule {
    #[validate(length(min = 1))]
    pub coach_id: String,

    /// Ranges per weekday. Order within a day carries no meaning; the
    /// validator re-sorts by start time before checking.
    #[serde(default)]
    pub week: BTreeMap<Weekday, Vec<TimeRange>>,

    /// IANA timezone name all times are interpreted in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Advertised session length in minutes
    #[serde(default = "default_duration")]
    #[validate(range(min = 15, max = 180))]
    pub default_duration_minutes: u32,

    /// Minimum lead time between "now" and a bookable slot's start
    #[serde(default = "default_cutoff")]
    #[validate(range(max = 72))]
    pub booking_cutoff_hours: u32,

    /// Minimum gap between the end of one range and the start of the next
    #[serde(default)]
    #[validate(range(max = 60))]
    pub break_between_slots_minutes: u32,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_duration() -> u32 {
    60
}

fn default_cutoff() -> u32 {
    12
}

impl WeeklySchedule {
    /// New schedule with default policies and an empty week.
    pub fn new(coach_id: &str) -> Self {
        Self {
            coach_id: coach_id.to_string(),
            week: BTreeMap::new(),
            timezone: default_timezone(),
            default_duration_minutes: default_duration(),
            booking_cutoff_hours: default_cutoff(),
            break_between_slots_minutes: 0,
        }
    }

    /// Ranges configured for `day`, empty if the day was never set.
    pub fn ranges_for(&self, day: Weekday) -> &[TimeRange] {
        self.week.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}
