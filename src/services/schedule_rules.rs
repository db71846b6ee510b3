// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Intra-day consistency rules for weekly schedules.
//!
//! `validate_schedule` is the explicit pre-commit check the store runs before
//! persisting any schedule edit; it is independently callable so "can this be
//! saved" never depends on "is this being saved".

use crate::models::schedule::{Weekday, WeeklySchedule};
use crate::time_utils::{intervals_overlap, parse_hhmm};
use chrono::NaiveDate;
use chrono_tz::Tz;
use validator::Validate;

/// Scheduling domain errors.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// Malformed time string, unknown timezone, or out-of-bound policy scalar
    #[error("Invalid schedule: {0}")]
    Validation(String),

    /// Overlapping ranges or insufficient break within a day
    #[error("Conflicting time ranges on {day}")]
    Conflict { day: Weekday },

    /// An override already exists for this coach and date
    #[error("An emergency override already exists for {date}")]
    DuplicateOverride { date: NaiveDate },

    /// Resolver handed schedule data that passed no validation; fail fast
    #[error("Malformed schedule data: {0}")]
    InvalidSchedule(String),
}

/// A day's range parsed to minutes since midnight: `(start, end, is_active)`.
type ParsedRange = (u32, u32, bool);

fn parse_day_ranges(
    schedule: &WeeklySchedule,
    day: Weekday,
) -> Result<Vec<ParsedRange>, SchedulingError> {
    schedule
        .ranges_for(day)
        .iter()
        .map(|range| {
            let start = parse_hhmm(&range.start_time).ok_or_else(|| {
                SchedulingError::Validation(format!(
                    "{day}: bad start time {:?}, expected HH:mm",
                    range.start_time
                ))
            })?;
            let end = parse_hhmm(&range.end_time).ok_or_else(|| {
                SchedulingError::Validation(format!(
                    "{day}: bad end time {:?}, expected HH:mm",
                    range.end_time
                ))
            })?;
            // Cross-midnight ranges are unsupported; reject rather than guess
            // wraparound semantics.
            if start >= end {
                return Err(SchedulingError::Validation(format!(
                    "{day}: range {}-{} must start before it ends within one day",
                    range.start_time, range.end_time
                )));
            }
            Ok((start, end, range.is_active))
        })
        .collect()
}

/// Validate a schedule before it is committed.
///
/// Checks, per weekday independently:
/// 1. every range (active or not) parses as `HH:mm` and starts before it ends;
/// 2. active ranges, sorted by start, keep at least `break_between_slots_minutes`
///    between one range's end and the next one's start. Overlap is a negative
///    gap and is caught by the same check.
///
/// All-or-nothing: the first conflict aborts the whole save.
pub fn validate_schedule(schedule: &WeeklySchedule) -> Result<(), SchedulingError> {
    schedule
        .validate()
        .map_err(|e| SchedulingError::Validation(e.to_string()))?;

    schedule.timezone.parse::<Tz>().map_err(|_| {
        SchedulingError::Validation(format!("unknown timezone {:?}", schedule.timezone))
    })?;

    let required_gap = schedule.break_between_slots_minutes as i64;
    for day in Weekday::ALL {
        let mut active: Vec<ParsedRange> = parse_day_ranges(schedule, day)?
            .into_iter()
            .filter(|(_, _, is_active)| *is_active)
            .collect();
        active.sort_by_key(|(start, _, _)| *start);

        for pair in active.windows(2) {
            let (_, current_end, _) = pair[0];
            let (next_start, _, _) = pair[1];
            let gap = next_start as i64 - current_end as i64;
            if gap < required_gap {
                return Err(SchedulingError::Conflict { day });
            }
        }
    }

    Ok(())
}

/// Whether a requested `[start, end)` range is fully disjoint from every
/// active range already configured for `day`.
///
/// Pure read; half-open comparison, so a range starting exactly where another
/// ends is available.
pub fn is_time_available(
    schedule: &WeeklySchedule,
    day: Weekday,
    start_time: &str,
    end_time: &str,
) -> Result<bool, SchedulingError> {
    let start = parse_hhmm(start_time).ok_or_else(|| {
        SchedulingError::Validation(format!("bad start time {start_time:?}, expected HH:mm"))
    })?;
    let end = parse_hhmm(end_time).ok_or_else(|| {
        SchedulingError::Validation(format!("bad end time {end_time:?}, expected HH:mm"))
    })?;
    if start >= end {
        return Err(SchedulingError::Validation(format!(
            "range {start_time}-{end_time} must start before it ends"
        )));
    }

    for (slot_start, slot_end, is_active) in parse_day_ranges(schedule, day)? {
        if is_active && intervals_overlap(start, end, slot_start, slot_end) {
            return Ok(false);
        }
    }
    Ok(true)
}
