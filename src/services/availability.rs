// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Availability resolution: weekly schedule in, concrete bookable slots out.
//!
//! The resolver is a pure computation over the data it is handed. Its output
//! is a snapshot valid only at the instant the bookings were read; the store's
//! booking commit path re-checks availability atomically.

use crate::models::booking::{BookableSlot, BookedInterval};
use crate::models::schedule::{Weekday, WeeklySchedule};
use crate::services::schedule_rules::SchedulingError;
use crate::time_utils::{format_hhmm, intervals_overlap, local_instant, parse_hhmm};
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};

fn parse_stored_time(time: &str, context: &str) -> Result<u32, SchedulingError> {
    parse_hhmm(time)
        .ok_or_else(|| SchedulingError::InvalidSchedule(format!("{context}: bad time {time:?}")))
}

/// Index already-booked intervals by date, parsed to minutes.
fn index_bookings(
    bookings: &[BookedInterval],
) -> Result<HashMap<NaiveDate, Vec<(u32, u32)>>, SchedulingError> {
    let mut by_date: HashMap<NaiveDate, Vec<(u32, u32)>> = HashMap::new();
    for booking in bookings {
        let start = parse_stored_time(&booking.start_time, "booked interval")?;
        let end = parse_stored_time(&booking.end_time, "booked interval")?;
        by_date.entry(booking.date).or_default().push((start, end));
    }
    Ok(by_date)
}

/// Resolve a schedule into the list of concretely bookable slots.
///
/// Enumerates every calendar date from `window_start` through
/// `window_start + window_days` in the schedule's timezone, skips overridden
/// dates entirely, materializes each active range as a dated slot, then drops
/// slots inside the booking cutoff or overlapping an existing booking.
///
/// Cutoff is inclusive: a slot starting exactly `booking_cutoff_hours` from
/// `window_start` is kept.
///
/// Never fails on well-formed input; an empty result is a valid "no
/// availability" answer. Schedule data that does not parse here is a
/// programming error surfaced as `InvalidSchedule`.
pub fn resolve_slots(
    schedule: &WeeklySchedule,
    window_start: DateTime<Utc>,
    window_days: u32,
    bookings: &[BookedInterval],
    override_dates: &[NaiveDate],
) -> Result<Vec<BookableSlot>, SchedulingError> {
    let tz: Tz = schedule.timezone.parse().map_err(|_| {
        SchedulingError::InvalidSchedule(format!("unknown timezone {:?}", schedule.timezone))
    })?;

    let overridden: HashSet<NaiveDate> = override_dates.iter().copied().collect();
    let booked = index_bookings(bookings)?;
    let cutoff = Duration::hours(schedule.booking_cutoff_hours as i64);
    let first_date = window_start.with_timezone(&tz).date_naive();

    let mut slots = Vec::new();
    for offset in 0..=window_days {
        let Some(date) = first_date.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        if overridden.contains(&date) {
            continue;
        }

        let day = Weekday::from(date.weekday());
        let mut ranges: Vec<(u32, u32)> = Vec::new();
        for range in schedule.ranges_for(day) {
            if !range.is_active {
                continue;
            }
            let start = parse_stored_time(&range.start_time, day.as_str())?;
            let end = parse_stored_time(&range.end_time, day.as_str())?;
            ranges.push((start, end));
        }
        ranges.sort_by_key(|(start, _)| *start);

        let day_bookings = booked.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        for (start, end) in ranges {
            // A local start skipped by a DST jump has no instant; not offerable.
            let Some(start_instant) = local_instant(date, start, tz) else {
                continue;
            };
            if start_instant.signed_duration_since(window_start) < cutoff {
                continue;
            }
            if day_bookings
                .iter()
                .any(|&(b_start, b_end)| intervals_overlap(start, end, b_start, b_end))
            {
                continue;
            }
            slots.push(BookableSlot {
                day,
                date,
                start_time: format_hhmm(start),
                end_time: format_hhmm(end),
            });
        }
    }

    // Dates ascend and ranges were sorted per day, so slots are already in
    // (date, start_time) order.
    Ok(slots)
}
