// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Shared helpers for wall-clock time parsing and interval arithmetic.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an `HH:mm` wall-clock string into minutes since midnight.
///
/// Accepts a one- or two-digit hour (0-23) and a zero-padded minute (00-59).
pub fn parse_hhmm(raw: &str) -> Option<u32> {
    let (hour_part, minute_part) = raw.split_once(':')?;
    if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() != 2 {
        return None;
    }
    if !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;
    if hour > 23 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Format minutes since midnight as zero-padded `HH:mm`.
pub fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open interval overlap test: `[a_start, a_end)` vs `[b_start, b_end)`.
///
/// Two intervals are disjoint iff one ends at or before the other starts.
pub fn intervals_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Resolve a local date plus minutes-of-day in `tz` to an absolute UTC instant.
///
/// Returns `None` for a local time skipped by a DST transition. An ambiguous
/// local time (clocks rolled back) resolves to the earlier instant.
pub fn local_instant(date: NaiveDate, minutes: u32, tz: Tz) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)?;
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_hhmm_valid() {
        assert_eq!(parse_hhmm("09:30"), Some(570));
        assert_eq!(parse_hhmm("9:30"), Some(570));
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
    }

    #[test]
    fn test_parse_hhmm_invalid() {
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("12:5"), None); // minute must be two digits
        assert_eq!(parse_hhmm("12:345"), None);
        assert_eq!(parse_hhmm("noon"), None);
        assert_eq!(parse_hhmm("12-30"), None);
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("-1:30"), None);
    }

    #[test]
    fn test_format_hhmm_zero_pads() {
        assert_eq!(format_hhmm(570), "09:30");
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(1439), "23:59");
    }

    #[test]
    fn test_intervals_overlap_half_open() {
        // Touching endpoints do not overlap
        assert!(!intervals_overlap(540, 600, 600, 660));
        assert!(!intervals_overlap(600, 660, 540, 600));
        // Partial and full containment do
        assert!(intervals_overlap(540, 600, 570, 630));
        assert!(intervals_overlap(540, 660, 570, 600));
        assert!(intervals_overlap(570, 600, 540, 660));
        // Disjoint
        assert!(!intervals_overlap(540, 600, 720, 780));
    }

    #[test]
    fn test_local_instant_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let instant = local_instant(date, 9 * 60, chrono_tz::UTC).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-08T09:00:00+00:00");
    }

    #[test]
    fn test_local_instant_with_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        // 09:00 in Kolkata (UTC+5:30) is 03:30 UTC
        let instant = local_instant(date, 9 * 60, chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-06-10T03:30:00+00:00");
    }

    #[test]
    fn test_local_instant_dst_gap() {
        // US spring-forward 2024-03-10: 02:30 local never happens
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let instant = local_instant(date, 2 * 60 + 30, chrono_tz::America::Los_Angeles);
        assert!(instant.is_none());
    }
}
