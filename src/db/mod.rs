// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! In-memory document store with typed operations.
//!
//! Provides high-level operations for:
//! - Weekly schedules (one per coach)
//! - Emergency overrides (one per coach and date)
//! - Bookings (keyed by coach, date and start time)
//!
//! Writes per coach are serialized by the map keys themselves: a schedule save
//! replaces the single document for that coach, and a booking commit is a
//! conditional insert that fails if the slot key is already occupied.

use crate::error::AppError;
use crate::models::{Booking, BookedInterval, EmergencyOverride, NewBooking, WeeklySchedule};
use crate::services::resolve_slots;
use crate::services::schedule_rules::{validate_schedule, SchedulingError};
use crate::time_utils::{format_hhmm, parse_hhmm};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Key for one committed booking: `(coach_id, date, start minutes)`.
type BookingKey = (String, NaiveDate, u32);

#[derive(Default)]
struct StoreInner {
    schedules: DashMap<String, WeeklySchedule>,
    overrides: DashMap<(String, NaiveDate), EmergencyOverride>,
    bookings: DashMap<BookingKey, Booking>,
}

/// Shared in-memory store.
#[derive(Clone, Default)]
pub struct ScheduleStore {
    inner: Arc<StoreInner>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Schedule Operations ─────────────────────────────────────

    /// Validate and save a coach's schedule, replacing any existing one.
    ///
    /// Validation runs before the write; an invalid schedule is never
    /// persisted.
    pub fn upsert_schedule(&self, schedule: WeeklySchedule) -> Result<(), AppError> {
        validate_schedule(&schedule)?;
        tracing::info!(coach = %schedule.coach_id, "Saving weekly schedule");
        self.inner
            .schedules
            .insert(schedule.coach_id.clone(), schedule);
        Ok(())
    }

    /// Get a coach's schedule, if one was configured.
    pub fn get_schedule(&self, coach_id: &str) -> Option<WeeklySchedule> {
        self.inner.schedules.get(coach_id).map(|s| s.clone())
    }

    // ─── Override Operations ─────────────────────────────────────

    /// Record a full-day override. Fails if one already exists for the same
    /// coach and date; no partial write.
    pub fn create_override(&self, day_override: EmergencyOverride) -> Result<(), AppError> {
        let key = (day_override.coach_id.clone(), day_override.date);
        match self.inner.overrides.entry(key) {
            Entry::Occupied(_) => Err(SchedulingError::DuplicateOverride {
                date: day_override.date,
            }
            .into()),
            Entry::Vacant(entry) => {
                tracing::info!(
                    coach = %day_override.coach_id,
                    date = %day_override.date,
                    "Emergency override created"
                );
                entry.insert(day_override);
                Ok(())
            }
        }
    }

    /// All overrides for a coach with a date in `[from, to]`, ascending.
    pub fn list_overrides(
        &self,
        coach_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<EmergencyOverride> {
        let mut found: Vec<EmergencyOverride> = self
            .inner
            .overrides
            .iter()
            .filter(|entry| {
                let (coach, date) = entry.key();
                coach == coach_id && (from..=to).contains(date)
            })
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|o| o.date);
        found
    }

    // ─── Booking Operations ──────────────────────────────────────

    /// Commit a booking against a currently-available slot.
    ///
    /// Availability is re-checked here, at commit time: the requested interval
    /// must be a slot the resolver still offers given the coach's schedule,
    /// overrides and existing bookings as of `now`. The conditional insert on
    /// the slot key rejects a slot concurrently taken by another booking.
    pub fn create_booking(
        &self,
        new: NewBooking,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let schedule = self
            .get_schedule(&new.coach_id)
            .ok_or_else(|| AppError::NotFound(format!("No schedule for coach {}", new.coach_id)))?;

        let start = parse_hhmm(&new.start_time).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid start_time {:?}, expected HH:mm", new.start_time))
        })?;
        let end = parse_hhmm(&new.end_time).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid end_time {:?}, expected HH:mm", new.end_time))
        })?;

        // The stored timezone was validated on save.
        let tz: Tz = schedule.timezone.parse().map_err(|_| {
            AppError::Internal(anyhow::anyhow!(
                "stored schedule has unknown timezone {:?}",
                schedule.timezone
            ))
        })?;
        let today = now.with_timezone(&tz).date_naive();
        let lead_days = new.date.signed_duration_since(today).num_days();
        if lead_days < 0 {
            return Err(AppError::BadRequest("Cannot book a past date".to_string()));
        }

        let day_bookings: Vec<BookedInterval> = self.list_bookings(&new.coach_id, new.date, new.date)
            .into_iter()
            .map(|b| b.interval())
            .collect();
        let override_dates: Vec<NaiveDate> = self
            .list_overrides(&new.coach_id, new.date, new.date)
            .into_iter()
            .map(|o| o.date)
            .collect();

        let offered = resolve_slots(
            &schedule,
            now,
            lead_days as u32,
            &day_bookings,
            &override_dates,
        )?;
        // Slot times come back zero-padded from the resolver; compare the
        // normalized forms so "9:00" in a request still matches.
        let matches_offered = offered.iter().any(|slot| {
            slot.date == new.date
                && slot.start_time == format_hhmm(start)
                && slot.end_time == format_hhmm(end)
        });
        if !matches_offered {
            return Err(AppError::Conflict(
                "Requested slot is not available".to_string(),
            ));
        }

        let booking = Booking {
            coach_id: new.coach_id.clone(),
            client_id: new.client_id,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            created_at: now,
        };

        let key = (new.coach_id, new.date, start);
        match self.inner.bookings.entry(key) {
            Entry::Occupied(_) => Err(AppError::Conflict(
                "Slot was just booked by someone else".to_string(),
            )),
            Entry::Vacant(entry) => {
                tracing::info!(
                    coach = %booking.coach_id,
                    date = %booking.date,
                    start = %booking.start_time,
                    "Booking committed"
                );
                entry.insert(booking.clone());
                Ok(booking)
            }
        }
    }

    /// All bookings for a coach with a date in `[from, to]`, ascending by
    /// date and start time.
    pub fn list_bookings(&self, coach_id: &str, from: NaiveDate, to: NaiveDate) -> Vec<Booking> {
        let mut found: Vec<Booking> = self
            .inner
            .bookings
            .iter()
            .filter(|entry| {
                let (coach, date, _) = entry.key();
                coach == coach_id && (from..=to).contains(date)
            })
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        found
    }
}
