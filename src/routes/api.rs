// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! API routes for schedules, availability, overrides and bookings.

use crate::error::{AppError, Result};
use crate::models::booking::{BookableSlot, BookedInterval, Booking, NewBooking};
use crate::models::day_override::{EmergencyOverride, OverrideOptions};
use crate::models::schedule::{TimeRange, Weekday, WeeklySchedule};
use crate::services::resolve_slots;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/coaches/{coach_id}/schedule",
            put(put_schedule).get(get_schedule),
        )
        .route("/api/coaches/{coach_id}/availability", get(get_availability))
        .route(
            "/api/coaches/{coach_id}/overrides",
            post(post_override).get(get_overrides),
        )
        .route("/api/coaches/{coach_id}/bookings", post(post_booking))
}

/// Parse a schedule's stored timezone. Only validated schedules are stored,
/// so a failure here is an internal inconsistency, not a caller mistake.
fn stored_tz(schedule: &WeeklySchedule) -> Result<Tz> {
    schedule.timezone.parse().map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "stored schedule has unknown timezone {:?}",
            schedule.timezone
        ))
    })
}

// ─── Schedule ────────────────────────────────────────────────

/// Schedule upsert body. Omitted policies fall back to their defaults.
#[derive(Deserialize)]
struct ScheduleRequest {
    #[serde(default)]
    week: BTreeMap<Weekday, Vec<TimeRange>>,
    timezone: Option<String>,
    default_duration_minutes: Option<u32>,
    booking_cutoff_hours: Option<u32>,
    break_between_slots_minutes: Option<u32>,
}

/// Create or replace the coach's weekly schedule.
///
/// Validation runs before the write; a conflicting schedule returns 409
/// naming the offending day and persists nothing.
async fn put_schedule(
    State(state): State<Arc<AppState>>,
    Path(coach_id): Path<String>,
    Json(body): Json<ScheduleRequest>,
) -> Result<Json<WeeklySchedule>> {
    let mut schedule = WeeklySchedule::new(&coach_id);
    schedule.week = body.week;
    if let Some(timezone) = body.timezone {
        schedule.timezone = timezone;
    }
    if let Some(minutes) = body.default_duration_minutes {
        schedule.default_duration_minutes = minutes;
    }
    if let Some(hours) = body.booking_cutoff_hours {
        schedule.booking_cutoff_hours = hours;
    }
    if let Some(minutes) = body.break_between_slots_minutes {
        schedule.break_between_slots_minutes = minutes;
    }

    state.store.upsert_schedule(schedule.clone())?;
    Ok(Json(schedule))
}

/// Get the coach's current weekly schedule.
async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(coach_id): Path<String>,
) -> Result<Json<WeeklySchedule>> {
    let schedule = state
        .store
        .get_schedule(&coach_id)
        .ok_or_else(|| AppError::NotFound(format!("No schedule for coach {coach_id}")))?;
    Ok(Json(schedule))
}

// ─── Availability ────────────────────────────────────────────

#[derive(Deserialize)]
struct AvailabilityQuery {
    /// Look-ahead window in days; defaults to the configured window
    days: Option<u32>,
}

/// Availability response: the booking UI's available-times contract.
#[derive(Serialize)]
struct AvailabilityResponse {
    coach_id: String,
    window_days: u32,
    slots: Vec<BookableSlot>,
}

/// Resolve the coach's bookable slots over the look-ahead window.
async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(coach_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>> {
    let window_days = query.days.unwrap_or(state.config.default_window_days);
    if window_days > state.config.max_window_days {
        return Err(AppError::BadRequest(format!(
            "Window too large: {} days (max {})",
            window_days, state.config.max_window_days
        )));
    }

    let schedule = state
        .store
        .get_schedule(&coach_id)
        .ok_or_else(|| AppError::NotFound(format!("No schedule for coach {coach_id}")))?;

    let now = Utc::now();
    let tz = stored_tz(&schedule)?;
    let first_date = now.with_timezone(&tz).date_naive();
    let last_date = first_date
        .checked_add_days(Days::new(window_days as u64))
        .unwrap_or(first_date);

    let bookings: Vec<BookedInterval> = state
        .store
        .list_bookings(&coach_id, first_date, last_date)
        .into_iter()
        .map(|b| b.interval())
        .collect();
    let override_dates: Vec<NaiveDate> = state
        .store
        .list_overrides(&coach_id, first_date, last_date)
        .into_iter()
        .map(|o| o.date)
        .collect();

    let slots = resolve_slots(&schedule, now, window_days, &bookings, &override_dates)?;

    Ok(Json(AvailabilityResponse {
        coach_id,
        window_days,
        slots,
    }))
}

// ─── Emergency Overrides ─────────────────────────────────────

#[derive(Deserialize)]
struct OverrideRequest {
    date: NaiveDate,
    reason: String,
    #[serde(default)]
    options: OverrideOptions,
}

/// Cancel a whole day for the coach.
///
/// Recording the override never touches existing bookings; the notification
/// collaborator reacts to the advertised options.
async fn post_override(
    State(state): State<Arc<AppState>>,
    Path(coach_id): Path<String>,
    Json(body): Json<OverrideRequest>,
) -> Result<(StatusCode, Json<EmergencyOverride>)> {
    if body.reason.trim().is_empty() {
        return Err(AppError::BadRequest("A reason is required".to_string()));
    }

    let day_override = EmergencyOverride::new(&coach_id, body.date, &body.reason, body.options);
    state.store.create_override(day_override.clone())?;
    Ok((StatusCode::CREATED, Json(day_override)))
}

#[derive(Deserialize)]
struct OverrideRangeQuery {
    /// Start date (inclusive, ISO 8601); defaults to today
    from: Option<NaiveDate>,
    /// End date (inclusive); defaults to `from` plus the configured window
    to: Option<NaiveDate>,
}

/// List overrides intersecting a date range.
async fn get_overrides(
    State(state): State<Arc<AppState>>,
    Path(coach_id): Path<String>,
    Query(query): Query<OverrideRangeQuery>,
) -> Result<Json<Vec<EmergencyOverride>>> {
    let from = query.from.unwrap_or_else(|| Utc::now().date_naive());
    let to = query.to.unwrap_or_else(|| {
        from.checked_add_days(Days::new(state.config.default_window_days as u64))
            .unwrap_or(from)
    });
    if to < from {
        return Err(AppError::BadRequest(
            "'to' must not be before 'from'".to_string(),
        ));
    }

    Ok(Json(state.store.list_overrides(&coach_id, from, to)))
}

// ─── Bookings ────────────────────────────────────────────────

#[derive(Deserialize)]
struct BookingRequest {
    client_id: String,
    date: NaiveDate,
    start_time: String,
    end_time: String,
}

/// Book a resolved slot.
///
/// The store re-checks availability at commit time, so a slot taken between
/// the availability query and this call is rejected with a conflict.
async fn post_booking(
    State(state): State<Arc<AppState>>,
    Path(coach_id): Path<String>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    if body.client_id.trim().is_empty() {
        return Err(AppError::BadRequest("client_id is required".to_string()));
    }

    let booking = state.store.create_booking(
        NewBooking {
            coach_id,
            client_id: body.client_id,
            date: body.date,
            start_time: body.start_time,
            end_time: body.end_time,
        },
        Utc::now(),
    )?;
    Ok((StatusCode::CREATED, Json(booking)))
}
