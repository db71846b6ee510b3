// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Availability and booking flow tests against the full router.
//!
//! These use a zero-hour cutoff and a date a few days out so the assertions
//! hold regardless of when the suite runs.

use axum::http::StatusCode;
use chrono::{Days, Utc};
use serde_json::json;
use tower::ServiceExt;

mod common;

/// Every day 09:00-10:00, UTC, no cutoff.
fn daily_schedule_body() -> serde_json::Value {
    let ranges = || json!([{"start_time": "09:00", "end_time": "10:00"}]);
    json!({
        "week": {
            "monday": ranges(), "tuesday": ranges(), "wednesday": ranges(),
            "thursday": ranges(), "friday": ranges(), "saturday": ranges(),
            "sunday": ranges()
        },
        "booking_cutoff_hours": 0
    })
}

/// A date safely inside the default window.
fn target_date() -> String {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(3))
        .unwrap()
        .to_string()
}

async fn put_daily_schedule(app: &axum::Router, coach: &str) {
    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            &format!("/api/coaches/{coach}/schedule"),
            daily_schedule_body(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_availability_lists_daily_slots() {
    let (app, _state) = common::create_test_app();
    put_daily_schedule(&app, "coach-1").await;

    let response = app
        .oneshot(common::get_request(
            "/api/coaches/coach-1/availability?days=7",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["coach_id"], "coach-1");
    assert_eq!(body["window_days"], 7);

    let slots = body["slots"].as_array().unwrap();
    // One slot per day; today's 09:00 may already be in the past
    assert!(slots.len() >= 7, "expected at least 7 slots, got {}", slots.len());
    assert!(slots
        .iter()
        .any(|s| s["date"] == target_date().as_str() && s["start_time"] == "09:00"));
}

#[tokio::test]
async fn test_availability_unknown_coach_is_404() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::get_request("/api/coaches/ghost/availability"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_window_capped() {
    let (app, _state) = common::create_test_app();
    put_daily_schedule(&app, "coach-1").await;

    let response = app
        .oneshot(common::get_request(
            "/api/coaches/coach-1/availability?days=365",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_flow_consumes_slot() {
    let (app, _state) = common::create_test_app();
    put_daily_schedule(&app, "coach-1").await;
    let date = target_date();

    // Book the slot
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/coaches/coach-1/bookings",
            json!({
                "client_id": "client-9",
                "date": date,
                "start_time": "09:00",
                "end_time": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking = common::body_json(response).await;
    assert_eq!(booking["coach_id"], "coach-1");
    assert_eq!(booking["client_id"], "client-9");

    // The booked slot is no longer offered
    let response = app
        .clone()
        .oneshot(common::get_request(
            "/api/coaches/coach-1/availability?days=7",
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(!body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["date"] == date.as_str()));

    // Booking it again conflicts
    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/coaches/coach-1/bookings",
            json!({
                "client_id": "client-10",
                "date": date,
                "start_time": "09:00",
                "end_time": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booking_outside_schedule_conflicts() {
    let (app, _state) = common::create_test_app();
    put_daily_schedule(&app, "coach-1").await;

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/coaches/coach-1/bookings",
            json!({
                "client_id": "client-9",
                "date": target_date(),
                "start_time": "15:00",
                "end_time": "16:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booking_requires_client_id() {
    let (app, _state) = common::create_test_app();
    put_daily_schedule(&app, "coach-1").await;

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/coaches/coach-1/bookings",
            json!({
                "client_id": "  ",
                "date": target_date(),
                "start_time": "09:00",
                "end_time": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_override_removes_whole_day_from_availability() {
    let (app, _state) = common::create_test_app();
    put_daily_schedule(&app, "coach-1").await;
    let date = target_date();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/coaches/coach-1/overrides",
            json!({"date": date, "reason": "club finals moved"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(common::get_request(
            "/api/coaches/coach-1/availability?days=7",
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(!body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["date"] == date.as_str()));

    // Booking the overridden day is refused
    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/coaches/coach-1/bookings",
            json!({
                "client_id": "client-9",
                "date": date,
                "start_time": "09:00",
                "end_time": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::get_request("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}
