// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Pitchside: coach availability and booking slots for a cricket-coaching
//! marketplace.
//!
//! This crate provides the backend API for managing each coach's weekly
//! recurring schedule, resolving it into concrete bookable time slots, and
//! recording full-day emergency overrides.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ScheduleStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ScheduleStore,
}
