// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Data models for the application.

pub mod booking;
pub mod day_override;
pub mod schedule;

pub use booking::{BookableSlot, BookedInterval, Booking, NewBooking};
pub use day_override::{EmergencyOverride, OverrideOptions};
pub use schedule::{TimeRange, Weekday, WeeklySchedule};
