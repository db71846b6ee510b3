// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Services module - scheduling business logic.

pub mod availability;
pub mod schedule_rules;

pub use availability::resolve_slots;
pub use schedule_rules::{is_time_available, validate_schedule, SchedulingError};
