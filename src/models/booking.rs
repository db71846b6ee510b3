// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Booking records and the derived bookable-slot read model.

use crate::models::schedule::Weekday;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An already-reserved interval, input to availability resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// A concrete, dated instantiation of one active schedule range.
///
/// Derived by the availability resolver, never persisted. Bookings reference
/// slots by value, not by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookableSlot {
    pub day: Weekday,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// Stored booking record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub coach_id: String,
    pub client_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The interval this booking occupies.
    pub fn interval(&self) -> BookedInterval {
        BookedInterval {
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// Request to commit a booking against a resolved slot.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub coach_id: String,
    pub client_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}
