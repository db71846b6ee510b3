// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Emergency full-day unavailability overrides.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Remediation options advertised to clients whose bookings fall on an
/// overridden date. These flags never mutate existing bookings themselves;
/// the notification collaborator reacts to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideOptions {
    #[serde(default = "default_true")]
    pub refund: bool,
    #[serde(default = "default_true")]
    pub reschedule: bool,
    #[serde(default = "default_true")]
    pub cancel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OverrideOptions {
    fn default() -> Self {
        Self {
            refund: true,
            reschedule: true,
            cancel: true,
        }
    }
}

/// A full-day cancellation for one coach on one calendar date.
///
/// At most one override per `(coach, date)`; the store enforces uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyOverride {
    pub coach_id: String,
    pub date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub options: OverrideOptions,
    pub created_at: DateTime<Utc>,
}

impl EmergencyOverride {
    pub fn new(coach_id: &str, date: NaiveDate, reason: &str, options: OverrideOptions) -> Self {
        Self {
            coach_id: coach_id.to_string(),
            date,
            reason: reason.to_string(),
            options,
            created_at: Utc::now(),
        }
    }
}
