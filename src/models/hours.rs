//! Operating hours models.
//!
//! One row per `(venue, day_of_week)` with day_of_week 0 = Sunday through
//! 6 = Saturday. When `is_closed` is true the open/close times are kept
//! but ignored by slot generation.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduling::{self, slots::DayHours};

/// Represents an operating-hours record from the database.
///
/// # Database Table
///
/// Maps to the `operating_hours` table. A UNIQUE constraint on
/// `(venue_id, day_of_week)` guarantees at most one row per weekday.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct OperatingHours {
    /// Unique identifier for this row
    pub id: Uuid,

    /// Venue this schedule entry belongs to
    pub venue_id: Uuid,

    /// Day of week: 0 = Sunday .. 6 = Saturday
    pub day_of_week: i16,

    /// Opening wall-clock time (venue-local)
    pub open_time: NaiveTime,

    /// Closing wall-clock time (venue-local, exclusive)
    pub close_time: NaiveTime,

    /// When true the venue is closed this weekday regardless of times
    pub is_closed: bool,
}

impl OperatingHours {
    /// Convert to the minutes-since-midnight form the scheduling core
    /// operates on.
    pub fn to_day_hours(&self) -> DayHours {
        DayHours {
            open: scheduling::minutes_from_midnight(self.open_time),
            close: scheduling::minutes_from_midnight(self.close_time),
            is_closed: self.is_closed,
        }
    }
}

/// One weekday entry in a set-hours request.
///
/// # JSON Example
///
/// ```json
/// {
///   "day_of_week": 1,
///   "open_time": "09:00:00",
///   "close_time": "22:00:00",
///   "is_closed": false
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct DayHoursEntry {
    /// Day of week: 0 = Sunday .. 6 = Saturday
    pub day_of_week: i16,

    /// Opening time (venue-local wall clock)
    pub open_time: NaiveTime,

    /// Closing time (venue-local wall clock, exclusive)
    pub close_time: NaiveTime,

    /// Closed flag for this weekday
    #[serde(default)]
    pub is_closed: bool,
}

/// Request body for replacing a venue's weekly schedule.
///
/// The whole week is submitted at once; existing rows for the listed
/// weekdays are upserted. Weekdays not listed keep their current rows.
#[derive(Debug, Deserialize)]
pub struct SetHoursRequest {
    pub days: Vec<DayHoursEntry>,
}
