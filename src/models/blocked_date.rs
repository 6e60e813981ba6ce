//! Blocked date models.
//!
//! A blocked date is a full-day closure exception (holiday, maintenance).
//! A matching row overrides the weekday's operating hours entirely: slot
//! generation returns nothing for that date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a blocked-date record from the database.
///
/// # Database Table
///
/// Maps to the `blocked_dates` table. A UNIQUE constraint on
/// `(venue_id, date)` prevents duplicate blocks for the same day.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BlockedDate {
    /// Unique identifier for this row
    pub id: Uuid,

    /// Venue this block applies to
    pub venue_id: Uuid,

    /// The calendar date being blocked (venue-local)
    pub date: NaiveDate,

    /// Optional human-readable reason ("public holiday", "resurfacing")
    pub reason: Option<String>,

    /// Timestamp when the block was created
    pub created_at: DateTime<Utc>,
}

/// Request body for blocking a date.
///
/// # JSON Example
///
/// ```json
/// {
///   "date": "2026-01-01",
///   "reason": "New Year's Day"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateBlockedDateRequest {
    /// Date to block
    pub date: NaiveDate,

    /// Optional reason shown to the owner
    pub reason: Option<String>,
}
