//! Availability service - fetches one venue-day's schedule rows and runs
//! the pure slot generator over them.
//!
//! The computation itself lives in [`crate::scheduling::slots`]; this
//! service only resolves `(venue, date)` into the generator's inputs:
//! the weekday's operating-hours row, the date's blocked status, and the
//! day's pending/confirmed bookings.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{booking::SlotResponse, hours::OperatingHours},
    scheduling::{self, Interval, slots},
};

/// Generate the bookable slots for a venue on a given date.
///
/// # Process
///
/// 1. Verify the venue exists and is active
/// 2. Load the operating-hours row for the date's weekday (if any)
/// 3. Check whether the date is blocked
/// 4. Load the date's pending/confirmed bookings
/// 5. Run the pure slot generator
///
/// # Returns
///
/// The ordered slot sequence. An empty result means the venue is closed
/// that day (no hours row, marked closed, or blocked date) — this is a
/// normal outcome, not an error.
///
/// # Errors
///
/// - `VenueNotFound`: Venue doesn't exist or is still a draft
/// - `Database`: Database error occurred
pub async fn generate_slots_for_date(
    pool: &DbPool,
    venue_id: Uuid,
    date: NaiveDate,
    slot_minutes: i32,
) -> Result<Vec<SlotResponse>, AppError> {
    // Only live venues serve availability
    let venue_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = $1 AND is_active = true)")
            .bind(venue_id)
            .fetch_one(pool)
            .await?;

    if !venue_exists {
        return Err(AppError::VenueNotFound);
    }

    // 0 = Sunday .. 6 = Saturday, matching the stored day_of_week convention
    let day_of_week = date.weekday().num_days_from_sunday() as i16;

    let hours = sqlx::query_as::<_, OperatingHours>(
        "SELECT * FROM operating_hours WHERE venue_id = $1 AND day_of_week = $2",
    )
    .bind(venue_id)
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    let date_blocked: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM blocked_dates WHERE venue_id = $1 AND date = $2)",
    )
    .bind(venue_id)
    .bind(date)
    .fetch_one(pool)
    .await?;

    // Pending bookings hold their slot too; only cancellation releases it
    let bookings = sqlx::query_as::<_, BookedInterval>(
        r#"
        SELECT start_time, duration_minutes
        FROM bookings
        WHERE venue_id = $1 AND date = $2 AND status IN ('pending', 'confirmed')
        "#,
    )
    .bind(venue_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    let intervals: Vec<Interval> = bookings
        .iter()
        .map(|b| {
            Interval::new(
                scheduling::minutes_from_midnight(b.start_time),
                b.duration_minutes,
            )
        })
        .collect();

    let generated = slots::generate_slots(
        hours.as_ref().map(OperatingHours::to_day_hours),
        date_blocked,
        &intervals,
        slot_minutes,
    );

    // Slot starts always fall inside one day, so the conversion back to
    // wall clock cannot fail; filter_map keeps the signature honest.
    Ok(generated
        .into_iter()
        .filter_map(|slot| {
            scheduling::time_from_minutes(slot.start).map(|start_time| SlotResponse {
                start_time,
                available: slot.available,
            })
        })
        .collect())
}

/// Minimal booking projection used for interval construction.
#[derive(Debug, sqlx::FromRow)]
struct BookedInterval {
    start_time: chrono::NaiveTime,
    duration_minutes: i32,
}
