//! Booking service - Core business logic for booking admission.
//!
//! This service handles:
//! - Transactional check-and-insert admission
//! - Equipment resolution and price calculation
//! - Cancellation (soft status flip)
//!
//! # Atomicity Guarantees
//!
//! Admission locks the venue row (`SELECT ... FOR UPDATE`), so two
//! concurrent proposals for the same venue serialize: the second one
//! re-reads the day's bookings after the first commits and sees its row.
//! The partial unique index on `(venue_id, date, start_time)` over
//! non-cancelled rows is the last-resort backstop; a violation there is
//! surfaced as `ConcurrentConflict`, never as a generic storage error.

use crate::{
    db::DbPool,
    error::AppError,
    models::booking::{Booking, CreateBookingRequest, EquipmentSelection, status},
    scheduling::{
        self, Interval,
        conflict::{self, Admission, ExistingBooking, RejectReason},
        pricing::{self, EquipmentLine},
    },
};
use chrono::NaiveTime;
use std::collections::HashMap;
use uuid::Uuid;

/// Name of the partial unique index guarding active slots.
const ACTIVE_SLOT_INDEX: &str = "bookings_active_slot_idx";

/// Admit a proposed booking, or reject it as conflicting.
///
/// # Process
///
/// 1. Validate the request (status, duration, interval within one day)
/// 2. Start database transaction and lock the venue row
/// 3. Re-read the day's non-cancelled bookings
/// 4. Run the pure overlap check
/// 5. Resolve equipment and compute the price
/// 6. Insert the booking and its equipment lines
/// 7. Commit (or rollback on rejection/error)
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `request` - The proposed booking
/// * `customer_rate` - Pricing policy applied to the venue's base rate
///
/// # Returns
///
/// The persisted booking record on admission.
///
/// # Errors
///
/// - `SlotTaken`: An existing booking starts at the same time
/// - `BookingOverlap`: The interval overlaps a booking with a different start
/// - `ConcurrentConflict`: A racing admission won the slot after our
///   check passed (unique-index violation on insert)
/// - `VenueNotFound`: Venue doesn't exist or is still a draft
/// - `EquipmentNotFound`: A selected equipment id isn't in the venue's catalog
/// - `InvalidRequest`: Bad status, duration, or equipment quantity
/// - `Database`: Database error occurred
pub async fn admit_booking(
    pool: &DbPool,
    request: CreateBookingRequest,
    customer_rate: impl Fn(i64) -> i64,
) -> Result<Booking, AppError> {
    // Only pending (customer checkout) and confirmed (owner manual
    // entry) may be requested at creation time
    if request.status != status::PENDING && request.status != status::CONFIRMED {
        return Err(AppError::InvalidRequest(format!(
            "Status must be '{}' or '{}'",
            status::PENDING,
            status::CONFIRMED
        )));
    }

    if request.duration_minutes <= 0 || request.duration_minutes % 30 != 0 {
        return Err(AppError::InvalidRequest(
            "Duration must be a positive multiple of 30 minutes".to_string(),
        ));
    }

    ensure_unique_equipment(&request.equipment)?;

    // The conflict check runs on whole minutes, and the stored value
    // must be exactly what was checked. A sub-minute start would be
    // checked truncated but persisted raw, so reject it here.
    let start_minutes = scheduling::exact_minutes_from_midnight(request.start_time).ok_or_else(
        || AppError::InvalidRequest("Start time must fall on a whole minute".to_string()),
    )?;

    let proposed = Interval::new(start_minutes, request.duration_minutes);

    // Bookings never cross midnight; the interval must fit in the day
    if proposed.end() > 24 * 60 {
        return Err(AppError::InvalidRequest(
            "Booking must end by midnight".to_string(),
        ));
    }

    // Start db transaction
    let mut tx = pool.begin().await?;

    // Lock the venue row. FOR UPDATE serializes concurrent admissions
    // for this venue: the losing request blocks here until the winner
    // commits, then sees the winner's booking in the re-read below.
    let hourly_rate_cents: i64 = sqlx::query_scalar(
        "SELECT hourly_rate_cents FROM venues WHERE id = $1 AND is_active = true FOR UPDATE",
    )
    .bind(request.venue_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::VenueNotFound)?;

    // Re-read the day's non-cancelled bookings inside the transaction
    let existing_rows = sqlx::query_as::<_, ExistingRow>(
        r#"
        SELECT id, start_time, duration_minutes
        FROM bookings
        WHERE venue_id = $1 AND date = $2 AND status <> 'cancelled'
        "#,
    )
    .bind(request.venue_id)
    .bind(request.date)
    .fetch_all(&mut *tx)
    .await?;

    let existing: Vec<ExistingBooking> = existing_rows
        .iter()
        .map(|row| ExistingBooking {
            id: row.id,
            interval: Interval::new(
                scheduling::minutes_from_midnight(row.start_time),
                row.duration_minutes,
            ),
        })
        .collect();

    // The admission decision itself is pure
    if let Admission::Reject(reason) = conflict::check_admission(proposed, &existing) {
        tx.rollback().await?;
        return Err(match reason {
            RejectReason::SlotTaken { .. } => AppError::SlotTaken,
            RejectReason::Overlap { .. } => AppError::BookingOverlap,
        });
    }

    // Resolve equipment selections against the venue's catalog
    let mut lines: Vec<EquipmentLine> = Vec::with_capacity(request.equipment.len());
    if !request.equipment.is_empty() {
        let ids: Vec<Uuid> = request.equipment.iter().map(|s| s.equipment_id).collect();
        let catalog: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT id, price_cents FROM equipment WHERE venue_id = $1 AND id = ANY($2)",
        )
        .bind(request.venue_id)
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?;

        let prices: HashMap<Uuid, i64> = catalog.into_iter().collect();

        for selection in &request.equipment {
            let price_cents = *prices
                .get(&selection.equipment_id)
                .ok_or(AppError::EquipmentNotFound)?;
            lines.push(EquipmentLine {
                price_cents,
                quantity: selection.quantity,
            });
        }
    }

    let breakdown = pricing::calculate_price(
        hourly_rate_cents,
        request.duration_minutes,
        &lines,
        customer_rate,
    )
    .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    // Insert the booking. A unique-index violation here means a racing
    // admission committed between our lock acquisition attempts.
    let insert_result = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (
            venue_id,
            date,
            start_time,
            duration_minutes,
            status,
            price_cents,
            customer_name,
            customer_email
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(request.venue_id)
    .bind(request.date)
    .bind(request.start_time)
    .bind(request.duration_minutes)
    .bind(&request.status)
    .bind(breakdown.total_cents)
    .bind(&request.customer_name)
    .bind(&request.customer_email)
    .fetch_one(&mut *tx)
    .await;

    let booking = match insert_result {
        Ok(booking) => booking,
        Err(e) => {
            tx.rollback().await?;
            return Err(map_insert_error(e));
        }
    };

    // Record equipment lines with price snapshots
    for (selection, line) in request.equipment.iter().zip(&lines) {
        sqlx::query(
            r#"
            INSERT INTO booking_equipment (booking_id, equipment_id, quantity, price_cents)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(booking.id)
        .bind(selection.equipment_id)
        .bind(selection.quantity)
        .bind(line.price_cents)
        .execute(&mut *tx)
        .await?;
    }

    // Commit all changes atomically
    tx.commit().await?;

    Ok(booking)
}

/// Cancel a booking (soft status flip).
///
/// Cancellation is idempotent: cancelling an already-cancelled booking
/// returns it unchanged. Completed bookings cannot be cancelled. The
/// flip releases the slot both for the pure conflict check (cancelled
/// rows are filtered out) and for the partial unique index (cancelled
/// rows leave it).
pub async fn cancel_booking(pool: &DbPool, booking_id: Uuid) -> Result<Booking, AppError> {
    let booking = get_booking_by_id(pool, booking_id)
        .await?
        .ok_or(AppError::BookingNotFound)?;

    match booking.status.as_str() {
        // Idempotent: return the already-cancelled booking unchanged
        status::CANCELLED => Ok(booking),
        status::COMPLETED => Err(AppError::InvalidRequest(
            "Completed bookings cannot be cancelled".to_string(),
        )),
        _ => {
            let cancelled = sqlx::query_as::<_, Booking>(
                r#"
                UPDATE bookings
                SET status = $2,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(booking_id)
            .bind(status::CANCELLED)
            .fetch_one(pool)
            .await?;

            Ok(cancelled)
        }
    }
}

/// Get booking by ID.
pub async fn get_booking_by_id(
    pool: &DbPool,
    booking_id: Uuid,
) -> Result<Option<Booking>, AppError> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_optional(pool)
        .await?;

    Ok(booking)
}

/// List a venue's bookings, optionally for a single date.
///
/// Returns bookings in schedule order (date, then start time).
pub async fn list_venue_bookings(
    pool: &DbPool,
    venue_id: Uuid,
    date: Option<chrono::NaiveDate>,
) -> Result<Vec<Booking>, AppError> {
    let bookings = match date {
        Some(date) => {
            sqlx::query_as::<_, Booking>(
                r#"
                SELECT * FROM bookings
                WHERE venue_id = $1 AND date = $2
                ORDER BY start_time
                "#,
            )
            .bind(venue_id)
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Booking>(
                r#"
                SELECT * FROM bookings
                WHERE venue_id = $1
                ORDER BY date, start_time
                "#,
            )
            .bind(venue_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(bookings)
}

/// Reject duplicate equipment selections.
///
/// Shared by admission and quoting so that a quoted total is always
/// bookable as-is. At admission, duplicates would also violate the
/// booking_equipment primary key.
pub fn ensure_unique_equipment(selections: &[EquipmentSelection]) -> Result<(), AppError> {
    let mut seen = std::collections::HashSet::new();
    for selection in selections {
        if !seen.insert(selection.equipment_id) {
            return Err(AppError::InvalidRequest(
                "Duplicate equipment selection".to_string(),
            ));
        }
    }
    Ok(())
}

/// Map an insert error, distinguishing the slot-index race from other
/// storage failures. Only the active-slot index maps to a rejection;
/// anything else stays a storage error.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.constraint() == Some(ACTIVE_SLOT_INDEX) {
            return AppError::ConcurrentConflict;
        }
    }
    AppError::Database(e)
}

/// Existing booking projection for the overlap check.
#[derive(Debug, sqlx::FromRow)]
struct ExistingRow {
    id: Uuid,
    start_time: NaiveTime,
    duration_minutes: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::PgPool;

    fn proposal(venue_id: Uuid) -> CreateBookingRequest {
        CreateBookingRequest {
            venue_id,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 60,
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            status: status::PENDING.to_string(),
            equipment: Vec::new(),
        }
    }

    /// Seed an owner key and an active venue, returning the venue id.
    async fn seed_venue(pool: &PgPool) -> Uuid {
        let api_key_id: Uuid = sqlx::query_scalar(
            "INSERT INTO api_keys (key_hash, owner_name) VALUES ($1, 'Test Owner') RETURNING id",
        )
        .bind(Uuid::new_v4().to_string())
        .fetch_one(pool)
        .await
        .unwrap();

        sqlx::query_scalar(
            r#"
            INSERT INTO venues (api_key_id, name, hourly_rate_cents, is_active)
            VALUES ($1, 'Center Court', 10000, true)
            RETURNING id
            "#,
        )
        .bind(api_key_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[test]
    fn duplicate_equipment_selections_are_rejected() {
        let id = Uuid::new_v4();
        let selections = vec![
            EquipmentSelection {
                equipment_id: id,
                quantity: 1,
            },
            EquipmentSelection {
                equipment_id: id,
                quantity: 2,
            },
        ];
        assert!(matches!(
            ensure_unique_equipment(&selections),
            Err(AppError::InvalidRequest(_))
        ));

        let distinct = vec![
            EquipmentSelection {
                equipment_id: Uuid::new_v4(),
                quantity: 1,
            },
            EquipmentSelection {
                equipment_id: Uuid::new_v4(),
                quantity: 1,
            },
        ];
        assert!(ensure_unique_equipment(&distinct).is_ok());
    }

    /// The race mapping matches on the index by name; if the migration
    /// renames it, the race would surface as a 500 instead of a 409.
    #[test]
    fn active_slot_index_name_matches_migration() {
        let migration = include_str!("../../migrations/20250101000003_create_bookings.sql");
        assert!(
            migration.contains(ACTIVE_SLOT_INDEX),
            "bookings migration no longer defines {ACTIVE_SLOT_INDEX}"
        );
    }

    #[tokio::test]
    async fn sub_minute_start_times_are_rejected() {
        // Validation runs before the first query, so a lazy pool with
        // no server behind it is enough here. A 10:00:30 start would
        // otherwise be checked as [10:00, 11:00) but stored with the
        // extra 30 seconds, overlapping a booking that starts at 11:00.
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        let mut request = proposal(Uuid::new_v4());
        request.start_time = NaiveTime::from_hms_opt(10, 0, 30).unwrap();

        let result = admit_booking(&pool, request, |rate| rate).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[sqlx::test]
    async fn concurrent_admissions_admit_exactly_one(pool: PgPool) {
        let venue_id = seed_venue(&pool).await;

        let (first, second) = tokio::join!(
            admit_booking(&pool, proposal(venue_id), |rate| rate),
            admit_booking(&pool, proposal(venue_id), |rate| rate),
        );

        let admitted = usize::from(first.is_ok()) + usize::from(second.is_ok());
        assert_eq!(admitted, 1, "exactly one racing admission may win");

        // The loser either saw the winner's row after the lock released
        // or, without the lock, would have tripped the partial index
        let rejected = if first.is_ok() { second } else { first };
        assert!(matches!(
            rejected,
            Err(AppError::SlotTaken | AppError::ConcurrentConflict)
        ));
    }

    #[sqlx::test]
    async fn slot_index_violation_maps_to_concurrent_conflict(pool: PgPool) {
        let venue_id = seed_venue(&pool).await;
        admit_booking(&pool, proposal(venue_id), |rate| rate)
            .await
            .unwrap();

        // Duplicate the admitted slot directly, bypassing the
        // in-transaction check, to exercise the path a lost race takes
        let err = sqlx::query(
            r#"
            INSERT INTO bookings (
                venue_id, date, start_time, duration_minutes,
                status, price_cents, customer_name, customer_email
            )
            VALUES ($1, $2, $3, $4, 'pending', 0, 'Grace Hopper', 'grace@example.com')
            "#,
        )
        .bind(venue_id)
        .bind(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
        .bind(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        .bind(60)
        .execute(&pool)
        .await
        .unwrap_err();

        assert!(matches!(map_insert_error(err), AppError::ConcurrentConflict));
    }

    #[sqlx::test]
    async fn cancelled_booking_releases_the_slot(pool: PgPool) {
        let venue_id = seed_venue(&pool).await;
        let booking = admit_booking(&pool, proposal(venue_id), |rate| rate)
            .await
            .unwrap();

        cancel_booking(&pool, booking.id).await.unwrap();

        // The same slot is bookable again once the holder is cancelled
        let rebooked = admit_booking(&pool, proposal(venue_id), |rate| rate)
            .await
            .unwrap();
        assert_ne!(rebooked.id, booking.id);
    }
}
