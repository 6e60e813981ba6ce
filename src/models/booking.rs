//! Booking data models and API request/response types.
//!
//! This module defines:
//! - `Booking`: Database entity representing a booking
//! - `CreateBookingRequest`: Request body for the admission endpoint
//! - `BookingResponse`: Response body returned to clients
//! - `SlotResponse`: One entry of the availability endpoint's output

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking status constants.
///
/// Stored as TEXT with a CHECK constraint. `cancelled` bookings are
/// soft state: the row stays, but it is excluded from conflict checks
/// and releases its slot in the partial unique index.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const CONFIRMED: &str = "confirmed";
    pub const CANCELLED: &str = "cancelled";
    pub const COMPLETED: &str = "completed";
}

/// Represents a booking record from the database.
///
/// # Database Table
///
/// Maps to the `bookings` table. Each booking:
/// - Occupies the half-open interval `[start_time, start_time + duration)`
///   on one venue-local date
/// - Stores its price in cents, computed at admission time
/// - Tracks status (pending, confirmed, cancelled, completed)
///
/// # Conflict Invariant
///
/// For a given venue and date, no two non-cancelled bookings may have
/// overlapping intervals. This is enforced at admission inside a
/// transaction, with a partial unique index on
/// `(venue_id, date, start_time)` as the last-resort race defense.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Booking {
    /// Unique identifier for this booking
    pub id: Uuid,

    /// Venue being booked
    pub venue_id: Uuid,

    /// Calendar date of the booking (venue-local)
    pub date: NaiveDate,

    /// Start wall-clock time (venue-local)
    pub start_time: NaiveTime,

    /// Duration in minutes (positive, half-hour granularity)
    pub duration_minutes: i32,

    /// Booking status
    ///
    /// - "pending": Awaiting confirmation (customer checkout flow)
    /// - "confirmed": Confirmed by the owner or payment completion
    /// - "cancelled": Released; excluded from conflict checks
    /// - "completed": Past booking that took place
    pub status: String,

    /// Total price in cents, frozen at admission time
    pub price_cents: i64,

    /// Customer display name
    pub customer_name: String,

    /// Customer contact e-mail
    pub customer_email: String,

    /// When the booking was created
    pub created_at: DateTime<Utc>,

    /// When the booking was last updated (e.g. status flip)
    pub updated_at: DateTime<Utc>,
}

/// One equipment selection on a booking or quote request.
#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentSelection {
    /// Catalog equipment id (must belong to the booked venue)
    pub equipment_id: Uuid,

    /// How many units to rent (must be positive)
    pub quantity: i32,
}

/// Request body for creating (admitting) a booking.
///
/// # JSON Example
///
/// ```json
/// {
///   "venue_id": "550e8400-e29b-41d4-a716-446655440000",
///   "date": "2026-03-14",
///   "start_time": "10:00:00",
///   "duration_minutes": 90,
///   "customer_name": "Ada Lovelace",
///   "customer_email": "ada@example.com",
///   "status": "confirmed",
///   "equipment": [
///     { "equipment_id": "660e8400-...", "quantity": 2 }
///   ]
/// }
/// ```
///
/// # Validation
///
/// - `duration_minutes`: positive multiple of 30
/// - `status`: only "pending" (customer checkout) or "confirmed"
///   (owner manual entry) may be requested
/// - `equipment`: every id must belong to the venue
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Venue to book
    pub venue_id: Uuid,

    /// Booking date (venue-local)
    pub date: NaiveDate,

    /// Start time (venue-local wall clock)
    pub start_time: NaiveTime,

    /// Duration in minutes
    pub duration_minutes: i32,

    /// Customer display name
    pub customer_name: String,

    /// Customer contact e-mail
    pub customer_email: String,

    /// Initial status (defaults to "pending")
    #[serde(default = "default_status")]
    pub status: String,

    /// Equipment selections (defaults to none)
    #[serde(default)]
    pub equipment: Vec<EquipmentSelection>,
}

/// Default status when the request omits one.
fn default_status() -> String {
    status::PENDING.to_string()
}

/// Response body for booking endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "venue_id": "550e8400-...",
///   "date": "2026-03-14",
///   "start_time": "10:00:00",
///   "duration_minutes": 90,
///   "status": "confirmed",
///   "price_cents": 19000,
///   "customer_name": "Ada Lovelace",
///   "created_at": "2026-03-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: String,
    pub price_cents: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub created_at: DateTime<Utc>,
}

/// Convert database Booking to API BookingResponse.
impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            venue_id: booking.venue_id,
            date: booking.date,
            start_time: booking.start_time,
            duration_minutes: booking.duration_minutes,
            status: booking.status,
            price_cents: booking.price_cents,
            customer_name: booking.customer_name,
            customer_email: booking.customer_email,
            created_at: booking.created_at,
        }
    }
}

/// One entry of the availability endpoint's output.
///
/// # JSON Example
///
/// ```json
/// { "start_time": "10:00:00", "available": false }
/// ```
#[derive(Debug, Serialize)]
pub struct SlotResponse {
    /// Slot start (venue-local wall clock)
    pub start_time: NaiveTime,

    /// Whether the slot can still be booked
    pub available: bool,
}
