//! Equipment catalog models.
//!
//! Venues rent out equipment (rackets, balls, bibs) alongside the court
//! itself. Catalog prices feed the price calculator; bookings snapshot
//! the price per line so later catalog edits never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an equipment record from the database.
///
/// # Database Table
///
/// Maps to the `equipment` table. Each item belongs to exactly one venue.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Equipment {
    /// Unique identifier for this item
    pub id: Uuid,

    /// Venue whose catalog this item belongs to
    pub venue_id: Uuid,

    /// Display name ("Racket", "Ball basket")
    pub name: String,

    /// Rental price per unit in cents
    ///
    /// Must be >= 0 (enforced by database CHECK constraint).
    pub price_cents: i64,

    /// Timestamp when the item was added
    pub created_at: DateTime<Utc>,
}

/// Request body for adding an equipment item to a venue's catalog.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Racket",
///   "price_cents": 2000
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateEquipmentRequest {
    /// Display name for the item
    pub name: String,

    /// Rental price per unit in cents
    pub price_cents: i64,
}
