//! Price quote request/response types.
//!
//! A quote runs the same price calculation a booking admission would,
//! but persists nothing. Used by checkout UIs to show the breakdown
//! before committing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::booking::EquipmentSelection;
use crate::scheduling::pricing::PriceBreakdown;

/// Request body for a price quote.
///
/// # JSON Example
///
/// ```json
/// {
///   "venue_id": "550e8400-e29b-41d4-a716-446655440000",
///   "duration_minutes": 90,
///   "equipment": [
///     { "equipment_id": "660e8400-...", "quantity": 2 }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// Venue whose rate and catalog to quote against
    pub venue_id: Uuid,

    /// Requested duration in minutes (positive multiple of 30)
    pub duration_minutes: i32,

    /// Equipment selections (defaults to none)
    #[serde(default)]
    pub equipment: Vec<EquipmentSelection>,
}

/// Response body with the price breakdown.
///
/// # JSON Example
///
/// ```json
/// {
///   "venue_subtotal_cents": 15000,
///   "equipment_subtotal_cents": 4000,
///   "total_cents": 19000
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Customer-facing rate x duration
    pub venue_subtotal_cents: i64,

    /// Sum of equipment price x quantity
    pub equipment_subtotal_cents: i64,

    /// venue_subtotal + equipment_subtotal
    pub total_cents: i64,
}

impl From<PriceBreakdown> for QuoteResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            venue_subtotal_cents: breakdown.venue_subtotal_cents,
            equipment_subtotal_cents: breakdown.equipment_subtotal_cents,
            total_cents: breakdown.total_cents,
        }
    }
}
