//! Availability HTTP handler.
//!
//! This module implements the slot listing endpoint:
//! - GET /api/v1/venues/:id/slots?date=YYYY-MM-DD

use crate::{
    error::AppError, models::booking::SlotResponse, services::availability_service,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for the slots endpoint.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// The venue-local calendar date to list slots for
    pub date: NaiveDate,
}

/// List the bookable slots for a venue on a given date.
///
/// # Endpoint
///
/// `GET /api/v1/venues/:id/slots?date=2026-03-14`
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "start_time": "09:00:00", "available": true },
///   { "start_time": "10:00:00", "available": false },
///   { "start_time": "11:00:00", "available": true }
/// ]
/// ```
///
/// An empty array means the venue is closed that day (no hours
/// configured for the weekday, the weekday is marked closed, or the
/// date is blocked). Slot length comes from the `SLOT_MINUTES`
/// configuration (default 60).
///
/// # Errors
///
/// - **404**: Venue doesn't exist or is still a draft
pub async fn list_slots(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let slots = availability_service::generate_slots_for_date(
        &state.pool,
        venue_id,
        query.date,
        state.config.slot_minutes,
    )
    .await?;

    Ok(Json(slots))
}
