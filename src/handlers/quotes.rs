//! Price quote HTTP handler.
//!
//! This module implements the quote endpoint:
//! - POST /api/v1/quotes - Compute a price breakdown without persisting

use crate::{
    error::AppError,
    models::quote::{QuoteRequest, QuoteResponse},
    scheduling::pricing::{self, EquipmentLine},
    services::booking_service,
    state::AppState,
};
use axum::{Json, extract::State};
use std::collections::HashMap;
use uuid::Uuid;

/// Compute the price breakdown for a prospective booking.
///
/// # Endpoint
///
/// `POST /api/v1/quotes`
///
/// # Request Body
///
/// ```json
/// {
///   "venue_id": "550e8400-...",
///   "duration_minutes": 90,
///   "equipment": [{ "equipment_id": "660e8400-...", "quantity": 2 }]
/// }
/// ```
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "venue_subtotal_cents": 15000,
///   "equipment_subtotal_cents": 4000,
///   "total_cents": 19000
/// }
/// ```
///
/// The venue subtotal uses the customer-facing rate (base rate with the
/// configured markup applied). Nothing is persisted; the same
/// calculation runs again at admission time and that result is the one
/// stored on the booking.
///
/// # Errors
///
/// - **404**: Venue not found/draft, or an equipment id isn't in the
///   venue's catalog
/// - **400**: Invalid duration or quantity, or duplicate equipment
///   selections
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    // Same rule as admission: a quote with duplicate selections would
    // price equipment twice and promise a total no booking can have
    booking_service::ensure_unique_equipment(&request.equipment)?;

    let hourly_rate_cents: i64 = sqlx::query_scalar(
        "SELECT hourly_rate_cents FROM venues WHERE id = $1 AND is_active = true",
    )
    .bind(request.venue_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::VenueNotFound)?;

    // Resolve equipment selections against the venue's catalog
    let mut lines: Vec<EquipmentLine> = Vec::with_capacity(request.equipment.len());
    if !request.equipment.is_empty() {
        let ids: Vec<Uuid> = request.equipment.iter().map(|s| s.equipment_id).collect();
        let catalog: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT id, price_cents FROM equipment WHERE venue_id = $1 AND id = ANY($2)",
        )
        .bind(request.venue_id)
        .bind(&ids)
        .fetch_all(&state.pool)
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
        state.config.customer_rate_policy(),
    )
    .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    Ok(Json(breakdown.into()))
}
