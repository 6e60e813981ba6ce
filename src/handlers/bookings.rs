//! Booking HTTP handlers.
//!
//! This module implements booking-related API endpoints:
//! - POST /api/v1/bookings - Admit a proposed booking
//! - GET /api/v1/bookings/:id - Get booking details
//! - POST /api/v1/bookings/:id/cancel - Cancel a booking
//! - GET /api/v1/venues/:id/bookings - List a venue's bookings

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::booking::{BookingResponse, CreateBookingRequest},
    services::{booking_service, webhook_service},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// Admit a proposed booking.
///
/// # Endpoint
///
/// `POST /api/v1/bookings`
///
/// # Request Body
///
/// ```json
/// {
///   "venue_id": "550e8400-...",
///   "date": "2026-03-14",
///   "start_time": "10:00:00",
///   "duration_minutes": 90,
///   "customer_name": "Ada Lovelace",
///   "customer_email": "ada@example.com",
///   "equipment": [{ "equipment_id": "660e8400-...", "quantity": 2 }]
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: The booking was admitted and persisted; body is
///   the booking with its computed price
/// - **409 Conflict**: Rejected — `slot_taken` (exact start already
///   booked), `booking_overlap` (overlaps a booking with a different
///   start), or `concurrent_conflict` (a racing admission won)
/// - **404**: Venue or equipment not found
/// - **400**: Invalid duration, status, or quantity
///
/// # Atomicity
///
/// The overlap check and the insert happen in one database transaction
/// holding the venue row lock; two concurrent overlapping proposals
/// can never both return 201.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let policy = state.config.customer_rate_policy();
    let booking = booking_service::admit_booking(&state.pool, request, policy).await?;

    // Notify the owner's webhooks. Delivery failures are logged inside
    // the service and never fail the admission.
    if let Err(e) = webhook_service::notify_booking_webhooks(&state.pool, &booking).await {
        tracing::error!("Webhook notification failed for booking {}: {:?}", booking.id, e);
    }

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// Get booking by ID.
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service::get_booking_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::BookingNotFound)?;

    Ok(Json(booking.into()))
}

/// Cancel a booking.
///
/// # Endpoint
///
/// `POST /api/v1/bookings/:id/cancel`
///
/// # Behavior
///
/// Soft status flip to `cancelled`; the row is never deleted. The slot
/// becomes available again immediately. Cancelling twice is a no-op
/// returning the already-cancelled booking.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service::cancel_booking(&state.pool, booking_id).await?;

    Ok(Json(booking.into()))
}

/// Query parameters for listing a venue's bookings.
#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    /// Restrict to one venue-local date
    pub date: Option<NaiveDate>,
}

/// List a venue's bookings, optionally filtered to one date.
///
/// # Endpoint
///
/// `GET /api/v1/venues/:id/bookings?date=2026-03-14`
///
/// # Security
///
/// Only the venue's owner may list its bookings (customer identities
/// are included in the response).
pub async fn list_venue_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    crate::handlers::hours::verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let bookings = booking_service::list_venue_bookings(&state.pool, venue_id, query.date).await?;

    let responses: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}
