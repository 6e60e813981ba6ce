//! Venue management HTTP handlers.
//!
//! This module implements the venue-related API endpoints:
//! - POST /api/v1/venues - List a new venue
//! - GET /api/v1/venues - List all venues for authenticated owner
//! - GET /api/v1/venues/:id - Get venue by ID

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::venue::{CreateVenueRequest, Venue, VenueResponse},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Create a new venue.
///
/// # Endpoint
///
/// `POST /api/v1/venues`
///
/// # Authentication
///
/// Requires valid API key in Authorization header.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Riverside Court 1",
///   "description": "Indoor basketball court",
///   "hourly_rate_cents": 10000,
///   "timezone": "Europe/Istanbul"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created venue (draft unless
///   `is_active` was set)
/// - **Error (400)**: Negative hourly rate or empty name
/// - **Error (401)**: Invalid API key
pub async fn create_venue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Venue name must not be empty".to_string(),
        ));
    }
    if request.hourly_rate_cents < 0 {
        return Err(AppError::InvalidRequest(
            "Hourly rate must not be negative".to_string(),
        ));
    }

    let venue = sqlx::query_as::<_, Venue>(
        r#"
        INSERT INTO venues (api_key_id, name, description, hourly_rate_cents, timezone, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    // Link to authenticated owner
    .bind(auth.api_key_id)
    .bind(request.name)
    .bind(request.description)
    .bind(request.hourly_rate_cents)
    .bind(&request.timezone)
    .bind(request.is_active)
    .fetch_one(&state.pool)
    .await?;

    // Convert Venue to VenueResponse (removes api_key_id)
    Ok((StatusCode::CREATED, Json(VenueResponse::from(venue))))
}

/// Get a specific venue by ID.
///
/// # Authentication
///
/// Requires valid API key. Returns 404 if the venue doesn't exist OR
/// belongs to a different owner (prevents leaking existence of other venues).
///
/// # Security Note
///
/// The query filters by BOTH `id` AND `api_key_id` so owners can only
/// access their own venues.
pub async fn get_venue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<VenueResponse>, AppError> {
    // Query venue by ID AND api_key_id (security filter)
    let venue = sqlx::query_as::<_, Venue>(
        "SELECT * FROM venues WHERE id = $1 AND api_key_id = $2",
    )
    .bind(venue_id)
    // Ensure venue belongs to this owner
    .bind(auth.api_key_id)
    .fetch_optional(&state.pool)
    .await?
    // Return 404 if not found
    .ok_or(AppError::VenueNotFound)?;

    Ok(Json(venue.into()))
}

/// List all venues for the authenticated owner.
///
/// # Endpoint
///
/// `GET /api/v1/venues`
///
/// # Ordering
///
/// Venues are returned in reverse chronological order (newest first).
pub async fn list_venues(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<VenueResponse>>, AppError> {
    // Fetch all venues for this owner
    let venues = sqlx::query_as::<_, Venue>(
        "SELECT * FROM venues WHERE api_key_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.api_key_id)
    .fetch_all(&state.pool)
    .await?;

    // Convert each Venue to VenueResponse
    let responses: Vec<VenueResponse> = venues.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}
