//! Equipment catalog HTTP handlers.
//!
//! This module implements the per-venue equipment endpoints:
//! - POST /api/v1/venues/:id/equipment - Add an item to the catalog
//! - GET /api/v1/venues/:id/equipment - List the catalog

use crate::{
    error::AppError,
    handlers::hours::verify_venue_ownership,
    middleware::auth::AuthContext,
    models::equipment::{CreateEquipmentRequest, Equipment},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Add an equipment item to a venue's catalog.
///
/// # Endpoint
///
/// `POST /api/v1/venues/:id/equipment`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Racket",
///   "price_cents": 2000
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: The created catalog item
/// - **400**: Empty name or negative price
/// - **404**: Venue not found or not owned by the caller
pub async fn create_equipment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Equipment name must not be empty".to_string(),
        ));
    }
    if request.price_cents < 0 {
        return Err(AppError::InvalidRequest(
            "Equipment price must not be negative".to_string(),
        ));
    }

    let item = sqlx::query_as::<_, Equipment>(
        r#"
        INSERT INTO equipment (venue_id, name, price_cents)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(venue_id)
    .bind(request.name)
    .bind(request.price_cents)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// List a venue's equipment catalog.
///
/// # Endpoint
///
/// `GET /api/v1/venues/:id/equipment`
pub async fn list_equipment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<Equipment>>, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let items = sqlx::query_as::<_, Equipment>(
        "SELECT * FROM equipment WHERE venue_id = $1 ORDER BY created_at",
    )
    .bind(venue_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(items))
}
