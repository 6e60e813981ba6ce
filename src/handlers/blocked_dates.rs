//! Blocked date HTTP handlers.
//!
//! This module implements the full-day closure endpoints:
//! - POST /api/v1/venues/:id/blocked-dates - Block a date
//! - GET /api/v1/venues/:id/blocked-dates - List blocked dates
//! - DELETE /api/v1/venues/:id/blocked-dates/:date_id - Unblock a date

use crate::{
    error::AppError,
    handlers::hours::verify_venue_ownership,
    middleware::auth::AuthContext,
    models::blocked_date::{BlockedDate, CreateBlockedDateRequest},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Block a date for a venue.
///
/// # Endpoint
///
/// `POST /api/v1/venues/:id/blocked-dates`
///
/// # Request Body
///
/// ```json
/// {
///   "date": "2026-01-01",
///   "reason": "New Year's Day"
/// }
/// ```
///
/// # Behavior
///
/// The block overrides the weekday's operating hours entirely: slot
/// generation returns an empty sequence for that date. Blocking an
/// already-blocked date returns 400 (unique constraint on venue/date).
pub async fn create_blocked_date(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
    Json(request): Json<CreateBlockedDateRequest>,
) -> Result<impl IntoResponse, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let blocked = sqlx::query_as::<_, BlockedDate>(
        r#"
        INSERT INTO blocked_dates (venue_id, date, reason)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(venue_id)
    .bind(request.date)
    .bind(request.reason)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::InvalidRequest("Date is already blocked".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok((StatusCode::CREATED, Json(blocked)))
}

/// List a venue's blocked dates.
///
/// # Endpoint
///
/// `GET /api/v1/venues/:id/blocked-dates`
///
/// # Ordering
///
/// Chronological by blocked date.
pub async fn list_blocked_dates(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<BlockedDate>>, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let blocked = sqlx::query_as::<_, BlockedDate>(
        "SELECT * FROM blocked_dates WHERE venue_id = $1 ORDER BY date",
    )
    .bind(venue_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(blocked))
}

/// Remove a blocked date.
///
/// # Endpoint
///
/// `DELETE /api/v1/venues/:id/blocked-dates/:date_id`
///
/// # Response
///
/// Returns 204 No Content on success, 404 if the block doesn't exist
/// for this venue.
pub async fn delete_blocked_date(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((venue_id, date_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let result = sqlx::query("DELETE FROM blocked_dates WHERE id = $1 AND venue_id = $2")
        .bind(date_id)
        .bind(venue_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BlockedDateNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
