//! Operating hours HTTP handlers.
//!
//! This module implements the weekly schedule endpoints:
//! - PUT /api/v1/venues/:id/hours - Upsert the weekly schedule
//! - GET /api/v1/venues/:id/hours - Read the weekly schedule

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::hours::{OperatingHours, SetHoursRequest},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Upsert a venue's weekly operating hours.
///
/// # Endpoint
///
/// `PUT /api/v1/venues/:id/hours`
///
/// # Request Body
///
/// ```json
/// {
///   "days": [
///     { "day_of_week": 1, "open_time": "09:00:00", "close_time": "22:00:00" },
///     { "day_of_week": 0, "open_time": "00:00:00", "close_time": "00:00:00", "is_closed": true }
///   ]
/// }
/// ```
///
/// # Behavior
///
/// Each listed weekday is inserted or updated (at most one row per
/// `(venue, day_of_week)`); weekdays not listed keep their current rows.
///
/// # Validation
///
/// - `day_of_week` must be 0-6 (0 = Sunday)
/// - `open_time` must be before `close_time` unless `is_closed`
/// - At most one entry per weekday in a single request
pub async fn set_hours(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
    Json(request): Json<SetHoursRequest>,
) -> Result<Json<Vec<OperatingHours>>, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let mut seen = [false; 7];
    for day in &request.days {
        let index = usize::try_from(day.day_of_week).map_err(|_| {
            AppError::InvalidRequest("day_of_week must be between 0 and 6".to_string())
        })?;
        if index > 6 {
            return Err(AppError::InvalidRequest(
                "day_of_week must be between 0 and 6".to_string(),
            ));
        }
        if seen[index] {
            return Err(AppError::InvalidRequest(format!(
                "Duplicate entry for day_of_week {}",
                day.day_of_week
            )));
        }
        seen[index] = true;

        if !day.is_closed && day.open_time >= day.close_time {
            return Err(AppError::InvalidRequest(format!(
                "open_time must be before close_time for day_of_week {}",
                day.day_of_week
            )));
        }
    }

    // Upsert all entries atomically
    let mut tx = state.pool.begin().await?;
    for day in &request.days {
        sqlx::query(
            r#"
            INSERT INTO operating_hours (venue_id, day_of_week, open_time, close_time, is_closed)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (venue_id, day_of_week)
            DO UPDATE SET open_time = EXCLUDED.open_time,
                          close_time = EXCLUDED.close_time,
                          is_closed = EXCLUDED.is_closed
            "#,
        )
        .bind(venue_id)
        .bind(day.day_of_week)
        .bind(day.open_time)
        .bind(day.close_time)
        .bind(day.is_closed)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    // Return the full schedule after the update
    let schedule = fetch_schedule(&state, venue_id).await?;
    Ok(Json(schedule))
}

/// Get a venue's weekly operating hours.
///
/// # Endpoint
///
/// `GET /api/v1/venues/:id/hours`
///
/// # Response
///
/// Array ordered by `day_of_week`; weekdays with no row configured are
/// simply absent (the venue is closed those days).
pub async fn get_hours(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<OperatingHours>>, AppError> {
    verify_venue_ownership(&state, venue_id, auth.api_key_id).await?;

    let schedule = fetch_schedule(&state, venue_id).await?;
    Ok(Json(schedule))
}

/// Fetch the full weekly schedule in weekday order.
async fn fetch_schedule(state: &AppState, venue_id: Uuid) -> Result<Vec<OperatingHours>, AppError> {
    let schedule = sqlx::query_as::<_, OperatingHours>(
        "SELECT * FROM operating_hours WHERE venue_id = $1 ORDER BY day_of_week",
    )
    .bind(venue_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(schedule)
}

/// Verify the venue exists and belongs to the authenticated owner.
///
/// Returns 404 either way, so owners cannot probe for other owners'
/// venue ids.
pub async fn verify_venue_ownership(
    state: &AppState,
    venue_id: Uuid,
    api_key_id: Uuid,
) -> Result<(), AppError> {
    let owned: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM venues WHERE id = $1 AND api_key_id = $2)",
    )
    .bind(venue_id)
    .bind(api_key_id)
    .fetch_one(&state.pool)
    .await?;

    if !owned {
        return Err(AppError::VenueNotFound);
    }

    Ok(())
}
