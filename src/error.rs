//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Authentication Errors**: Invalid or missing API keys
/// - **Resource Errors**: Requested resources not found
/// - **Admission Rejections**: Booking proposals that conflict with
///   existing bookings (these are terminal outcomes, not failures —
///   storage errors are never mapped into them)
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// API key is missing, invalid, or inactive.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Requested venue does not exist, is not active, or doesn't belong
    /// to the authenticated owner.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Venue not found")]
    VenueNotFound,

    /// Requested booking does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Booking not found")]
    BookingNotFound,

    /// A selected equipment id does not exist for the venue.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Equipment not found")]
    EquipmentNotFound,

    /// Requested blocked date does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Blocked date not found")]
    BlockedDateNotFound,

    /// Requested webhook endpoint does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Webhook endpoint not found")]
    WebhookNotFound,

    /// Webhook URL failed validation.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(String),

    /// The exact requested slot is already booked (race lost).
    ///
    /// Returns HTTP 409 Conflict.
    #[error("The requested slot is already booked")]
    SlotTaken,

    /// The requested interval overlaps an existing booking with a
    /// different start time.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("The requested time overlaps an existing booking")]
    BookingOverlap,

    /// A concurrent admission won the slot after our overlap check
    /// passed (detected via the unique-index violation on insert).
    ///
    /// Returns HTTP 409 Conflict.
    #[error("The slot was taken by a concurrent booking")]
    ConcurrentConflict,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidApiKey` → 401 Unauthorized
/// - `*NotFound` → 404 Not Found
/// - `SlotTaken` / `BookingOverlap` / `ConcurrentConflict` → 409 Conflict
/// - `InvalidRequest` / `InvalidWebhookUrl` → 400 Bad Request
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "invalid_api_key",
                self.to_string(),
            ),
            AppError::VenueNotFound => {
                (StatusCode::NOT_FOUND, "venue_not_found", self.to_string())
            }
            AppError::BookingNotFound => {
                (StatusCode::NOT_FOUND, "booking_not_found", self.to_string())
            }
            AppError::EquipmentNotFound => (
                StatusCode::NOT_FOUND,
                "equipment_not_found",
                self.to_string(),
            ),
            AppError::BlockedDateNotFound => (
                StatusCode::NOT_FOUND,
                "blocked_date_not_found",
                self.to_string(),
            ),
            AppError::WebhookNotFound => {
                (StatusCode::NOT_FOUND, "webhook_not_found", self.to_string())
            }
            AppError::InvalidWebhookUrl(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_webhook_url", msg.clone())
            }
            AppError::SlotTaken => (StatusCode::CONFLICT, "slot_taken", self.to_string()),
            AppError::BookingOverlap => {
                (StatusCode::CONFLICT, "booking_overlap", self.to_string())
            }
            AppError::ConcurrentConflict => (
                StatusCode::CONFLICT,
                "concurrent_conflict",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
