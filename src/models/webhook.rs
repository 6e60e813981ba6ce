//! Webhook models for endpoint registration and event delivery.
//!
//! This module defines the data structures for managing webhook endpoints
//! and tracking webhook event deliveries.
//!
//! # Webhook Flow
//!
//! 1. Owner registers a webhook endpoint via `POST /api/v1/webhooks`
//! 2. System generates a secret for HMAC signature verification
//! 3. When a booking is admitted, system sends a webhook with signed payload
//! 4. Owner verifies signature using the secret
//!
//! # Security
//!
//! - Secrets are only shown once during registration
//! - Payloads are signed using HMAC-SHA256
//! - HTTPS is required for production endpoints

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::booking::Booking;

/// Webhook endpoint registered by a venue owner.
///
/// # Database Table
///
/// Maps to the `webhook_endpoints` table.
///
/// # Secret Storage
///
/// The `secret` is stored in plaintext (required for HMAC generation)
/// but never returned in list/get operations for security.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookEndpoint {
    pub id: Uuid,
    pub api_key_id: Uuid,
    pub url: String,
    pub secret: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to register a new webhook endpoint.
///
/// # Example
///
/// ```json
/// {
///   "url": "https://example.com/webhook"
/// }
/// ```
///
/// # Validation
///
/// - URL must be valid HTTPS (HTTP allowed for localhost in development)
/// - URL must not exceed 2048 characters
#[derive(Debug, Deserialize)]
pub struct WebhookEndpointRequest {
    pub url: String,
}

/// Response when registering or retrieving a webhook endpoint.
///
/// # Security Note
///
/// The `secret` field is ONLY included when creating a new endpoint.
/// It is never returned in list/get operations.
#[derive(Debug, Serialize)]
pub struct WebhookEndpointResponse {
    pub id: Uuid,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<WebhookEndpoint> for WebhookEndpointResponse {
    fn from(endpoint: WebhookEndpoint) -> Self {
        Self {
            id: endpoint.id,
            url: endpoint.url,
            secret: None, // Never include secret by default
            is_active: endpoint.is_active,
            created_at: endpoint.created_at,
        }
    }
}

impl WebhookEndpointResponse {
    /// Create response with secret included (only for registration).
    pub fn with_secret(mut self, secret: String) -> Self {
        self.secret = Some(secret);
        self
    }
}

/// Webhook event delivery record to insert.
///
/// # Database Table
///
/// Maps to the `webhook_events` table. Tracks every delivery attempt,
/// including the payload sent, HTTP response status, and any error
/// messages.
#[derive(Debug, Clone)]
pub struct NewWebhookEvent {
    pub id: Uuid,
    pub webhook_endpoint_id: Uuid,
    pub booking_id: Uuid,
    pub payload: serde_json::Value,
    pub response_status: Option<i32>,
    pub response_body: Option<String>,
}

impl NewWebhookEvent {
    pub fn new(
        id: Uuid,
        webhook_endpoint_id: Uuid,
        booking_id: Uuid,
        payload: serde_json::Value,
        response_status: Option<i32>,
        response_body: Option<String>,
    ) -> Self {
        Self {
            id,
            webhook_endpoint_id,
            booking_id,
            payload,
            response_status,
            response_body,
        }
    }
}

/// Webhook payload sent to the registered endpoint.
///
/// # Example
///
/// ```json
/// {
///   "event_type": "booking.created",
///   "event_id": "550e8400-e29b-41d4-a716-446655440000",
///   "created_at": "2026-03-01T12:00:00Z",
///   "data": {
///     "booking": {
///       "id": "...",
///       "venue_id": "...",
///       "date": "2026-03-14",
///       "start_time": "10:00:00",
///       "duration_minutes": 90,
///       "status": "confirmed",
///       "price_cents": 19000
///     }
///   }
/// }
/// ```
///
/// # Signature Verification
///
/// The webhook includes an `X-Webhook-Signature` header with format:
/// `sha256=<hex_encoded_hmac>`
///
/// Clients should verify this by computing HMAC-SHA256(secret, json_body)
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Type of event (always "booking.created" in this phase)
    pub event_type: String,

    /// Unique identifier for this webhook event
    pub event_id: Uuid,

    /// When the event was created
    pub created_at: DateTime<Utc>,

    /// Event data containing booking details
    pub data: WebhookData,
}

/// Data portion of the webhook payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookData {
    /// Booking that triggered the webhook
    pub booking: BookingWebhookData,
}

/// Booking data included in webhook payload.
///
/// This is a subset of the full Booking model, containing only the
/// fields relevant for webhook consumers.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingWebhookData {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: String,
    pub price_cents: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingWebhookData {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            venue_id: b.venue_id,
            date: b.date,
            start_time: b.start_time,
            duration_minutes: b.duration_minutes,
            status: b.status,
            price_cents: b.price_cents,
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            created_at: b.created_at,
        }
    }
}

impl WebhookPayload {
    /// Create a new webhook payload for a booking event.
    pub fn new(event_id: Uuid, booking: Booking) -> Self {
        Self {
            event_type: "booking.created".to_string(),
            event_id,
            created_at: Utc::now(),
            data: WebhookData {
                booking: booking.into(),
            },
        }
    }
}
