//! Venue data models and API request/response types.
//!
//! This module defines:
//! - `Venue`: Database entity representing a sports venue
//! - `CreateVenueRequest`: Request body for listing a new venue
//! - `VenueResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a venue record from the database.
///
/// # Database Table
///
/// Maps to the `venues` table. Each venue:
/// - Belongs to one owner (via `api_key_id`)
/// - Has an hourly base rate stored in cents (never floats!)
/// - Carries an explicit IANA timezone name
///
/// # Timezone
///
/// All schedule times (operating hours, booking start times) are
/// venue-local wall-clock values. The service performs no timezone
/// conversion; the field exists so callers never have to guess which
/// wall clock a venue's times belong to.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Venue {
    /// Unique identifier for this venue
    pub id: Uuid,

    /// Foreign key to the API key (owner) that owns this venue
    ///
    /// All venue mutations filter by `api_key_id` so one owner can never
    /// modify another owner's venues.
    pub api_key_id: Uuid,

    /// Display name of the venue
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Base hourly rate in cents (not dollars)
    ///
    /// Must be >= 0 (enforced by database CHECK constraint).
    pub hourly_rate_cents: i64,

    /// IANA timezone name, e.g. "Europe/Istanbul"
    pub timezone: String,

    /// Whether the venue is live and bookable
    ///
    /// False means draft: owners can configure it but no slots are
    /// served and no bookings are admitted.
    pub is_active: bool,

    /// Timestamp when the venue was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new venue.
///
/// # JSON Example
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
/// # Validation
///
/// - `name`: Required, non-empty string
/// - `hourly_rate_cents`: Required, must be >= 0
/// - `timezone`: Optional, defaults to "UTC"
#[derive(Debug, Deserialize)]
pub struct CreateVenueRequest {
    /// Display name for the new venue
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Base hourly rate in cents
    pub hourly_rate_cents: i64,

    /// IANA timezone name (defaults to "UTC" if not provided)
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Whether the venue starts live (defaults to false: draft)
    #[serde(default)]
    pub is_active: bool,
}

/// Default timezone value when not specified in request.
fn default_timezone() -> String {
    "UTC".to_string()
}

/// Response body for venue endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "Riverside Court 1",
///   "description": "Indoor basketball court",
///   "hourly_rate_cents": 10000,
///   "timezone": "Europe/Istanbul",
///   "is_active": true,
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct VenueResponse {
    /// Venue unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Base hourly rate in cents
    pub hourly_rate_cents: i64,

    /// IANA timezone name
    pub timezone: String,

    /// Whether the venue is live
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Convert database Venue to API VenueResponse.
///
/// This transformation removes the internal `api_key_id` field.
impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            description: venue.description,
            hourly_rate_cents: venue.hourly_rate_cents,
            timezone: venue.timezone,
            is_active: venue.is_active,
            created_at: venue.created_at,
            updated_at: venue.updated_at,
        }
    }
}
