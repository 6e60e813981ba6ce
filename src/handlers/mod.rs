//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Slot availability endpoint
pub mod availability;
/// Blocked date management endpoints
pub mod blocked_dates;
/// Booking admission and lifecycle endpoints
pub mod bookings;
/// Equipment catalog endpoints
pub mod equipment;
/// Health check endpoint
pub mod health;
/// Operating hours endpoints
pub mod hours;
/// Price quote endpoint
pub mod quotes;
/// Venue management endpoints
pub mod venues;
/// Webhook endpoint management
pub mod webhooks;
