//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the API request/response types built from them.

/// API key authentication model
pub mod api_key;
/// Full-day closure overrides
pub mod blocked_date;
/// Bookings and availability slots
pub mod booking;
/// Per-venue equipment catalog
pub mod equipment;
/// Weekly operating hours
pub mod hours;
/// Price quote types
pub mod quote;
/// Venue model
pub mod venue;
/// Webhook endpoint and event models
pub mod webhook;
