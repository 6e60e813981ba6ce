//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They own all I/O around the pure scheduling core: fetching the rows
//! a computation needs, and persisting admitted bookings transactionally.

pub mod availability_service;
pub mod booking_service;
pub mod webhook_service;
