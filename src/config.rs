//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `SLOT_MINUTES` (optional): Length of generated booking slots in
///   minutes, defaults to 60
/// - `CUSTOMER_MARKUP_PERCENT` (optional): Percentage markup applied to
///   the venue's base hourly rate for customer-facing pricing,
///   defaults to 0 (identity)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: i32,

    #[serde(default)]
    pub customer_markup_percent: i64,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// Default slot length if SLOT_MINUTES is not set.
fn default_slot_minutes() -> i32 {
    60
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    /// - SLOT_MINUTES is zero or negative
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()?.validated()
    }

    /// Check values that parse fine but cannot work.
    ///
    /// A non-positive slot length would make every availability query
    /// return an empty day; fail at startup instead.
    fn validated(self) -> Result<Self, envy::Error> {
        if self.slot_minutes <= 0 {
            return Err(envy::Error::Custom(format!(
                "SLOT_MINUTES must be positive, got {}",
                self.slot_minutes
            )));
        }
        Ok(self)
    }

    /// The customer-facing rate policy as a function of the base rate.
    ///
    /// With `CUSTOMER_MARKUP_PERCENT=0` this is the identity. The policy
    /// is injected into the pricing core rather than hardcoded there,
    /// since the markup is a business rule that changes independently.
    pub fn customer_rate_policy(&self) -> impl Fn(i64) -> i64 {
        let markup = self.customer_markup_percent;
        move |rate_cents| rate_cents + rate_cents * markup / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_slot_minutes(slot_minutes: i32) -> Config {
        Config {
            database_url: "postgres://localhost/venues".to_string(),
            server_port: 3000,
            slot_minutes,
            customer_markup_percent: 0,
        }
    }

    #[test]
    fn rejects_non_positive_slot_minutes() {
        assert!(config_with_slot_minutes(0).validated().is_err());
        assert!(config_with_slot_minutes(-30).validated().is_err());
    }

    #[test]
    fn accepts_positive_slot_minutes() {
        assert!(config_with_slot_minutes(60).validated().is_ok());
    }
}
