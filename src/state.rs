//! Shared application state.
//!
//! Handlers need both the database pool and the loaded configuration
//! (slot length, pricing policy), so the router state bundles them.

use crate::{config::Config, db::DbPool};

/// State shared across all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: DbPool,

    /// Configuration loaded at startup
    pub config: Config,
}
