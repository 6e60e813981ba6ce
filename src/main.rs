//! Venue Booking Service - Main Application Entry Point
//!
//! This is a REST API server for venue availability and bookings: owners configure sports venues (weekly operating hours, blocked dates, equipment), and the service computes bookable slots, admits bookings with transactional conflict detection, and prices them.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: API key with SHA-256 hashing
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod scheduling;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use state::AppState;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Create authenticated routes (API endpoints)
    let authenticated_routes = Router::new()
        // Venue management routes
        .route("/api/v1/venues", post(handlers::venues::create_venue))
        .route("/api/v1/venues", get(handlers::venues::list_venues))
        .route("/api/v1/venues/{id}", get(handlers::venues::get_venue))
        // Weekly schedule routes
        .route("/api/v1/venues/{id}/hours", put(handlers::hours::set_hours))
        .route("/api/v1/venues/{id}/hours", get(handlers::hours::get_hours))
        // Blocked date routes
        .route(
            "/api/v1/venues/{id}/blocked-dates",
            post(handlers::blocked_dates::create_blocked_date),
        )
        .route(
            "/api/v1/venues/{id}/blocked-dates",
            get(handlers::blocked_dates::list_blocked_dates),
        )
        .route(
            "/api/v1/venues/{id}/blocked-dates/{date_id}",
            delete(handlers::blocked_dates::delete_blocked_date),
        )
        // Availability route
        .route(
            "/api/v1/venues/{id}/slots",
            get(handlers::availability::list_slots),
        )
        // Equipment catalog routes
        .route(
            "/api/v1/venues/{id}/equipment",
            post(handlers::equipment::create_equipment),
        )
        .route(
            "/api/v1/venues/{id}/equipment",
            get(handlers::equipment::list_equipment),
        )
        // Quote route
        .route("/api/v1/quotes", post(handlers::quotes::create_quote))
        // Booking routes
        .route("/api/v1/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/v1/bookings/{id}",
            get(handlers::bookings::get_booking),
        )
        .route(
            "/api/v1/bookings/{id}/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route(
            "/api/v1/venues/{id}/bookings",
            get(handlers::bookings::list_venue_bookings),
        )
        // Webhook routes
        .route("/api/v1/webhooks", post(handlers::webhooks::create_webhook))
        .route("/api/v1/webhooks", get(handlers::webhooks::list_webhooks))
        .route(
            "/api/v1/webhooks/{id}",
            delete(handlers::webhooks::delete_webhook),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Combine authenticated routes with public routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        // Merge authenticated routes
        .merge(authenticated_routes)
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share pool and configuration with all handlers via State extraction
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
