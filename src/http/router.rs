//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Reservation lifecycle
        .route("/reservations", post(handlers::create_reservation))
        .route("/reservations", get(handlers::list_reservations))
        .route("/reservations/{id}/schedule", put(handlers::reschedule_reservation))
        .route("/reservations/{id}/status", post(handlers::change_reservation_status))
        // Availability
        .route("/availability", get(handlers::get_availability))
        // Customers
        .route("/customers/{id}", get(handlers::get_customer))
        .route("/customers/{id}/notes", post(handlers::append_customer_note));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
