//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health_check))

        // Reference data
        .route("/api/v1/references/:key", get(handlers::get_reference))
        .route("/api/v1/proxy", get(handlers::fetch_custom))

        // Cache management
        .route(
            "/api/v1/cache",
            get(handlers::cache_stats).delete(handlers::clear_cache),
        )
        .route("/api/v1/cache/:key", delete(handlers::clear_cache_key))

        // Endpoint table
        .route(
            "/api/v1/endpoints",
            get(handlers::list_endpoints).post(handlers::add_endpoint),
        )

        // Upstream probe
        .route("/api/v1/upstream/health", get(handlers::upstream_health))

        .with_state(state)
}
