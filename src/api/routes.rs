//! API Routes
//!
//! Configures the Axum router with all shortener endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    form_handler, health_handler, index_handler, redirect_handler, resolve_handler,
    shorten_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Static paths take precedence over `/:token`, so `/health` and `/stats`
/// are never treated as tokens.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/api/shorten", post(shorten_handler))
        .route("/api/:token", get(resolve_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/:token", get(redirect_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
