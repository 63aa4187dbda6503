//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, dedupe_handler, delete_handler, get_handler, has_handler, health_handler,
    leaderboard_handler, set_handler, stats_handler, sweep_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (the mobile client calls from arbitrary hosts)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/has/:key", get(has_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/clear", post(clear_handler))
        .route("/sweep", post(sweep_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/services/dedupe", post(dedupe_handler))
        .route("/leaderboard", post(leaderboard_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
