use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::keys;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Key lifecycle
        .route("/register", post(keys::register))
        .route("/login", post(keys::login))
        .route("/list", get(keys::list_keys))
        .route("/hwid-reset", post(keys::reset_hwid))
        .route("/key", delete(keys::delete_key))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
