pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::application::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Applications API
        .route("/api/v1/applications", post(handlers::handle_submit))
        .route(
            "/api/v1/applications/validate",
            post(handlers::handle_validate_field),
        )
        // Path the careers page form posts to
        .route("/api/submit-application", post(handlers::handle_submit))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
