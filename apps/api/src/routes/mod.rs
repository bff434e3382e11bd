pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::counseling::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Counseling API
        .route("/api/v1/counsel", post(handlers::handle_counsel))
        .route("/api/v1/counsel/profile", post(handlers::handle_profile))
        .route(
            "/api/v1/counsel/universities",
            post(handlers::handle_universities),
        )
        .route("/api/v1/counsel/plan", post(handlers::handle_plan))
        .with_state(state)
}
