pub mod api;
pub mod form;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Input form
        .route("/", get(form::handle_form).post(form::handle_submit))
        // JSON API
        .route("/api/v1/options", get(api::handle_options))
        .route("/api/v1/distance", get(api::handle_distance))
        .route("/api/v1/recommendations", post(api::handle_recommend))
        .with_state(state)
}
