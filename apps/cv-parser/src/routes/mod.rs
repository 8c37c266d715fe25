pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parsing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/parse", post(handlers::handle_parse_upload))
        .route("/api/v1/resumes/parse-text", post(handlers::handle_parse_text))
        .route("/api/v1/resumes/parse-batch", post(handlers::handle_parse_batch))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
