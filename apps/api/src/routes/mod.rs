pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::profile::handlers;
use crate::resume::handlers::handle_parse_resume;
use crate::state::AppState;

/// Room for multipart boundaries and part headers around the resume file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_resume_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            get(handlers::handle_get_profile).post(handlers::handle_save_profile),
        )
        .route(
            "/api/v1/profile/preview",
            post(handlers::handle_preview_profile),
        )
        .route("/api/v1/profile/form", post(handlers::handle_profile_form))
        .route(
            "/api/v1/profile/template",
            patch(handlers::handle_set_template),
        )
        // Renderer feed
        .route(
            "/api/v1/portfolio/:user_id",
            get(handlers::handle_get_portfolio),
        )
        // Resume import
        .route(
            "/api/v1/resume/parse",
            post(handle_parse_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
