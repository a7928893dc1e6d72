pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::downloads::handle_download;
use crate::flows::handlers::{handle_cover_letter, handle_tailor_resume};
use crate::session::handlers::{handle_generate, handle_generate_upload};
use crate::state::AppState;
use crate::upload::handle_upload;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // File gating
        .route("/api/v1/resume/upload", post(handle_upload))
        // Individual flows
        .route("/api/v1/flows/tailor-resume", post(handle_tailor_resume))
        .route("/api/v1/flows/cover-letter", post(handle_cover_letter))
        // Full submission: tailor, then cover letter
        .route("/api/v1/generate", post(handle_generate))
        .route("/api/v1/generate/upload", post(handle_generate_upload))
        // Downloads
        .route("/api/v1/download/:kind", post(handle_download))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
