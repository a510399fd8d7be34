pub mod admin;
pub mod download;
pub mod generate;
pub mod health;
pub mod tracking;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route("/api/download/pdf", post(download::handle_pdf))
        .route(
            "/api/download/pdf-original",
            post(download::handle_pdf_original),
        )
        // Enrichment API
        .route("/api/generate-ai", post(generate::handle_generate_ai))
        // Tracking API (fire-and-forget from the client)
        .route("/api/track-cv", post(tracking::handle_track_cv))
        .route("/api/heartbeat", post(tracking::handle_heartbeat))
        // Admin API
        .route("/api/admin/login", post(admin::handle_login))
        .route("/api/admin/overview", get(admin::handle_overview))
        .route("/api/admin/users", get(admin::handle_users))
        .route("/api/admin/activity", get(admin::handle_activity))
        .with_state(state)
}
