pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::import::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::{ats, export, import, linkedin, order, persistence, render, sections, share, templates};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(render::handlers::handle_home))
        .route("/builder", get(render::handlers::handle_builder))
        .route("/preview", get(render::handlers::handle_preview))
        .route("/download", get(render::handlers::handle_download))
        .route("/resume/:id", get(render::handlers::handle_public_resume))
        // Document
        .route(
            "/api/v1/resume",
            get(sections::handlers::handle_get_resume).put(sections::handlers::handle_put_resume),
        )
        .route(
            "/api/v1/resume/sections/:section",
            patch(sections::handlers::handle_patch_section),
        )
        .route(
            "/api/v1/builder/sections",
            get(sections::handlers::handle_list_steps),
        )
        .route("/api/v1/events", get(persistence::handlers::handle_events))
        // View settings
        .route("/api/v1/view", get(templates::handlers::handle_get_view))
        .route(
            "/api/v1/view/template",
            put(templates::handlers::handle_set_template),
        )
        .route("/api/v1/view/reorder", post(order::handlers::handle_reorder))
        // Export
        .route("/api/v1/export/pdf", get(export::handlers::handle_export_pdf))
        .route("/api/v1/export/png", get(export::handlers::handle_export_png))
        .route(
            "/api/v1/export/print",
            get(export::handlers::handle_export_print),
        )
        .route(
            "/api/v1/export/status",
            get(export::handlers::handle_export_status),
        )
        .route("/api/v1/ats", get(ats::handlers::handle_ats_check))
        // Sharing, import, sign-in
        .route("/api/v1/shares", post(share::handlers::handle_publish))
        .route("/api/v1/shares/:id", get(share::handlers::handle_get_share))
        .route(
            "/api/v1/import/pdf",
            post(import::handlers::handle_import_pdf)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/v1/linkedin/authorize",
            get(linkedin::handlers::handle_authorize),
        )
        .with_state(state)
}
