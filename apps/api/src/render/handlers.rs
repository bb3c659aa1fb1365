use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::render::html::{DOWNLOAD_ACTIONS, NO_PUBLIC_RESUME_MESSAGE, NO_RESUME_MESSAGE};
use crate::render::{render, RenderMode};
use crate::state::AppState;
use crate::templates::bundle;

/// GET /
pub async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.home()?))
}

/// GET /builder
/// The first visit saves an empty document, so the other views have one.
pub async fn handle_builder(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let document = match state.persistence.load_document().await {
        Some(document) => document,
        None => {
            let document = ResumeDocument::default();
            state.persistence.save_document(&document).await?;
            tracing::info!("Created empty resume on first builder visit");
            document
        }
    };
    Ok(Html(state.views.builder(&document)?))
}

/// GET /preview
pub async fn handle_preview(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    resume_view(&state, "Resume Preview", RenderMode::Interactive).await
}

/// GET /download
pub async fn handle_download(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    resume_view(&state, "Download Resume", RenderMode::Static).await
}

async fn resume_view(
    state: &AppState,
    title: &str,
    mode: RenderMode,
) -> Result<Html<String>, AppError> {
    let Some(document) = state.persistence.load_document().await else {
        return Ok(Html(state.views.message_page(title, NO_RESUME_MESSAGE)?));
    };
    let view = state.persistence.load_view_settings().await;
    let tree = render(
        &document,
        &view.section_order,
        bundle(view.template_id),
        mode,
    );
    Ok(Html(
        state
            .views
            .resume_page(title, &tree, &DOWNLOAD_ACTIONS, false)?,
    ))
}

/// GET /resume/:id
pub async fn handle_public_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let title = "Resume";
    let Some(share) = state.persistence.load_share(&id).await else {
        return Ok(Html(
            state.views.message_page(title, NO_PUBLIC_RESUME_MESSAGE)?,
        ));
    };
    let tree = render(
        &share.document,
        &share.view.section_order,
        bundle(share.view.template_id),
        RenderMode::Static,
    );
    Ok(Html(state.views.resume_page(title, &tree, &[], false)?))
}
