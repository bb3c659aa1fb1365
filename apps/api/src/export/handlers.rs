use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::export::pdf::export_pdf;
use crate::export::png::export_png;
use crate::export::print::print_document;
use crate::export::{ExportFormat, ExportStatus};
use crate::layout::{layout_content, Viewport};
use crate::models::resume::ResumeDocument;
use crate::render::html::NO_RESUME_MESSAGE;
use crate::render::render_content;
use crate::state::AppState;
use crate::templates::bundle;

/// GET /api/v1/export/pdf
pub async fn handle_export_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    export(&state, ExportFormat::Pdf).await
}

/// GET /api/v1/export/png
pub async fn handle_export_png(State(state): State<AppState>) -> Result<Response, AppError> {
    export(&state, ExportFormat::Png).await
}

/// GET /api/v1/export/print
pub async fn handle_export_print(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let document = saved_document(&state).await?;
    let view = state.persistence.load_view_settings().await;
    Ok(Html(print_document(&state.views, &document, &view)?))
}

/// GET /api/v1/export/status
pub async fn handle_export_status(State(state): State<AppState>) -> Json<ExportStatus> {
    Json(state.activity.status())
}

async fn saved_document(state: &AppState) -> Result<ResumeDocument, AppError> {
    state
        .persistence
        .load_document()
        .await
        .ok_or_else(|| AppError::NotFound(NO_RESUME_MESSAGE.to_string()))
}

async fn export(state: &AppState, format: ExportFormat) -> Result<Response, AppError> {
    let document = saved_document(state).await?;
    let view = state.persistence.load_view_settings().await;
    let content = render_content(&document, &view.section_order, bundle(view.template_id));
    let layout = layout_content(&content, &Viewport::default());

    let job = state.activity.begin(format);
    let outcome = match format {
        ExportFormat::Pdf => export_pdf(state.rasterizer.as_ref(), &layout).await,
        ExportFormat::Png => export_png(state.rasterizer.as_ref(), &layout).await,
    };
    let bytes = job.complete(outcome)?;

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename()),
            ),
        ],
        bytes,
    )
        .into_response())
}
