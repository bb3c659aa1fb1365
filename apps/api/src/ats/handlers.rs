use axum::{extract::State, Json};

use crate::ats::AtsReport;
use crate::errors::AppError;
use crate::render::html::NO_RESUME_MESSAGE;
use crate::state::AppState;

/// GET /api/v1/ats
pub async fn handle_ats_check(State(state): State<AppState>) -> Result<Json<AtsReport>, AppError> {
    let document = state
        .persistence
        .load_document()
        .await
        .ok_or_else(|| AppError::NotFound(NO_RESUME_MESSAGE.to_string()))?;
    let order = state.persistence.load_section_order().await;
    let report = state.ats_scorer.score(&document, &order).await?;
    tracing::debug!(score = report.score, "ATS check");
    Ok(Json(report))
}
