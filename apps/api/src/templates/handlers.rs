use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::view::ViewSettings;
use crate::state::AppState;
use crate::templates::TemplateId;

#[derive(Deserialize)]
pub struct TemplateChange {
    pub template: String,
}

/// GET /api/v1/view
pub async fn handle_get_view(State(state): State<AppState>) -> Json<ViewSettings> {
    Json(state.persistence.load_view_settings().await)
}

/// PUT /api/v1/view/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateChange>,
) -> Result<Json<ViewSettings>, AppError> {
    let template = TemplateId::parse_strict(&req.template).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown template '{}', expected one of: modern, classic, creative",
            req.template
        ))
    })?;
    state.persistence.save_template(template).await?;
    tracing::info!(%template, "Template selected");
    Ok(Json(state.persistence.load_view_settings().await))
}
