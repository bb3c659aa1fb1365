use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, Section};
use crate::sections::editor::{apply_patch, SectionPatch};
use crate::sections::{next, previous, registry, SectionShape};
use crate::state::AppState;

#[derive(Serialize)]
pub struct WizardStep {
    pub section: Section,
    pub slug: &'static str,
    pub shape: SectionShape,
    pub previous: Option<Section>,
    pub next: Option<Section>,
    /// Whether the saved document has nothing in this section yet.
    pub empty: bool,
}

/// GET /api/v1/resume
/// `null` when nothing has been saved (or the saved value is unreadable).
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<Option<ResumeDocument>> {
    Json(state.persistence.load_document().await)
}

/// PUT /api/v1/resume
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(document): Json<ResumeDocument>,
) -> Result<Json<ResumeDocument>, AppError> {
    state.persistence.save_document(&document).await?;
    Ok(Json(document))
}

/// PATCH /api/v1/resume/sections/:section
/// Applies one form edit and saves the result immediately.
pub async fn handle_patch_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<ResumeDocument>, AppError> {
    let section = Section::from_name(&section)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section '{section}'")))?;
    let current = state.persistence.load_document().await.unwrap_or_default();
    let updated = apply_patch(&current, section, &patch)?;
    state.persistence.save_document(&updated).await?;
    tracing::debug!(%section, op = patch.op(), "Applied section edit");
    Ok(Json(updated))
}

/// GET /api/v1/builder/sections
pub async fn handle_list_steps(State(state): State<AppState>) -> Json<Vec<WizardStep>> {
    let document = state.persistence.load_document().await;
    let steps = registry()
        .iter()
        .map(|spec| WizardStep {
            section: spec.section,
            slug: spec.section.slug(),
            shape: spec.shape,
            previous: previous(spec.section),
            next: next(spec.section),
            empty: document
                .as_ref()
                .map_or(true, |d| d.is_section_empty(spec.section)),
        })
        .collect();
    Json(steps)
}
