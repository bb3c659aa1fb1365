use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::Section;
use crate::order::SectionOrder;
use crate::state::AppState;

/// A completed drag: `source` was dropped onto `target`.
#[derive(Deserialize)]
pub struct ReorderRequest {
    pub source: String,
    pub target: String,
}

/// POST /api/v1/view/reorder
/// The new order is saved before the response, so the download view and
/// exports see it immediately.
pub async fn handle_reorder(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<SectionOrder>, AppError> {
    let source = parse_section(&req.source)?;
    let target = parse_section(&req.target)?;
    let mut order = state.persistence.load_section_order().await;
    if order.reorder(source, target) {
        state.persistence.save_section_order(&order).await?;
        tracing::info!(%source, %target, "Sections reordered");
    }
    Ok(Json(order))
}

fn parse_section(name: &str) -> Result<Section, AppError> {
    Section::from_name(name)
        .ok_or_else(|| AppError::Validation(format!("Unknown section '{name}'")))
}
