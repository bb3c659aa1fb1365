use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::share::PublicShare;
use crate::render::html::{NO_PUBLIC_RESUME_MESSAGE, NO_RESUME_MESSAGE};
use crate::share::{publish, ShareLink};
use crate::state::AppState;

/// POST /api/v1/shares
pub async fn handle_publish(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ShareLink>), AppError> {
    let link = publish(&state.persistence, &state.config.public_base_url)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_RESUME_MESSAGE.to_string()))?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// GET /api/v1/shares/:id
pub async fn handle_get_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicShare>, AppError> {
    state
        .persistence
        .load_share(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NO_PUBLIC_RESUME_MESSAGE.to_string()))
}
