use axum::{extract::Multipart, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::import::{extract_text, ImportError};

#[derive(Serialize)]
pub struct ImportResponse {
    pub filename: Option<String>,
    pub text: String,
}

/// POST /api/v1/import/pdf
/// Multipart upload with the PDF in field `file`.
pub async fn handle_import_pdf(mut multipart: Multipart) -> Result<Json<ImportResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let text = extract_text(data).await?;
        return Ok(Json(ImportResponse { filename, text }));
    }
    Err(ImportError::MissingFile.into())
}
