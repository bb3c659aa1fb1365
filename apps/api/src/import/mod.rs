//! Plain-text extraction from an uploaded PDF resume.
//!
//! The text is only shown back to the user; nothing is parsed into the
//! document.

pub mod handlers;

use bytes::Bytes;
use thiserror::Error;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no file was uploaded in field 'file'")]
    MissingFile,

    #[error("the uploaded file is not a PDF")]
    NotPdf,

    #[error("could not read text from the PDF: {0}")]
    Extract(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Extracts the text of every page. Runs on the blocking pool since parsing
/// is CPU-bound.
pub async fn extract_text(pdf: Bytes) -> Result<String, ImportError> {
    if !pdf.starts_with(b"%PDF-") {
        return Err(ImportError::NotPdf);
    }
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| ImportError::Task(e.to_string()))?
        .map_err(|e| ImportError::Extract(e.to_string()))?;
    tracing::info!(chars = text.len(), "Extracted PDF text");
    Ok(text)
}
