//! Export pipeline: capture the laid-out resume and encode it as PDF or PNG,
//! or hand the static print document to the platform print dialog.
//!
//! Every capture runs as an `ExportJob`:
//!
//! ```text
//! Idle ──start──▶ Capturing ──ok──▶ Succeeded
//!                     │
//!                     └──err──▶ Failed
//! ```
//!
//! The activity indicator is held by an RAII guard for the lifetime of the
//! capture, so it is cleared on success, on failure, and when the request is
//! dropped mid-capture. Failures are surfaced once and never retried.

pub mod handlers;
pub mod paginate;
pub mod pdf;
pub mod png;
pub mod print;
pub mod raster;

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ExportError {
    /// A cross-origin image made the capture unreadable.
    #[error("capture is tainted by cross-origin image {0}")]
    TaintedCanvas(String),

    #[error("nothing to capture")]
    EmptyCapture,

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("capture task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
}

impl ExportFormat {
    pub fn progress_message(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "Generating PDF, please wait...",
            ExportFormat::Png => "Generating image, please wait...",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "Failed to generate PDF. Please try again.",
            ExportFormat::Png => "Failed to generate image. Please try again.",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "resume.pdf",
            ExportFormat::Png => "resume.png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
        }
    }
}

/// A capture that failed, with the format it was for.
#[derive(Debug, Error)]
#[error("{format:?} export failed: {source}")]
pub struct ExportFailed {
    pub format: ExportFormat,
    #[source]
    pub source: ExportError,
}

impl ExportFailed {
    pub fn user_message(&self) -> &'static str {
        self.format.failure_message()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Idle,
    Capturing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportStatus {
    pub state: JobState,
    pub format: Option<ExportFormat>,
    /// Progress text while capturing, the failure text after a failure.
    pub message: Option<String>,
}

impl Default for ExportStatus {
    fn default() -> Self {
        Self {
            state: JobState::Idle,
            format: None,
            message: None,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    /// Id of the most recent job; older guards never overwrite a newer job.
    job: u64,
    status: ExportStatus,
}

/// Shared "please wait" indicator. Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct ActivityIndicator {
    slot: Arc<Mutex<Slot>>,
}

impl ActivityIndicator {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A poisoned slot only holds plain status data.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn status(&self) -> ExportStatus {
        self.lock().status.clone()
    }

    /// Moves to `Capturing` and returns the guard that ends the job.
    pub fn begin(&self, format: ExportFormat) -> ExportJob {
        let mut slot = self.lock();
        slot.job += 1;
        slot.status = ExportStatus {
            state: JobState::Capturing,
            format: Some(format),
            message: Some(format.progress_message().to_string()),
        };
        info!(job = slot.job, ?format, "Export started");
        ExportJob {
            indicator: self.clone(),
            job: slot.job,
            format,
            finished: false,
        }
    }

    fn finish(&self, job: u64, state: JobState, message: Option<String>) {
        let mut slot = self.lock();
        if slot.job != job {
            return;
        }
        slot.status.state = state;
        slot.status.message = message;
    }
}

/// One capture in flight. Dropping an unfinished job marks it failed.
#[derive(Debug)]
pub struct ExportJob {
    indicator: ActivityIndicator,
    job: u64,
    format: ExportFormat,
    finished: bool,
}

impl ExportJob {
    /// Ends the job with the capture outcome, converting failures into
    /// `ExportFailed` for the caller.
    pub fn complete<T>(mut self, outcome: Result<T, ExportError>) -> Result<T, ExportFailed> {
        self.finished = true;
        match outcome {
            Ok(value) => {
                info!(job = self.job, format = ?self.format, "Export succeeded");
                self.indicator.finish(self.job, JobState::Succeeded, None);
                Ok(value)
            }
            Err(source) => {
                error!(job = self.job, format = ?self.format, "Export failed: {source}");
                self.indicator.finish(
                    self.job,
                    JobState::Failed,
                    Some(self.format.failure_message().to_string()),
                );
                Err(ExportFailed {
                    format: self.format,
                    source,
                })
            }
        }
    }
}

impl Drop for ExportJob {
    fn drop(&mut self) {
        if !self.finished {
            self.indicator.finish(
                self.job,
                JobState::Failed,
                Some(self.format.failure_message().to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_starts_idle() {
        assert_eq!(ActivityIndicator::default().status().state, JobState::Idle);
    }

    #[test]
    fn test_success_path_clears_message() {
        let indicator = ActivityIndicator::default();
        let job = indicator.begin(ExportFormat::Pdf);
        let status = indicator.status();
        assert_eq!(status.state, JobState::Capturing);
        assert_eq!(status.message.as_deref(), Some("Generating PDF, please wait..."));

        assert_eq!(job.complete(Ok::<_, ExportError>(7)).unwrap(), 7);
        let status = indicator.status();
        assert_eq!(status.state, JobState::Succeeded);
        assert_eq!(status.message, None);
    }

    #[test]
    fn test_failure_path_reports_user_message() {
        let indicator = ActivityIndicator::default();
        let job = indicator.begin(ExportFormat::Png);
        let err = job
            .complete::<()>(Err(ExportError::EmptyCapture))
            .unwrap_err();
        assert_eq!(err.user_message(), "Failed to generate image. Please try again.");
        assert_eq!(indicator.status().state, JobState::Failed);
    }

    #[test]
    fn test_dropped_job_is_released_as_failed() {
        let indicator = ActivityIndicator::default();
        drop(indicator.begin(ExportFormat::Pdf));
        let status = indicator.status();
        assert_eq!(status.state, JobState::Failed);
        assert_eq!(
            status.message.as_deref(),
            Some("Failed to generate PDF. Please try again.")
        );
    }

    #[test]
    fn test_stale_job_does_not_overwrite_newer_one() {
        let indicator = ActivityIndicator::default();
        let first = indicator.begin(ExportFormat::Pdf);
        let second = indicator.begin(ExportFormat::Png);
        first.complete(Ok::<_, ExportError>(())).unwrap();
        assert_eq!(indicator.status().state, JobState::Capturing);
        assert_eq!(indicator.status().format, Some(ExportFormat::Png));
        second.complete(Ok::<_, ExportError>(())).unwrap();
        assert_eq!(indicator.status().state, JobState::Succeeded);
    }
}
