//! ATS Check: a fixed keyword-count heuristic over the serialized document.
//!
//! This is not NLP. The numbers must stay exactly as they are so scores match
//! what users have seen before:
//!   * 20 points per keyword found anywhere in the lowercased JSON text
//!   * 20 points when the section order has at least 6 entries
//!   * 20 points when the mean sentence length is under 120 characters
//!
//! The total is clamped to 100.

pub mod handlers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, Section};
use crate::order::SectionOrder;

pub const KEYWORDS: [&str; 5] = ["react", "javascript", "resume", "project", "experience"];
const POINTS_PER_KEYWORD: u32 = 20;
const STRUCTURE_POINTS: u32 = 20;
const READABILITY_POINTS: u32 = 20;
const MIN_SECTIONS: usize = 6;
const MAX_MEAN_SENTENCE_LEN: f64 = 120.0;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    pub feedback: Vec<String>,
}

/// Carried in `AppState` as `Arc<dyn AtsScorer>`.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        document: &ResumeDocument,
        order: &SectionOrder,
    ) -> Result<AtsReport, AppError>;
}

pub struct KeywordAtsScorer;

#[async_trait]
impl AtsScorer for KeywordAtsScorer {
    async fn score(
        &self,
        document: &ResumeDocument,
        order: &SectionOrder,
    ) -> Result<AtsReport, AppError> {
        let text = ats_text(document).map_err(|e| AppError::Internal(e.into()))?;
        Ok(score_text(&text, order.len()))
    }
}

/// Lowercased JSON of `document`. Personal Info fields that were never typed
/// are left out, matching documents saved before any contact field was filled.
pub fn ats_text(document: &ResumeDocument) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(document)?;
    if let Some(Value::Object(info)) = value.get_mut(Section::PersonalInfo.name()) {
        info.retain(|_, field| !matches!(field, Value::String(s) if s.is_empty()));
    }
    Ok(value.to_string().to_lowercase())
}

/// Scores already-lowercased `text` for an order of `order_len` sections.
pub fn score_text(text: &str, order_len: usize) -> AtsReport {
    let mut score = 0;
    let mut feedback = Vec::with_capacity(3);

    let matched = KEYWORDS.iter().filter(|k| text.contains(*k)).count();
    score += matched as u32 * POINTS_PER_KEYWORD;
    feedback.push(if matched < KEYWORDS.len() {
        "Add more relevant keywords."
    } else {
        "Great keyword coverage!"
    });

    if order_len >= MIN_SECTIONS {
        score += STRUCTURE_POINTS;
        feedback.push("Good section structure.");
    } else {
        feedback.push("Add more sections.");
    }

    if mean_sentence_len(text) < MAX_MEAN_SENTENCE_LEN {
        score += READABILITY_POINTS;
        feedback.push("Good readability.");
    } else {
        feedback.push("Shorten your sentences.");
    }

    AtsReport {
        score: score.min(MAX_SCORE),
        feedback: feedback.into_iter().map(String::from).collect(),
    }
}

/// Mean length of the non-empty pieces between `.`, `!` and `?`, counted in
/// UTF-16 code units. Zero pieces divide by one.
fn mean_sentence_len(text: &str) -> f64 {
    let (count, total) = text
        .split(['.', '!', '?'])
        .filter(|s| !s.is_empty())
        .fold((0usize, 0usize), |(n, sum), s| {
            (n + 1, sum + s.encode_utf16().count())
        });
    total as f64 / count.max(1) as f64
}
