//! Case submissions and stored cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::AnalysisRecord;
use crate::dispute::DisputeCategory;

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 500;
pub const CASE_TEXT_MIN_CHARS: usize = 50;
pub const CASE_TEXT_MAX_CHARS: usize = 10_000;
pub const CASE_TEXT_MIN_WORDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    #[error("title must be between 5 and 500 characters (got {0})")]
    TitleLength(usize),

    #[error("case description must be at least 50 characters long (got {0})")]
    TextTooShort(usize),

    #[error("case description must be at most 10000 characters long (got {0})")]
    TextTooLong(usize),

    #[error("case description must contain at least 20 words (got {0})")]
    TooFewWords(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Active,
    Archived,
    Deleted,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

/// A case as submitted, before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCase {
    pub title: String,
    pub case_text: String,
    pub dispute_type: DisputeCategory,
}

impl NewCase {
    /// Validate and trim a submission.
    ///
    /// The analysis prompt assumes a description of at least 50 characters
    /// and 20 words; anything shorter is rejected here rather than sent to
    /// the model.
    pub fn validate(self) -> Result<Self, CaseError> {
        let title = validate_title(&self.title)?;
        let case_text = validate_case_text(&self.case_text)?;
        Ok(Self {
            title,
            case_text,
            dispute_type: self.dispute_type,
        })
    }
}

pub fn validate_title(title: &str) -> Result<String, CaseError> {
    let title = title.trim();
    let n = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&n) {
        return Err(CaseError::TitleLength(n));
    }
    Ok(title.to_string())
}

pub fn validate_case_text(text: &str) -> Result<String, CaseError> {
    let text = text.trim();
    let n = text.chars().count();
    if n < CASE_TEXT_MIN_CHARS {
        return Err(CaseError::TextTooShort(n));
    }
    if n > CASE_TEXT_MAX_CHARS {
        return Err(CaseError::TextTooLong(n));
    }
    let words = text.split_whitespace().count();
    if words < CASE_TEXT_MIN_WORDS {
        return Err(CaseError::TooFewWords(words));
    }
    Ok(text.to_string())
}

/// A stored, analysed case.
///
/// `confidence_score` mirrors `analysis.confidence_score` so listings and
/// statistics can read it without opening the analysis blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub case_text: String,
    pub dispute_type: DisputeCategory,
    pub analysis: AnalysisRecord,
    pub confidence_score: u8,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRecord {
    pub fn new(user_id: &str, case: NewCase, analysis: AnalysisRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: case.title,
            case_text: case.case_text,
            dispute_type: case.dispute_type,
            confidence_score: analysis.confidence_score,
            analysis,
            status: CaseStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the analysis with a fresh record from a re-analysis.
    pub fn replace_analysis(&mut self, analysis: AnalysisRecord) {
        self.confidence_score = analysis.confidence_score;
        self.analysis = analysis;
    }

    /// Description and category to send for analysis once `update` is
    /// applied, or `None` when the stored analysis still holds. `force`
    /// re-analyzes even an unchanged case.
    pub fn reanalysis_input<'a>(
        &'a self,
        update: &'a CaseUpdate,
        force: bool,
    ) -> Option<(&'a str, DisputeCategory)> {
        if !(force || update.needs_reanalysis()) {
            return None;
        }
        let text = update.case_text.as_deref().unwrap_or(&self.case_text);
        let category = update.dispute_type.unwrap_or(self.dispute_type);
        Some((text, category))
    }
}

/// Partial update of a stored case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseUpdate {
    pub title: Option<String>,
    pub case_text: Option<String>,
    pub dispute_type: Option<DisputeCategory>,
    pub status: Option<CaseStatus>,
}

impl CaseUpdate {
    /// Validate any supplied title or case text, trimming them.
    pub fn validate(self) -> Result<Self, CaseError> {
        Ok(Self {
            title: self.title.as_deref().map(validate_title).transpose()?,
            case_text: self.case_text.as_deref().map(validate_case_text).transpose()?,
            dispute_type: self.dispute_type,
            status: self.status,
        })
    }

    /// A changed description or category invalidates the stored analysis.
    pub fn needs_reanalysis(&self) -> bool {
        self.case_text.is_some() || self.dispute_type.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.case_text.is_none()
            && self.dispute_type.is_none()
            && self.status.is_none()
    }
}
