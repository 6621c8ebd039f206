//! Per-user case statistics.

use std::collections::BTreeMap;

use bhoomi_core::{CaseRecord, CaseStatus, DisputeCategory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Number of cases listed in [`UserStats::recent_cases`].
pub const RECENT_CASES: usize = 5;

/// Listing view of a case, without the description or analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseListItem {
    pub id: Uuid,
    pub title: String,
    pub dispute_type: DisputeCategory,
    pub confidence_score: u8,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&CaseRecord> for CaseListItem {
    fn from(c: &CaseRecord) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            dispute_type: c.dispute_type,
            confidence_score: c.confidence_score,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_cases: usize,
    pub cases_by_type: BTreeMap<DisputeCategory, usize>,
    /// Mean confidence score rounded to two decimals; 0 with no cases.
    pub average_confidence: f64,
    pub recent_cases: Vec<CaseListItem>,
}

impl UserStats {
    /// Summarise cases given newest first.
    pub fn from_cases<'a>(cases: impl IntoIterator<Item = &'a CaseRecord>) -> Self {
        let mut total_cases = 0usize;
        let mut score_sum = 0u64;
        let mut cases_by_type = BTreeMap::new();
        let mut recent_cases = Vec::with_capacity(RECENT_CASES);

        for case in cases {
            total_cases += 1;
            score_sum += u64::from(case.confidence_score);
            *cases_by_type.entry(case.dispute_type).or_insert(0) += 1;
            if recent_cases.len() < RECENT_CASES {
                recent_cases.push(CaseListItem::from(case));
            }
        }

        let average_confidence = if total_cases == 0 {
            0.0
        } else {
            let mean = score_sum as f64 / total_cases as f64;
            (mean * 100.0).round() / 100.0
        };

        Self {
            total_cases,
            cases_by_type,
            average_confidence,
            recent_cases,
        }
    }
}
