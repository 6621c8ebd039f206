//! Normalized legal analysis of a property dispute.
//!
//! Field names serialise in snake_case so a stored record matches the JSON
//! object the model is asked to produce.

use serde::{Deserialize, Serialize};

/// Lowest and highest admissible confidence scores.
pub const MIN_CONFIDENCE: u8 = 1;
pub const MAX_CONFIDENCE: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub facts: String,
    pub claims: String,
    pub dispute_nature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicableLaw {
    pub law: String,
    pub relevance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategies {
    pub plaintiff: Vec<String>,
    pub defendant: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precedent {
    pub case: String,
    pub relevance: String,
}

/// The schema-guaranteed analysis returned by the response normalizer.
///
/// Every field is always present. Required guidance lists (`legal_issues`,
/// `applicable_laws`, `missing_evidence`, `next_steps`) are never empty and
/// `confidence_score` is always within [1, 10].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub case_summary: CaseSummary,
    pub legal_issues: Vec<String>,
    pub applicable_laws: Vec<ApplicableLaw>,
    pub missing_evidence: Vec<String>,
    pub strategies: Strategies,
    pub confidence_score: u8,
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub precedents: Vec<Precedent>,
    pub estimated_timeline: String,
    pub estimated_costs: String,
}

impl AnalysisRecord {
    /// Check the structural guarantees of a normalized record: score in
    /// [1, 10], the four guidance lists non-empty, and at least one side of
    /// `strategies` non-empty.
    ///
    /// The summary strings are not inspected; their presence is guaranteed
    /// by the type.
    pub fn is_complete(&self) -> bool {
        (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&self.confidence_score)
            && !self.legal_issues.is_empty()
            && !self.applicable_laws.is_empty()
            && !self.missing_evidence.is_empty()
            && !self.next_steps.is_empty()
            && !(self.strategies.plaintiff.is_empty() && self.strategies.defendant.is_empty())
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_score(self.confidence_score)
    }
}

/// Coarse reading of a confidence score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// 7-10: clear facts, straightforward law.
    High,
    /// 4-6: usable guidance with gaps.
    Medium,
    /// 1-3: preliminary; professional review advised.
    Low,
}

impl ConfidenceBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            7.. => Self::High,
            4..=6 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Self::High => {
                "High confidence: The analysis is based on clear facts and straightforward legal application."
            }
            Self::Medium => {
                "Medium confidence: The analysis provides good guidance, but some key information may be missing."
            }
            Self::Low => {
                "Low confidence: The analysis is preliminary due to insufficient facts or complex legal issues. \
                 Professional consultation is strongly recommended."
            }
        }
    }
}
