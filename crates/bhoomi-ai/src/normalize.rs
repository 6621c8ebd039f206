//! Normalization of raw model output into an [`AnalysisRecord`].
//!
//! Model output is untrusted text: it may be fenced in markdown, truncated,
//! prose instead of JSON, or JSON with missing and mistyped fields. This module
//! turns any input into a record that satisfies every invariant of
//! [`AnalysisRecord::is_complete`]. It never fails.
//!
//! # Algorithm
//!
//! 1. Trim and strip a leading code fence (with any language tag) and a trailing fence.
//! 2. If nothing is left, return the fallback record.
//! 3. Decode as JSON. A syntax error, or a top-level value that is not an
//!    object, returns the fallback record.
//! 4. Repair field by field. A field that is absent or of the wrong shape is
//!    replaced wholesale by its documented default; nested objects are never
//!    partially merged.

use bhoomi_core::analysis::{MAX_CONFIDENCE, MIN_CONFIDENCE};
use bhoomi_core::{AnalysisRecord, ApplicableLaw, CaseSummary, Precedent, Strategies};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::defaults;

const FENCE: &str = "```";

/// Characters of raw output kept in log excerpts.
const EXCERPT_CHARS: usize = 200;

/// Why the fallback record was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing but whitespace or fence markers.
    Empty,
    /// Not decodable as JSON.
    Malformed,
    /// Valid JSON whose top-level value is not an object.
    NotAnObject,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Malformed => "malformed",
            Self::NotAnObject => "not-an-object",
        }
    }
}

/// How a record was obtained from the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every field decoded as supplied.
    Clean,
    /// Decoded, with the named fields replaced by defaults.
    Repaired(Vec<&'static str>),
    /// Not decodable; the fallback record was substituted.
    Fallback(FallbackReason),
}

impl Outcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub record: AnalysisRecord,
    pub outcome: Outcome,
}

/// Normalize raw model output into a complete record.
pub fn normalize(raw: &str) -> AnalysisRecord {
    normalize_detailed(raw).record
}

/// Normalize raw model output, reporting which path produced the record.
pub fn normalize_detailed(raw: &str) -> Normalized {
    let cleaned = strip_fences(raw);
    if cleaned.is_empty() || cleaned == FENCE {
        return fallback(raw, FallbackReason::Empty);
    }

    let obj = match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(obj)) => obj,
        Ok(_) => return fallback(raw, FallbackReason::NotAnObject),
        Err(e) => {
            debug!(error = %e, "model output is not valid JSON");
            return fallback(raw, FallbackReason::Malformed);
        }
    };

    let (record, repaired) = repair(obj);
    let outcome = if repaired.is_empty() {
        Outcome::Clean
    } else {
        debug!(fields = ?repaired, "repaired model output");
        Outcome::Repaired(repaired)
    };
    Normalized { record, outcome }
}

/// Remove markdown code fences surrounding a model response.
///
/// A language tag directly after the opening fence (` ```json `, ` ```JSON `)
/// is removed with it. Text without fences is returned trimmed.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

fn fallback(raw: &str, reason: FallbackReason) -> Normalized {
    let excerpt: String = raw.chars().take(EXCERPT_CHARS).collect();
    warn!(
        reason = reason.as_str(),
        raw_len = raw.len(),
        excerpt = %excerpt,
        "model output unusable, substituting fallback analysis"
    );
    Normalized {
        record: defaults::fallback_record(),
        outcome: Outcome::Fallback(reason),
    }
}

// ── Field repair ──

/// A field looked up in the decoded object.
enum Slot<T> {
    /// Key missing or `null`.
    Absent,
    /// Present but not decodable as `T`.
    Invalid,
    Valid(T),
}

fn take<T: DeserializeOwned>(obj: &mut Map<String, Value>, key: &str) -> Slot<T> {
    match obj.remove(key) {
        None | Some(Value::Null) => Slot::Absent,
        Some(v) => serde_json::from_value(v).map_or(Slot::Invalid, Slot::Valid),
    }
}

/// Collects the names of fields replaced by defaults.
struct Repairs(Vec<&'static str>);

impl Repairs {
    /// Keep a valid, accepted value; otherwise record the field and use its default.
    fn required<T: DeserializeOwned>(
        &mut self,
        obj: &mut Map<String, Value>,
        key: &'static str,
        accept: impl Fn(&T) -> bool,
        default: impl FnOnce() -> T,
    ) -> T {
        match take(obj, key) {
            Slot::Valid(v) if accept(&v) => v,
            _ => {
                self.0.push(key);
                default()
            }
        }
    }

    /// Optional fields: absence is silent, a wrong shape is a repair.
    fn optional<T: DeserializeOwned>(
        &mut self,
        obj: &mut Map<String, Value>,
        key: &'static str,
        accept: impl Fn(&T) -> bool,
        default: impl FnOnce() -> T,
    ) -> T {
        match take(obj, key) {
            Slot::Valid(v) if accept(&v) => v,
            Slot::Absent => default(),
            _ => {
                self.0.push(key);
                default()
            }
        }
    }

    fn confidence(&mut self, obj: &mut Map<String, Value>) -> u8 {
        match obj.remove("confidence_score").as_ref().and_then(coerce_confidence) {
            Some(score) => score,
            None => {
                self.0.push("confidence_score");
                defaults::DEFAULT_CONFIDENCE
            }
        }
    }
}

/// Accept only JSON numbers in [1, 10], truncating toward zero.
fn coerce_confidence(v: &Value) -> Option<u8> {
    let Value::Number(n) = v else {
        return None;
    };
    let n = n.as_f64()?;
    let range = f64::from(MIN_CONFIDENCE)..=f64::from(MAX_CONFIDENCE);
    range.contains(&n).then(|| n.trunc() as u8)
}

fn non_empty<T>(v: &Vec<T>) -> bool {
    !v.is_empty()
}

fn any<T>(_: &T) -> bool {
    true
}

fn repair(mut obj: Map<String, Value>) -> (AnalysisRecord, Vec<&'static str>) {
    let mut r = Repairs(Vec::new());
    let o = &mut obj;

    let case_summary = r.required::<CaseSummary>(o, "case_summary", any, defaults::case_summary);
    let legal_issues =
        r.required::<Vec<String>>(o, "legal_issues", non_empty, defaults::legal_issues);
    let applicable_laws =
        r.required::<Vec<ApplicableLaw>>(o, "applicable_laws", non_empty, defaults::applicable_laws);
    let missing_evidence =
        r.required::<Vec<String>>(o, "missing_evidence", non_empty, defaults::missing_evidence);
    let strategies = r.required::<Strategies>(
        o,
        "strategies",
        |s| !(s.plaintiff.is_empty() && s.defendant.is_empty()),
        defaults::strategies,
    );
    let confidence_score = r.confidence(o);
    let next_steps = r.required::<Vec<String>>(o, "next_steps", non_empty, defaults::next_steps);
    let precedents = r.optional::<Vec<Precedent>>(o, "precedents", any, Vec::new);
    let estimated_timeline = r.optional::<String>(
        o,
        "estimated_timeline",
        |s| !s.trim().is_empty(),
        || defaults::DEFAULT_TIMELINE.to_string(),
    );
    let estimated_costs = r.optional::<String>(
        o,
        "estimated_costs",
        |s| !s.trim().is_empty(),
        || defaults::DEFAULT_COSTS.to_string(),
    );

    let record = AnalysisRecord {
        case_summary,
        legal_issues,
        applicable_laws,
        missing_evidence,
        strategies,
        confidence_score,
        next_steps,
        precedents,
        estimated_timeline,
        estimated_costs,
    };
    (record, r.0)
}
