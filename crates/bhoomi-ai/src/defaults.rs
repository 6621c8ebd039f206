//! Documented defaults for field repair and the canned fallback record.
//!
//! Repair defaults are deliberately terse single entries: they fill a gap in
//! an otherwise usable response. The fallback record is the full low-confidence
//! analysis returned when the response cannot be decoded at all.

use bhoomi_core::{AnalysisRecord, ApplicableLaw, CaseSummary, Precedent, Strategies};

/// Score used when the model's `confidence_score` is missing, non-numeric or out of range.
pub const DEFAULT_CONFIDENCE: u8 = 6;

/// Score carried by the fallback record.
pub const FALLBACK_CONFIDENCE: u8 = 3;

pub const DEFAULT_TIMELINE: &str = "3-6 months";
pub const DEFAULT_COSTS: &str = "₹50,000 - ₹2,00,000";

pub fn case_summary() -> CaseSummary {
    CaseSummary {
        facts: "Case analysis completed".into(),
        claims: "Legal claims identified".into(),
        dispute_nature: "Property dispute".into(),
    }
}

pub fn legal_issues() -> Vec<String> {
    vec!["Property law analysis required".into()]
}

pub fn applicable_laws() -> Vec<ApplicableLaw> {
    vec![ApplicableLaw {
        law: "Karnataka Land Revenue Act".into(),
        relevance: "Property matters".into(),
    }]
}

pub fn missing_evidence() -> Vec<String> {
    vec!["Property documents".into()]
}

pub fn strategies() -> Strategies {
    Strategies {
        plaintiff: vec!["Legal consultation".into()],
        defendant: vec!["Document review".into()],
    }
}

pub fn next_steps() -> Vec<String> {
    vec!["Consult legal expert".into()]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The fixed record returned when model output cannot be decoded.
///
/// Its low score tells the caller that professional review is advised.
pub fn fallback_record() -> AnalysisRecord {
    AnalysisRecord {
        case_summary: CaseSummary {
            facts: "AI analysis completed but response format needs review.".into(),
            claims: "Please consult with a legal expert for detailed analysis.".into(),
            dispute_nature: "Property dispute requiring professional legal review.".into(),
        },
        legal_issues: strings(&[
            "Property rights and ownership",
            "Legal documentation and compliance",
            "Jurisdictional requirements",
        ]),
        applicable_laws: vec![
            ApplicableLaw {
                law: "Karnataka Land Revenue Act, 1964".into(),
                relevance: "Governs land records and revenue matters in Karnataka".into(),
            },
            ApplicableLaw {
                law: "Registration Act, 1908".into(),
                relevance: "Governs property registration and documentation".into(),
            },
        ],
        missing_evidence: strings(&[
            "Property title documents",
            "Survey settlement records",
            "Revenue records (Pahani/Khata)",
            "Registration documents",
        ]),
        strategies: Strategies {
            plaintiff: strings(&[
                "Gather all property documents",
                "Consult with a property lawyer",
                "Verify title and ownership records",
            ]),
            defendant: strings(&[
                "Review all claims and documents",
                "Seek legal counsel",
                "Prepare counter-documentation",
            ]),
        },
        confidence_score: FALLBACK_CONFIDENCE,
        next_steps: strings(&[
            "Consult with a qualified property lawyer in Bangalore",
            "Gather all relevant property documents",
            "Verify records with revenue authorities",
            "Consider mediation before litigation",
        ]),
        precedents: vec![Precedent {
            case: "Karnataka High Court precedents on property disputes".into(),
            relevance: "Provides guidance on similar property matters in Karnataka".into(),
        }],
        estimated_timeline: "6-18 months depending on case complexity and court proceedings".into(),
        estimated_costs: "₹1,00,000 - ₹5,00,000 including legal fees and court costs".into(),
    }
}
