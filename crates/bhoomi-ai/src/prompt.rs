//! Prompt templates for property dispute analysis.
//!
//! Composition is a pure function of its inputs so the prompt sent for a
//! given case is reproducible even though the model's answer is not.

use bhoomi_core::DisputeCategory;

/// Domain instructions, the JSON contract, and confidence guidelines.
pub const SYSTEM_PROMPT: &str = "\
You are a legal AI assistant for Karnataka property law, advising on disputes in Bangalore (Bengaluru). \
Your knowledge covers the Karnataka Land Revenue Act, 1964, the Karnataka Land Reforms Act, 1961, \
the BBMP Act, 2020, the Bangalore Development Authority Act, 1976, the Transfer of Property Act, 1882, \
the Registration Act, 1908, the Hindu Succession Act, 1956, the Indian Succession Act, 1925, \
the Specific Relief Act, 1963 and the Limitation Act, 1963.

Analyze the case and respond ONLY in valid JSON format.

Required JSON structure:
{
    \"case_summary\": {
        \"facts\": \"Brief factual summary\",
        \"claims\": \"What parties claim\",
        \"dispute_nature\": \"Type of dispute\"
    },
    \"legal_issues\": [\"Key legal questions\"],
    \"applicable_laws\": [
        {\"law\": \"Law name\", \"relevance\": \"How it applies\"}
    ],
    \"missing_evidence\": [\"Required documents\"],
    \"strategies\": {
        \"plaintiff\": [\"Plaintiff strategies\"],
        \"defendant\": [\"Defendant strategies\"]
    },
    \"confidence_score\": 7,
    \"next_steps\": [\"Recommended actions\"],
    \"precedents\": [
        {\"case\": \"Case name and citation\", \"relevance\": \"Why it matters\"}
    ],
    \"estimated_timeline\": \"Duration estimate\",
    \"estimated_costs\": \"Cost estimate\"
}

Confidence Score Guidelines:
- 8-10: Clear facts, straightforward law, minimal missing evidence
- 6-7: Good facts, established law, some missing documents
- 4-5: Adequate facts, complex issues, significant missing evidence
- 1-3: Unclear facts, very complex legal issues, major gaps

confidence_score must be a whole number from 1 to 10.
Analyze each case individually based on the specific facts provided.";

/// Closing instruction appended after the composed prompt when calling the model.
pub const RESPONSE_DIRECTIVE: &str =
    "Respond with complete valid JSON only. Do not use markdown formatting.";

fn build_user_prompt(case_text: &str, category: &str, context: &str) -> String {
    format!(
        "Analyze this property law case for Bangalore, Karnataka:\n\
         \n\
         Case Details: {case_text}\n\
         Dispute Type: {category}\n\
         Context: {context}\n\
         \n\
         Provide analysis in the exact JSON format specified. Focus on the specific facts of this case."
    )
}

/// Compose the full analysis prompt for a case.
pub fn compose(case_text: &str, category: DisputeCategory) -> String {
    compose_raw(case_text, category.as_str())
}

/// Compose from an unchecked category string.
///
/// The literal `category` is injected as given; the context sentence falls
/// back to the `other` category when the value is not recognised.
pub fn compose_raw(case_text: &str, category: &str) -> String {
    let context = DisputeCategory::from_str_lenient(category).context();
    format!(
        "{SYSTEM_PROMPT}\n\n{}",
        build_user_prompt(case_text, category, context)
    )
}
