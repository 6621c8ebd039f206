use bhoomi_core::{AnalysisRecord, DisputeCategory};
use tracing::{info, warn};

use crate::normalize::{Outcome, normalize_detailed};
use crate::prompt::{RESPONSE_DIRECTIVE, compose};
use crate::{AiError, ModelClient};

/// Analyzes case descriptions with an injected model client.
///
/// Invocation failures (network, API errors, empty responses) are returned as
/// [`AiError`]. Anything the model does return is normalized into a complete
/// [`AnalysisRecord`].
pub struct CaseAnalyzer<C> {
    client: C,
}

impl<C: ModelClient> CaseAnalyzer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The exact text sent to the model for a case.
    pub fn request_prompt(case_text: &str, category: DisputeCategory) -> String {
        format!("{}\n\n{RESPONSE_DIRECTIVE}", compose(case_text, category))
    }

    pub async fn analyze(
        &self,
        case_text: &str,
        category: DisputeCategory,
    ) -> Result<AnalysisRecord, AiError> {
        info!(
            category = %category,
            model = self.client.model_name(),
            "starting case analysis"
        );

        let prompt = Self::request_prompt(case_text, category);
        let raw = self.client.generate(&prompt).await?;
        let normalized = normalize_detailed(&raw);

        match &normalized.outcome {
            Outcome::Fallback(reason) => warn!(
                reason = reason.as_str(),
                "analysis fell back to low-confidence record"
            ),
            Outcome::Repaired(fields) => info!(repaired = fields.len(), "analysis repaired"),
            Outcome::Clean => {}
        }
        info!(
            confidence_score = normalized.record.confidence_score,
            "case analysis completed"
        );
        Ok(normalized.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    const CASE: &str = "My two brothers and I inherited agricultural land near Devanahalli \
        from our father, who died without a will. My elder brother has sold a portion \
        to a developer without our consent.";

    /// Replays a fixed response and records the prompts it was given.
    struct ScriptedClient {
        response: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, prompt: &str) -> Result<String, AiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone().map_err(AiError::Other)
        }
    }

    #[tokio::test]
    async fn fenced_partial_response_is_repaired() {
        let analyzer = CaseAnalyzer::new(ScriptedClient::ok(
            "```json\n{\"confidence_score\": 9}\n```",
        ));
        let rec = analyzer
            .analyze(CASE, DisputeCategory::Inheritance)
            .await
            .unwrap();

        assert_eq!(rec.confidence_score, 9);
        assert_eq!(rec.case_summary, defaults::case_summary());
        assert_eq!(rec.legal_issues, defaults::legal_issues());
        assert_eq!(rec.applicable_laws, defaults::applicable_laws());
        assert_eq!(rec.missing_evidence, defaults::missing_evidence());
        assert_eq!(rec.next_steps, defaults::next_steps());
        assert_eq!(rec.strategies, defaults::strategies());
    }

    #[tokio::test]
    async fn prompt_sent_to_model() {
        let analyzer = CaseAnalyzer::new(ScriptedClient::ok("{}"));
        analyzer.analyze(CASE, DisputeCategory::Inheritance).await.unwrap();

        let prompts = analyzer.client().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(CASE));
        assert!(prompts[0].contains("Dispute Type: inheritance"));
        assert!(prompts[0].ends_with(RESPONSE_DIRECTIVE));
    }

    #[tokio::test]
    async fn prose_response_falls_back() {
        let analyzer = CaseAnalyzer::new(ScriptedClient::ok(
            "I'm sorry, I cannot provide legal advice.",
        ));
        let rec = analyzer
            .analyze(CASE, DisputeCategory::Other)
            .await
            .unwrap();
        assert_eq!(rec, defaults::fallback_record());
    }

    #[tokio::test]
    async fn invocation_errors_propagate() {
        let analyzer = CaseAnalyzer::new(ScriptedClient::failing("quota exceeded"));
        let err = analyzer
            .analyze(CASE, DisputeCategory::Tax)
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Other(ref m) if m == "quota exceeded"));
    }

    #[tokio::test]
    async fn shared_client_via_arc() {
        let client = Arc::new(ScriptedClient::ok("{\"confidence_score\": 4}"));
        let a = CaseAnalyzer::new(Arc::clone(&client));
        let b = CaseAnalyzer::new(Arc::clone(&client));
        let (ra, rb) = tokio::join!(
            a.analyze(CASE, DisputeCategory::Boundary),
            b.analyze(CASE, DisputeCategory::Mutation)
        );
        assert_eq!(ra.unwrap().confidence_score, 4);
        assert_eq!(rb.unwrap().confidence_score, 4);
        assert_eq!(client.prompts.lock().unwrap().len(), 2);
    }
}
