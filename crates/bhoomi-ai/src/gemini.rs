//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{AiError, GenerationConfig, ModelClient};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// HTTP client for the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: RequestConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestConfig {
    temperature: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client for `model` against the public Gemini endpoint.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key, model)
    }

    /// Create a client against a custom endpoint (proxies, test servers).
    ///
    /// `base_url` should be like `https://generativelanguage.googleapis.com` (no trailing slash).
    pub fn with_base_url(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: RequestConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                candidate_count: 1,
            },
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(resp: GenerateResponse) -> Option<String> {
    let candidate = resp.candidates.into_iter().next()?;
    if let Some(reason) = &candidate.finish_reason {
        debug!(finish_reason = %reason, "gemini candidate finished");
    }
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = self.endpoint();
        info!(model = %self.model, prompt_len = prompt.len(), "requesting gemini completion");

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(prompt))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = resp.json().await?;
        let text = extract_text(body).ok_or(AiError::EmptyResponse)?;
        info!(response_len = text.len(), "gemini completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::with_base_url(
            "http://localhost:8080/".into(),
            "test-key".into(),
            DEFAULT_MODEL.into(),
        )
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        assert_eq!(
            client().endpoint(),
            "http://localhost:8080/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let c = client();
        let value = serde_json::to_value(c.request_body("analyze this")).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "analyze this");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(value["generationConfig"]["candidateCount"], 1);
        assert!(value["generationConfig"]["temperature"].as_f64().unwrap() > 0.29);
    }

    #[test]
    fn extract_text_joins_parts() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"confidence_score\""}, {"text": ": 7}"}]},
                    "finishReason": "STOP"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).as_deref(), Some("{\"confidence_score\": 7}"));
    }

    #[test]
    fn extract_text_empty_candidates() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_text(resp).is_none());

        let resp: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(extract_text(resp).is_none());

        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"finishReason": "MAX_TOKENS", "content": {"parts": [{"text": "  "}]}}]}"#,
        )
        .unwrap();
        assert!(extract_text(resp).is_none());
    }
}
