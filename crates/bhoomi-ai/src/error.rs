use thiserror::Error;

/// Failures of the model-invocation collaborator.
///
/// Malformed or partial model output is never an error; the normalizer
/// absorbs it.
#[derive(Debug, Error)]
pub enum AiError {
    #[cfg(feature = "gemini")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("empty response from model")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}
