//! Analysis layer: prompt composition, model invocation, and normalization of
//! model output into a schema-guaranteed [`AnalysisRecord`](bhoomi_core::AnalysisRecord).

pub mod client;
pub mod defaults;
mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod normalize;
pub mod prompt;
mod service;

pub use client::{GenerationConfig, ModelClient};
pub use error::AiError;
#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use normalize::{FallbackReason, Normalized, Outcome, normalize, normalize_detailed, strip_fences};
pub use prompt::{compose, compose_raw};
pub use service::CaseAnalyzer;
