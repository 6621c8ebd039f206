//! Model-invocation seam.
//!
//! The analyzer is handed a [`ModelClient`] at construction; nothing in this
//! crate holds a global client.

use async_trait::async_trait;

use crate::AiError;

/// Sampling parameters sent with every analysis request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }
}

/// A language model that turns a prompt into raw text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model identifier, for logs.
    fn model_name(&self) -> &str;

    /// Generate a completion for `prompt`, returning the raw text.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

#[async_trait]
impl<C: ModelClient + ?Sized> ModelClient for std::sync::Arc<C> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        (**self).generate(prompt).await
    }
}
