use async_trait::async_trait;

use crate::error::LlmError;

/// A text-generation backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &str;

    /// Generate a completion for a single user prompt.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
