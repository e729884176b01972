//! LLM integration.
//!
//! Every caller talks to an [`LlmProvider`]: a prompt goes in, generated
//! text comes out. The provider is built once at startup by
//! [`create_llm_provider`] and shared behind an `Arc`.

mod error;
mod gemini;
mod mock;
mod provider;

pub use error::LlmError;
pub use gemini::GeminiProvider;
pub use mock::MockLlm;
pub use provider::LlmProvider;

use std::sync::Arc;

use secrecy::SecretString;

use legiscan_core::config::{LlmConfig, LlmProviderKind};

/// Create the configured LLM provider.
///
/// The Gemini provider reads its API key from the environment variable named
/// by `config.api_key_env`.
pub fn create_llm_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.provider {
        LlmProviderKind::Gemini => {
            let key = std::env::var(&config.api_key_env)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| LlmError::MissingApiKey {
                    env: config.api_key_env.clone(),
                })?;
            tracing::info!(model = %config.model, "Using Google Gemini (OpenAI-compatible API)");
            Ok(Arc::new(GeminiProvider::new(config, SecretString::from(key))?))
        }
        LlmProviderKind::Mock => {
            tracing::warn!("Using mock LLM provider; summaries and answers are placeholders");
            Ok(Arc::new(MockLlm::new()))
        }
    }
}
