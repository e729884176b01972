//! Error types for the Q&A engine.

use legiscan_llm::LlmError;

/// Errors from answering a question.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_from_llm_error() {
        let err: ChatError = LlmError::AuthFailed {
            provider: "gemini".to_string(),
        }
        .into();
        assert!(matches!(err, ChatError::Llm(LlmError::AuthFailed { .. })));
        assert_eq!(err.to_string(), "LLM error: gemini rejected the API key");
    }
}
