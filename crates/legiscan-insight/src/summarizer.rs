//! Summarization service for bill text.

use std::sync::Arc;

use legiscan_llm::{LlmError, LlmProvider};

/// Produces a short prose summary of a bill with one LLM call.
///
/// The full text is embedded verbatim. Nothing is truncated or chunked, so a
/// bill larger than the model's input limit surfaces as the provider's error.
#[derive(Clone)]
pub struct Summarizer {
    llm: Arc<dyn LlmProvider>,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Summarize `full_text`, returning the model's response unmodified.
    pub async fn summarize(&self, full_text: &str) -> Result<String, LlmError> {
        let prompt = build_summary_prompt(full_text);
        tracing::debug!(
            provider = self.llm.name(),
            text_len = full_text.len(),
            "Requesting bill summary"
        );
        self.llm.generate(&prompt).await
    }
}

/// The fixed summarization instruction wrapped around the bill text.
pub fn build_summary_prompt(full_text: &str) -> String {
    format!(
        "Please provide a concise summary of the following legislative bill:\n\n\
         {}\n\n\
         Summarize the key points and main objectives of the bill in about 3-5 sentences.",
        full_text
    )
}
