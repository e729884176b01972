//! In-process provider for offline runs and tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::provider::LlmProvider;

enum Reply {
    Echo,
    Fixed(String),
    Queue(VecDeque<String>),
    Fail(String),
}

/// Mock LLM that records every prompt it receives.
///
/// By default it answers with a short placeholder naming the prompt size.
pub struct MockLlm {
    reply: Mutex<Reply>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::with_reply(Reply::Echo)
    }

    /// Always answer with `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fixed(text.into()))
    }

    /// Answer with each of `texts` in turn, then fall back to the placeholder.
    pub fn with_responses<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reply(Reply::Queue(texts.into_iter().map(Into::into).collect()))
    }

    /// Fail every request with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(reason.into()))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder(prompt: &str) -> String {
    format!("[mock] response to a {}-character prompt", prompt.chars().count())
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let mut reply = self.reply.lock().map_err(|e| LlmError::RequestFailed {
            provider: "mock".to_string(),
            reason: format!("reply lock poisoned: {}", e),
        })?;

        match &mut *reply {
            Reply::Echo => Ok(placeholder(prompt)),
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Queue(queue) => Ok(queue.pop_front().unwrap_or_else(|| placeholder(prompt))),
            Reply::Fail(reason) => Err(LlmError::RequestFailed {
                provider: "mock".to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echo_records_prompts() {
        let llm = MockLlm::new();
        let out = llm.generate("abc").await.unwrap();
        assert_eq!(out, "[mock] response to a 3-character prompt");
        assert_eq!(llm.prompts(), vec!["abc".to_string()]);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let llm = MockLlm::with_response("A summary.");
        assert_eq!(llm.generate("one").await.unwrap(), "A summary.");
        assert_eq!(llm.generate("two").await.unwrap(), "A summary.");
        assert_eq!(llm.last_prompt().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_mock_queue_then_placeholder() {
        let llm = MockLlm::with_responses(["first", "second"]);
        assert_eq!(llm.generate("a").await.unwrap(), "first");
        assert_eq!(llm.generate("b").await.unwrap(), "second");
        assert!(llm.generate("c").await.unwrap().starts_with("[mock]"));
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let llm = MockLlm::failing("quota exhausted");
        let err = llm.generate("x").await.unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed { ref reason, .. } if reason == "quota exhausted"));
        // Failed calls are still recorded.
        assert_eq!(llm.call_count(), 1);
    }
}
