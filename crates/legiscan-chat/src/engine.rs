//! Q&A engine: history bookkeeping around one LLM call per question.

use std::sync::Arc;

use legiscan_core::types::{ConversationTurn, SessionId};
use legiscan_llm::LlmProvider;

use crate::error::ChatError;
use crate::prompt::{build_qa_prompt, recent_turns};
use crate::store::SessionStore;

/// Turns included in a prompt when no explicit window is configured.
pub const DEFAULT_CONTEXT_TURNS: usize = 5;

/// Answers questions about a bill within a conversation session.
///
/// History updates are single atomic appends on the store. The LLM call
/// happens between the two appends and outside any lock, so a failed call
/// leaves the human turn recorded without a paired answer.
#[derive(Clone)]
pub struct QaEngine {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn SessionStore>,
    context_turns: usize,
}

impl QaEngine {
    pub fn new(llm: Arc<dyn LlmProvider>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            llm,
            store,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    /// Override how many trailing turns go into each prompt.
    pub fn with_context_turns(mut self, turns: usize) -> Self {
        self.context_turns = turns;
        self
    }

    /// Begin a new session with an empty history.
    pub fn start_session(&self) -> SessionId {
        let id = SessionId::new();
        self.store.put(id, Vec::new());
        tracing::info!(session_id = %id, "Conversation session started");
        id
    }

    /// Answer `question` against the bill `context`, recording both turns.
    pub async fn answer(
        &self,
        session: &SessionId,
        question: &str,
        context: &str,
    ) -> Result<String, ChatError> {
        let history = self
            .store
            .append(session, ConversationTurn::human(question));
        let prompt = build_qa_prompt(
            context,
            recent_turns(&history, self.context_turns),
            question,
        );

        tracing::debug!(
            session_id = %session,
            history_len = history.len(),
            context_len = context.len(),
            "Asking question"
        );

        let answer = self.llm.generate(&prompt).await.inspect_err(|e| {
            tracing::warn!(session_id = %session, error = %e, "Question failed");
        })?;

        self.store
            .append(session, ConversationTurn::assistant(answer.clone()));
        Ok(answer)
    }
}
