//! Prompt construction for bill Q&A.

use legiscan_core::types::ConversationTurn;

const PREAMBLE: &str = "You are an AI assistant specializing in explaining legislation and general \
political topics. Your primary source of information is the provided bill text, but you can also \
draw on your broader knowledge to provide context or explanations when necessary. Please respond \
to the following question about a bill or related topics.";

const GUIDELINES: &str = "Guidelines for your response:\n\
1. If the answer is directly available in the bill text, use that information primarily.\n\
2. If the question is related to the bill but not directly answered in the text, you may provide \
an answer based on your general knowledge, clearly stating that this information is not from the \
bill itself.\n\
3. If the question is about politics or legislation in general, even if not directly related to \
the bill, you may answer using your broader knowledge.\n\
4. Always be polite, informative, and as comprehensive as possible.\n\
5. If you're unsure or the information isn't available, say so honestly.\n\
6. Try to relate your answer back to the bill or its context whenever possible.";

/// Build the grounded Q&A prompt.
///
/// `recent` is rendered oldest to newest, each turn as `Human: ...` or
/// `AI: ...`, joined by single spaces. The bill text is embedded verbatim.
pub fn build_qa_prompt(context: &str, recent: &[ConversationTurn], question: &str) -> String {
    let history = recent
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{PREAMBLE}\n\n\
         Context (Bill Text):\n{context}\n\n\
         Conversation History:\n{history}\n\n\
         Please answer the following question:\n{question}\n\n\
         {GUIDELINES}\n\n\
         Provide a detailed and courteous response."
    )
}

/// The trailing `n` turns of `history`.
pub fn recent_turns(history: &[ConversationTurn], n: usize) -> &[ConversationTurn] {
    &history[history.len().saturating_sub(n)..]
}
