//! Conversational Q&A over a bill.
//!
//! Keeps a per-session rolling history, builds a prompt grounded in the bill
//! text and the most recent turns, and records each answer.

pub mod engine;
pub mod error;
pub mod prompt;
pub mod store;

pub use engine::QaEngine;
pub use error::ChatError;
pub use prompt::{build_qa_prompt, recent_turns};
pub use store::{MemorySessionStore, SessionStore};
