//! LegiScan insight crate - bill summarization.

pub mod summarizer;

pub use summarizer::{build_summary_prompt, Summarizer};
