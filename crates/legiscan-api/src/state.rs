//! Application state shared across all route handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use legiscan_chat::{QaEngine, SessionStore};
use legiscan_core::config::LegiscanConfig;
use legiscan_insight::Summarizer;
use legiscan_llm::LlmProvider;
use legiscan_scrape::BillFetcher;

/// Shared application state.
///
/// Every service is built once at startup and shared behind `Arc`, so
/// cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration. Read-only after startup.
    pub config: Arc<LegiscanConfig>,
    /// HTTP client for bill pages.
    pub fetcher: Arc<BillFetcher>,
    /// Bill summarization.
    pub summarizer: Summarizer,
    /// Follow-up question answering.
    pub qa: QaEngine,
    /// Conversation histories, shared with `qa`.
    pub sessions: Arc<dyn SessionStore>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: LegiscanConfig,
        fetcher: BillFetcher,
        llm: Arc<dyn LlmProvider>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let qa = QaEngine::new(Arc::clone(&llm), Arc::clone(&sessions))
            .with_context_turns(config.session.context_turns);
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            summarizer: Summarizer::new(llm),
            qa,
            sessions,
            start_time: Instant::now(),
        }
    }

    /// Where the timeline chart is written. Each render overwrites it.
    pub fn timeline_path(&self) -> PathBuf {
        let charts = &self.config.charts;
        PathBuf::from(&charts.output_dir).join(&charts.timeline_file)
    }

    /// URL path the timeline chart is served from.
    pub fn timeline_url(&self) -> String {
        format!("/static/{}", self.config.charts.timeline_file)
    }
}
