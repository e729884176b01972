//! Route handler functions for all API endpoints.

use std::path::Path;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use legiscan_chart::{render_timeline, render_vote_pie, ChartError};
use legiscan_core::config::ChartConfig;
use legiscan_core::types::{TimelineEvent, VoteTally};
use legiscan_scrape::extract_all;

use crate::error::{ApiError, ASK_FAILED};
use crate::page::INDEX_HTML;
use crate::session::{session_cookie, session_from_jar};
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Request body for POST /process.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub title: String,
    pub summary: String,
    pub full_text: String,
    #[serde(default, skip_serializing_if = "VoteTally::is_empty")]
    pub votes: VoteTally,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelineEvent>,
    /// Pie chart as a `data:image/png;base64,...` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_chart: Option<String>,
    /// URL path of the timeline image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_chart: Option<String>,
}

/// Request body for POST /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Bill text the question is about.
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET / - serve the single-page UI.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// GET /health - liveness and basic counters.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.sessions.len() as u64,
    })
}

/// POST /start_session - issue a fresh session with an empty history.
pub async fn start_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let id = state.qa.start_session();
    let jar = jar.add(session_cookie(&state.config.session.cookie_name, id));
    (
        jar,
        Json(MessageResponse {
            message: "Session started".to_string(),
        }),
    )
}

/// POST /process - fetch a bill page, summarize it and chart its votes and
/// timeline.
pub async fn process(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(url = %request.url, "Processing bill page");

    let markup = state.fetcher.fetch(&request.url).await?;
    let bill = extract_all(&markup)?;

    let summary = state.summarizer.summarize(&bill.record.full_text).await?;

    let votes = bill.votes.clone();
    let timeline = bill.timeline.clone();
    let charts = state.config.charts.clone();
    let timeline_path = state.timeline_path();
    let (vote_chart, timeline_written) = tokio::task::spawn_blocking(move || {
        render_charts(&votes, &timeline, &charts, &timeline_path)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("chart task failed: {}", e)))??;

    tracing::info!(
        title = %bill.record.title,
        has_full_text = bill.record.has_full_text(),
        votes = bill.votes.len(),
        timeline_events = bill.timeline.len(),
        "Bill processed"
    );

    Ok(Json(ProcessResponse {
        title: bill.record.title,
        summary,
        full_text: bill.record.full_text,
        votes: bill.votes,
        timeline: bill.timeline,
        vote_chart,
        timeline_chart: timeline_written.then(|| state.timeline_url()),
    }))
}

/// Render whichever charts have data. Returns the pie data URI and whether
/// the timeline image was written.
fn render_charts(
    votes: &VoteTally,
    timeline: &[TimelineEvent],
    charts: &ChartConfig,
    timeline_path: &Path,
) -> Result<(Option<String>, bool), ChartError> {
    let vote_chart = if votes.total() > 0 {
        Some(render_vote_pie(votes, charts.pie_size)?)
    } else {
        None
    };

    let timeline_written = !timeline.is_empty();
    if timeline_written {
        render_timeline(
            timeline,
            timeline_path,
            charts.timeline_width,
            charts.timeline_height,
        )?;
    }

    Ok((vote_chart, timeline_written))
}

/// POST /ask - answer a follow-up question within the caller's session.
///
/// Every failure, an unreadable body included, is reported as the generic
/// 500. Once the body parses, the session cookie is returned even when
/// answering fails, so a lazily created session stays reachable.
pub async fn ask(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> (CookieJar, Result<Json<AskResponse>, ApiError>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected question payload");
            return (jar, Err(ApiError::Internal(ASK_FAILED.to_string())));
        }
    };

    let cookie_name = &state.config.session.cookie_name;
    let id = match session_from_jar(&jar, cookie_name) {
        Some(id) => id,
        None => {
            let id = state.qa.start_session();
            tracing::debug!(session_id = %id, "No session cookie, started one");
            id
        }
    };
    let jar = jar.add(session_cookie(cookie_name, id));

    let result = state
        .qa
        .answer(&id, &request.question, &request.context)
        .await
        .map(|answer| Json(AskResponse { answer }))
        .map_err(|e| {
            tracing::error!(session_id = %id, error = %e, "Failed to answer question");
            ApiError::Internal(ASK_FAILED.to_string())
        });

    (jar, result)
}
