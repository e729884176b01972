//! API error type and JSON error response formatting.
//!
//! Every failure is reported as `{"error": "<message>"}` with a 4xx or 5xx
//! status.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use legiscan_chart::ChartError;
use legiscan_llm::LlmError;
use legiscan_scrape::ScrapeError;

/// Message returned when a bill page cannot be fetched or is not a bill page.
pub const SCRAPE_FAILED: &str = "Failed to scrape data from the provided URL";

/// Message returned for any failure while answering a question.
pub const ASK_FAILED: &str = "An error occurred processing your request";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - unusable URL, unreachable page or malformed body.
    BadRequest(String),
    /// 500 Internal Server Error - extraction, LLM or rendering failure.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        if err.is_fetch_failure() {
            tracing::warn!(error = %err, "Bill page could not be scraped");
            ApiError::BadRequest(SCRAPE_FAILED.to_string())
        } else {
            tracing::error!(error = %err, "Bill page has malformed content");
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        tracing::error!(error = %err, "LLM request failed");
        ApiError::Internal(err.to_string())
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        tracing::error!(error = %err, "Chart rendering failed");
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
