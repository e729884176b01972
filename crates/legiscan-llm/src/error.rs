use std::time::Duration;

/// Errors from an LLM request. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("{provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },
    #[error("{provider} rejected the API key")]
    AuthFailed { provider: String },
    #[error("{provider} rate limit exceeded")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },
    #[error("{provider} returned an invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
    #[error("API key not set, export {env}")]
    MissingApiKey { env: String },
}
