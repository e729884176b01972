//! Error types for fetching and parsing bill pages.

use legiscan_core::types::VoteCategory;

/// Errors from the fetcher and extractor.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("page has no title heading")]
    MissingTitle,
    #[error("cannot parse timeline date '{0}', expected 'Mon DD, YYYY'")]
    DateParse(String),
    #[error("invalid {category} vote count '{value}'")]
    InvalidCount { category: VoteCategory, value: String },
    #[error("malformed timeline entry: {0}")]
    MalformedTimeline(String),
    #[error("invalid selector '{0}'")]
    Selector(String),
}

impl ScrapeError {
    /// True when the page could not be obtained or lacks the structure every
    /// bill page has. These are reported to the caller as a bad request.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::InvalidUrl { .. } | ScrapeError::Network(_) | ScrapeError::MissingTitle
        )
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_error_display() {
        let err = ScrapeError::DateParse("2021-01-05".to_string());
        assert_eq!(
            err.to_string(),
            "cannot parse timeline date '2021-01-05', expected 'Mon DD, YYYY'"
        );

        let err = ScrapeError::InvalidCount {
            category: VoteCategory::NotVoting,
            value: "many".to_string(),
        };
        assert_eq!(err.to_string(), "invalid Not-voting vote count 'many'");

        let err = ScrapeError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(ScrapeError::Network("x".into()).is_fetch_failure());
        assert!(ScrapeError::MissingTitle.is_fetch_failure());
        assert!(ScrapeError::InvalidUrl {
            url: "nope".into(),
            reason: "relative URL without a base".into()
        }
        .is_fetch_failure());
        assert!(!ScrapeError::DateParse("x".into()).is_fetch_failure());
        assert!(!ScrapeError::MalformedTimeline("x".into()).is_fetch_failure());
    }
}
