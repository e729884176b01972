use thiserror::Error;

/// Top-level error type for the LegiScan backend.
///
/// Subsystem crates define their own error types. This one covers shared
/// concerns and is what the binary's composition root propagates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LegiscanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<toml::de::Error> for LegiscanError {
    fn from(err: toml::de::Error) -> Self {
        LegiscanError::Config(err.to_string())
    }
}

/// A specialized `Result` type for LegiScan operations.
pub type Result<T> = std::result::Result<T, LegiscanError>;
