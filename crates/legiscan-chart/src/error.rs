/// Errors from chart rendering.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("nothing to plot: {0}")]
    EmptyData(&'static str),

    #[error("font error: {0}")]
    Font(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("image encoding error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn render(e: impl std::fmt::Display) -> Self {
        ChartError::Render(e.to_string())
    }
}
