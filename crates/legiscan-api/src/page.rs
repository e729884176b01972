//! Embedded single-page UI served at `/`.

/// Landing page: URL form, summary, charts and follow-up chat.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_talks_to_api() {
        assert!(INDEX_HTML.starts_with("<!DOCTYPE html>"));
        assert!(INDEX_HTML.contains("/process"));
        assert!(INDEX_HTML.contains("/ask"));
        assert!(INDEX_HTML.contains("/start_session"));
    }
}
