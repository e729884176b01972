//! Bill page scraping: fetch the markup, then pull out the title, body,
//! vote breakdown and status timeline.

pub mod error;
pub mod extractor;
pub mod fetcher;

pub use error::ScrapeError;
pub use extractor::{extract, extract_all, extract_timeline, extract_votes, BillPage, ExtractedBill};
pub use fetcher::BillFetcher;
