//! Chart rendering for bill data.
//!
//! Vote tallies become a pie chart returned inline as a PNG data URI.
//! Timelines become a dated chart written to a file on disk.

pub mod error;
mod font;
pub mod pie;
pub mod timeline;

pub use error::ChartError;
pub use pie::render_vote_pie;
pub use timeline::render_timeline;
