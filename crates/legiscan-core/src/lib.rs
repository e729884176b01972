pub mod config;
pub mod error;
pub mod types;

pub use config::LegiscanConfig;
pub use error::{LegiscanError, Result};
pub use types::*;
