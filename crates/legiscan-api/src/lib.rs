//! LegiScan API crate - axum HTTP server and route handlers.
//!
//! Serves the bill processing pipeline (`/process`), follow-up questions
//! (`/ask`), session issuance, health, the landing page and rendered charts.

pub mod error;
pub mod handlers;
pub mod page;
pub mod routes;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
