//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use legiscan_core::error::LegiscanError;

use crate::handlers;
use crate::state::AppState;

/// Bill text travels in `/ask` bodies, so allow more than axum's default.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Credentials are allowed so cross-origin front ends keep the session cookie.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    let static_files = ServeDir::new(&state.config.charts.output_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/start_session", post(handlers::start_session))
        .route("/process", post(handlers::process))
        .route("/ask", post(handlers::ask))
        .nest_service("/static", static_files)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind to the configured address and serve until the process exits.
pub async fn start_server(state: AppState) -> Result<(), LegiscanError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LegiscanError::Server(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("LegiScan API listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| LegiscanError::Server(e.to_string()))?;

    Ok(())
}
