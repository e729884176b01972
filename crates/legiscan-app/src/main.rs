//! LegiScan server binary - composition root.
//!
//! 1. Load `.env`, parse CLI args and the TOML configuration
//! 2. Initialize tracing
//! 3. Build the fetcher, LLM provider and session store once
//! 4. Sweep expired sessions in the background
//! 5. Serve the HTTP API

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use legiscan_api::{start_server, AppState};
use legiscan_chat::{MemorySessionStore, SessionStore};
use legiscan_core::config::{LegiscanConfig, LlmProviderKind};
use legiscan_llm::create_llm_provider;
use legiscan_scrape::BillFetcher;

use crate::cli::CliArgs;

/// How often idle sessions are swept out of the store.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Drop expired sessions periodically so idle ones do not wait for the
/// next access to be reclaimed.
fn spawn_session_sweeper(store: Arc<MemorySessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = store.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, remaining = store.len(), "Session sweep");
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the API key may come from the environment.
    let dotenv = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config_file = args.resolve_config_path();
    let mut config = if config_file.exists() {
        LegiscanConfig::load(&config_file)?
    } else {
        LegiscanConfig::default()
    };
    config.server.port = args.resolve_port(config.server.port);
    config.server.host = args.resolve_host(&config.server.host);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);
    if args.mock_llm {
        config.llm.provider = LlmProviderKind::Mock;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting LegiScan v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env loaded"),
    }
    if config_file.exists() {
        tracing::info!(path = %config_file.display(), "Configuration loaded");
    } else {
        tracing::info!(path = %config_file.display(), "No configuration file, using defaults");
    }

    // Services, built once and shared by every request.
    let fetcher = BillFetcher::new(&config.scrape)?;
    let llm = create_llm_provider(&config.llm)?;
    tracing::info!(provider = llm.name(), model = %config.llm.model, "LLM provider ready");

    let store = Arc::new(MemorySessionStore::from_config(&config.session));
    spawn_session_sweeper(Arc::clone(&store));
    let sessions: Arc<dyn SessionStore> = store;
    tracing::info!(
        ttl_minutes = config.session.ttl_minutes,
        max_sessions = config.session.max_sessions,
        "Session store ready"
    );

    if let Err(e) = std::fs::create_dir_all(&config.charts.output_dir) {
        tracing::error!(path = %config.charts.output_dir, error = %e, "Failed to create chart directory");
        return Err(e.into());
    }

    let state = AppState::new(config, fetcher, llm, sessions);
    start_server(state).await?;

    Ok(())
}
