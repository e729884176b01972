use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::Result;

/// Top-level configuration for the LegiScan backend.
///
/// Loaded from `~/.legiscan/config.toml` by default. Every section falls back
/// to its defaults, so a partial (or empty) file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegiscanConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

impl LegiscanConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LegiscanConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}

/// General application settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Origins allowed to call the API with credentials (session cookie).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Bill page fetching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// User-Agent header sent with every page fetch.
    pub user_agent: String,
    /// Request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("legiscan/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Which LLM backend answers prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    /// Google Gemini through its OpenAI-compatible endpoint.
    #[default]
    Gemini,
    /// Offline echo provider, no network access.
    Mock,
}

/// LLM provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Model name passed with each request.
    pub model: String,
    /// Request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::Gemini,
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout_secs: 120,
            api_key_env: "GOOGLE_API_KEY".to_string(),
        }
    }
}

/// Conversation session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session identifier.
    pub cookie_name: String,
    /// Idle minutes before a session is dropped.
    pub ttl_minutes: u64,
    /// Maximum number of live sessions; the least recently used is evicted beyond this.
    pub max_sessions: usize,
    /// Number of most recent history entries included in a Q&A prompt.
    pub context_turns: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "legiscan_session".to_string(),
            ttl_minutes: 60,
            max_sessions: 10_000,
            context_turns: 5,
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Directory the timeline image is written to; served under `/static`.
    pub output_dir: String,
    /// File name of the timeline image inside `output_dir`.
    pub timeline_file: String,
    /// Pie chart size in pixels.
    pub pie_size: u32,
    /// Timeline chart width in pixels.
    pub timeline_width: u32,
    /// Timeline chart height in pixels.
    pub timeline_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: "static".to_string(),
            timeline_file: "timeline.png".to_string(),
            pie_size: 800,
            timeline_width: 1000,
            timeline_height: 400,
        }
    }
}
