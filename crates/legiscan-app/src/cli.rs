//! CLI argument definitions for the LegiScan server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// LegiScan - summarize bills and answer questions about them.
#[derive(Parser, Debug)]
#[command(name = "legiscan", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Answer with the offline mock LLM instead of calling a provider.
    #[arg(long = "mock-llm")]
    pub mock_llm: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > LEGISCAN_CONFIG env var > ~/.legiscan/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("LEGISCAN_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the server port.
    ///
    /// Priority: --port flag > LEGISCAN_PORT env var > config file value > 5000.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("LEGISCAN_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        5000
    }

    /// Resolve the bind address. Priority: --host flag > config file value.
    pub fn resolve_host(&self, config_host: &str) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| config_host.to_string())
    }

    /// Resolve the log level. Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

fn default_config_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".legiscan").join("config.toml"),
        Err(_) => PathBuf::from("config.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "legiscan",
            "--config",
            "/tmp/legiscan.toml",
            "--port",
            "8080",
            "--host",
            "0.0.0.0",
            "--log-level",
            "debug",
            "--mock-llm",
        ]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/legiscan.toml"));
        assert_eq!(args.resolve_port(5000), 8080);
        assert_eq!(args.resolve_host("127.0.0.1"), "0.0.0.0");
        assert_eq!(args.resolve_log_level("info"), "debug");
        assert!(args.mock_llm);
    }

    #[test]
    fn test_config_values_used_without_flags() {
        let args = CliArgs::parse_from(["legiscan"]);
        assert_eq!(args.resolve_host("127.0.0.1"), "127.0.0.1");
        assert_eq!(args.resolve_log_level("warn"), "warn");
        assert!(!args.mock_llm);
    }

    #[test]
    fn test_default_config_path_ends_with_legiscan_dir() {
        let path = default_config_path();
        assert!(path.ends_with("config.toml"));
    }
}
