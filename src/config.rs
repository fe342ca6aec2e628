//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), LOG_FILTER (default filter for RUST_LOG,
//! default "info") and ROSTER_CSV (optional competitor roster to preload).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Used when RUST_LOG is not set.
    pub log_filter: String,
    pub roster_csv: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
            roster_csv: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT".to_string(),
                reason: format!("{raw:?} is not a port number ({e})"),
            })?,
            None => default_port(),
        };
        Ok(Self {
            host: var("HOST").unwrap_or_else(default_host),
            port,
            log_filter: var("LOG_FILTER").unwrap_or_else(default_log_filter),
            roster_csv: var("ROSTER_CSV").map(PathBuf::from),
        })
    }
}
