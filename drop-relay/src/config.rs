//! Configuration loading for drop-relay.
//!
//! Configuration is loaded from a TOML file (default: `relay.toml`). Every
//! field has a default, so an empty file (or no file at all) yields the
//! reference policy values.

use drop_types::CodePolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration for drop-relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Session and file store configuration.
    pub store: StoreConfig,
    /// Session code policies.
    pub codes: CodesConfig,
    /// Rate limiting configuration.
    pub limits: LimitsConfig,
    /// Sweep task configuration.
    pub cleanup: CleanupConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP server (default: 0.0.0.0:3001).
    pub bind_address: String,
}

/// Session and file store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum declared file size in bytes (default: 5 MiB).
    pub max_file_size: u64,
    /// Session inactivity TTL in seconds (default: 3600 = 1 hour).
    pub session_ttl_secs: u64,
    /// Whether an upload to an unknown code silently creates the session
    /// (default: true). When false the upload path returns not-found instead.
    pub implicit_sessions: bool,
}

/// Session code policies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodesConfig {
    /// Policy for relay-minted codes (default: 6 alphanumeric characters).
    pub auto: CodePolicy,
    /// Policy caller-chosen codes must satisfy (default: 4 repeated digits).
    pub custom: CodePolicy,
    /// Generation attempts before giving up on finding a free code
    /// (default: 10). The repeated-digit space has only 10 codes, so
    /// collisions are expected, not exceptional.
    pub max_generate_attempts: u32,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum uploads per client per minute (default: 60).
    pub uploads_per_minute: u32,
    /// Maximum requests per second across all clients (default: 1000).
    pub global_requests_per_second: u32,
}

/// Sweep task configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Sweep interval in seconds (default: 1800 = 30 minutes).
    pub interval_secs: u64,
    /// Enable the sweep task (default: true).
    pub enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            session_ttl_secs: 3600,
            implicit_sessions: true,
        }
    }
}

impl Default for CodesConfig {
    fn default() -> Self {
        Self {
            auto: CodePolicy::alphanumeric(),
            custom: CodePolicy::repeated_digit(),
            max_generate_attempts: 10,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            uploads_per_minute: 60,
            global_requests_per_second: 1000,
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: 1800,
            enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
