//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                       | Default      |
//! |--------------------------------|--------------|
//! | `FOODHUB_HOST`                 | `0.0.0.0`    |
//! | `FOODHUB_PORT`                 | `8080`       |
//! | `FOODHUB_DB_PATH`              | `foodhub.db` |
//! | `FOODHUB_DB_MAX_CONNECTIONS`   | `5`          |
//! | `FOODHUB_REQUEST_TIMEOUT_SECS` | `30`         |
//!
//! Logging is configured separately through `RUST_LOG`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use foodhub_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: lookup("FOODHUB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("FOODHUB_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FOODHUB_PORT".to_string()))?,

            database_path: lookup("FOODHUB_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("foodhub.db")),

            db_max_connections: lookup("FOODHUB_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FOODHUB_DB_MAX_CONNECTIONS".to_string()))?,

            request_timeout_secs: lookup("FOODHUB_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("FOODHUB_REQUEST_TIMEOUT_SECS".to_string())
                })?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "FOODHUB_DB_MAX_CONNECTIONS".to_string(),
            ));
        }
        if config.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "FOODHUB_REQUEST_TIMEOUT_SECS".to_string(),
            ));
        }
        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("FOODHUB_DB_PATH".to_string()));
        }

        Ok(config)
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.db_max_connections)
            .min_connections(1)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
