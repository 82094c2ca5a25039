//! Checkout API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Flags given to `checkout-api run` override both (see `cli`).
//!
//! | Variable                   | Default            |
//! |----------------------------|--------------------|
//! | `CHECKOUT_PORT`            | `8080`             |
//! | `CHECKOUT_SQLITE`          | `data/checkout.db` |
//! | `CHECKOUT_MEMORY_DB`       | `false`            |
//! | `CHECKOUT_RECREATE_SCHEMA` | `false`            |
//! | `CHECKOUT_MAX_CONNECTIONS` | `5`                |
//! | `CHECKOUT_LOG_LEVEL`       | `info`             |
//! | `CHECKOUT_LOG_FORMAT`      | `text`             |
//! | `CHECKOUT_PASSWORD`        | empty              |

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use checkout_db::DbConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Checkout API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub sqlite_path: PathBuf,

    /// Use an in-memory database instead of `sqlite_path`
    pub memory_db: bool,

    /// Drop and recreate the schema at startup
    pub recreate_schema: bool,

    /// Connection pool size
    pub max_connections: u32,

    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Value of `X-Auth-Password` required on write routes
    #[serde(skip_serializing)]
    pub password: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            port: var("CHECKOUT_PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_PORT".to_string()))?,

            sqlite_path: PathBuf::from(var("CHECKOUT_SQLITE", "data/checkout.db")),

            memory_db: var("CHECKOUT_MEMORY_DB", "false")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_MEMORY_DB".to_string()))?,

            recreate_schema: var("CHECKOUT_RECREATE_SCHEMA", "false")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_RECREATE_SCHEMA".to_string()))?,

            max_connections: var("CHECKOUT_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_MAX_CONNECTIONS".to_string()))?,

            log_level: var("CHECKOUT_LOG_LEVEL", "info"),

            log_format: var("CHECKOUT_LOG_FORMAT", "text")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_LOG_FORMAT".to_string()))?,

            password: var("CHECKOUT_PASSWORD", ""),
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "CHECKOUT_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = if self.memory_db {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.sqlite_path).max_connections(self.max_connections)
        };
        config.recreate_schema(self.recreate_schema)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.sqlite_path, PathBuf::from("data/checkout.db"));
        assert!(!config.memory_db);
        assert!(!config.recreate_schema);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.password, "");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CHECKOUT_PORT", "9000"),
            ("CHECKOUT_MEMORY_DB", "true"),
            ("CHECKOUT_RECREATE_SCHEMA", "true"),
            ("CHECKOUT_LOG_FORMAT", "JSON"),
            ("CHECKOUT_PASSWORD", "secret"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.memory_db);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.password, "secret");
        assert_eq!(config.db_config().max_connections, 1);
        assert!(config.db_config().recreate_schema);
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("CHECKOUT_PORT", "eighty"),
            ("CHECKOUT_MEMORY_DB", "maybe"),
            ("CHECKOUT_RECREATE_SCHEMA", "yes"),
            ("CHECKOUT_MAX_CONNECTIONS", "0"),
            ("CHECKOUT_LOG_FORMAT", "xml"),
        ] {
            match load(&[(name, value)]) {
                Err(ConfigError::InvalidValue(var)) => assert_eq!(var, name),
                other => panic!("{}={} accepted: {:?}", name, value, other),
            }
        }
    }

    #[test]
    fn test_password_not_serialized() {
        let config = load(&[("CHECKOUT_PASSWORD", "secret")]).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
