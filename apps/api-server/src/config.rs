//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use resto_core::VoidPolicy;
use resto_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// Whether voiding an order gives its ingredients back
    pub restock_on_void: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            http_port: 8080,
            database_path: "./data/resto.db".to_string(),
            db_max_connections: 5,
            restock_on_void: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                   | Default            |
    /// |----------------------------|--------------------|
    /// | `RESTO_HTTP_PORT`          | `8080`             |
    /// | `RESTO_DATABASE_PATH`      | `./data/resto.db`  |
    /// | `RESTO_DB_MAX_CONNECTIONS` | `5`                |
    /// | `RESTO_RESTOCK_ON_VOID`    | `false`            |
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let config = AppConfig {
            http_port: parse_var("RESTO_HTTP_PORT", defaults.http_port)?,

            database_path: env::var("RESTO_DATABASE_PATH").unwrap_or(defaults.database_path),

            db_max_connections: parse_var("RESTO_DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            restock_on_void: parse_var("RESTO_RESTOCK_ON_VOID", defaults.restock_on_void)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "RESTO_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "RESTO_DATABASE_PATH".to_string(),
            ));
        }

        Ok(config)
    }

    /// Pool settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }

    /// What `DELETE /orders/{id}` does with consumed stock.
    pub fn void_policy(&self) -> VoidPolicy {
        if self.restock_on_void {
            VoidPolicy::Restock
        } else {
            VoidPolicy::KeepStock
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.void_policy(), VoidPolicy::KeepStock);
        assert_eq!(config.db_config().max_connections, 5);
    }

    #[test]
    fn test_restock_policy() {
        let config = AppConfig {
            restock_on_void: true,
            ..Default::default()
        };
        assert_eq!(config.void_policy(), VoidPolicy::Restock);
    }
}
