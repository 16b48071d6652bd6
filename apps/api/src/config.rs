//! API server configuration.
//!
//! Loaded from environment variables (after an optional `.env` file) with
//! fallback to defaults.
//!
//! | Variable              | Default    |
//! |-----------------------|------------|
//! | `HOST`                | `0.0.0.0`  |
//! | `PORT`                | `8080`     |
//! | `DB_CONN`             | `kasir.db` |
//! | `DB_MAX_CONNECTIONS`  | `5`        |
//! | `DB_LOCK_TIMEOUT_MS`  | `5000`     |
//! | `REPORT_UTC_OFFSET`   | `+07:00`   |

use std::net::SocketAddr;
use std::time::Duration;

use chrono::FixedOffset;
use config::{Config, Environment};
use serde::Deserialize;

use kasir_db::DbConfig;

/// Raw values as they come out of the environment.
#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    host: String,
    port: u16,
    db_conn: String,
    db_max_connections: u32,
    db_lock_timeout_ms: u64,
    report_utc_offset: String,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub addr: SocketAddr,

    /// SQLite database file path
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// How long a checkout waits for another checkout's lock
    pub db_lock_timeout: Duration,

    /// Offset whose calendar days the daily report uses
    pub report_offset: FixedOffset,
}

impl ApiConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    /// Load configuration from an explicit environment source.
    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let raw: RawConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("db_conn", "kasir.db")?
            .set_default("db_max_connections", 5_i64)?
            .set_default("db_lock_timeout_ms", 5000_i64)?
            .set_default("report_utc_offset", "+07:00")?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        let addr: SocketAddr = format!("{}:{}", raw.host, raw.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))?;

        if raw.db_conn.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DB_CONN".to_string()));
        }

        if raw.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        let report_offset: FixedOffset = raw
            .report_utc_offset
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REPORT_UTC_OFFSET".to_string()))?;

        Ok(ApiConfig {
            addr,
            database_path: raw.db_conn,
            db_max_connections: raw.db_max_connections,
            db_lock_timeout: Duration::from_millis(raw.db_lock_timeout_ms),
            report_offset,
        })
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.db_max_connections)
            .lock_timeout(self.db_lock_timeout)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}
