//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Binaries call `dotenvy::dotenv()` first, so every variable can also
//! come from a `.env` file.
//!
//! ## Required Variables
//!
//! - `STORAGE_PATH` - SQLite database file (created if missing)
//! - `HTTP_SERVER_USER` / `HTTP_SERVER_PASSWORD` - Basic auth credentials for `POST /url`
//!
//! ## Optional Variables
//!
//! - `ENV` - `local`, `dev` or `prod` (default: `local`); selects log format and level
//! - `HTTP_SERVER_ADDRESS` - Bind address (default: `127.0.0.1:8080`)
//! - `HTTP_SERVER_TIMEOUT` - Request timeout in seconds (default: 4)
//! - `HTTP_SERVER_IDLE_TIMEOUT` - Keep-alive idle timeout in seconds (default: 60)
//! - `ALIAS_LENGTH` - Length of generated aliases (default: 6, range 1-64)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//! - `RUST_LOG` - Overrides the level filter chosen by `ENV`

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::persistence::PoolSettings;
use crate::utils::alias_generator::DEFAULT_ALIAS_LENGTH;

/// Deployment environment. Affects logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

impl Environment {
    /// Level filter used when `RUST_LOG` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Environment::Local | Environment::Dev => "debug",
            Environment::Prod => "info",
        }
    }

    /// Whether logs are emitted as JSON lines instead of human-readable text.
    pub fn json_logs(self) -> bool {
        !matches!(self, Environment::Local)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => anyhow::bail!("ENV must be 'local', 'dev' or 'prod', got '{}'", other),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        };
        f.write_str(name)
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub storage_path: String,
    pub listen_addr: String,
    /// Request timeout in seconds (`HTTP_SERVER_TIMEOUT`).
    pub request_timeout: u64,
    /// Seconds an HTTP/1 keep-alive connection may wait for its next request
    /// (`HTTP_SERVER_IDLE_TIMEOUT`).
    pub idle_timeout: u64,
    pub auth_user: String,
    pub auth_password: String,
    pub alias_length: usize,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or `ENV` is unknown.
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENV")
            .unwrap_or_else(|_| "local".to_string())
            .parse()?;

        let storage_path = env::var("STORAGE_PATH").context("STORAGE_PATH must be set")?;

        let listen_addr =
            env::var("HTTP_SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let request_timeout = env::var("HTTP_SERVER_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let idle_timeout = env::var("HTTP_SERVER_IDLE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let auth_user = env::var("HTTP_SERVER_USER").context("HTTP_SERVER_USER must be set")?;
        let auth_password =
            env::var("HTTP_SERVER_PASSWORD").context("HTTP_SERVER_PASSWORD must be set")?;

        let alias_length = env::var("ALIAS_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ALIAS_LENGTH);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            env: environment,
            storage_path,
            listen_addr,
            request_timeout,
            idle_timeout,
            auth_user,
            auth_password,
            alias_length,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range or malformed.
    pub fn validate(&self) -> Result<()> {
        if self.storage_path.trim().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "HTTP_SERVER_ADDRESS must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.request_timeout == 0 {
            anyhow::bail!("HTTP_SERVER_TIMEOUT must be greater than 0");
        }
        if self.idle_timeout == 0 {
            anyhow::bail!("HTTP_SERVER_IDLE_TIMEOUT must be greater than 0");
        }

        if self.auth_user.is_empty() {
            anyhow::bail!("HTTP_SERVER_USER must not be empty");
        }
        if self.auth_password.is_empty() {
            anyhow::bail!("HTTP_SERVER_PASSWORD must not be empty");
        }

        if self.alias_length == 0 || self.alias_length > 64 {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and 64, got {}",
                self.alias_length
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_connect_timeout),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Storage: {}", self.storage_path);
        tracing::info!("  Request timeout: {}s", self.request_timeout);
        tracing::info!("  Idle timeout: {}s", self.idle_timeout);
        tracing::info!(
            "  Basic auth: {}:{}",
            self.auth_user,
            mask_secret(&self.auth_password)
        );
        tracing::info!("  Alias length: {}", self.alias_length);
    }
}

/// Masks a secret for logging.
fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
