//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a default, so an empty
//! environment yields a working local setup backed by `blog.db`.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::BlogError;

/// Default storage connection string: a file next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db";

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`BlogConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// SQLite connection string (`BLOG_DB_URL`).
    pub database_url: String,

    /// Maximum number of pooled connections.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a connection.
    pub database_connect_timeout_secs: u64,

    /// Insert the sample posts when the table is empty at startup.
    pub seed_on_startup: bool,

    /// Log formatter selection.
    pub log_format: LogFormat,
}

impl BlogConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::InvalidConfig`] if `LISTEN_ADDR` is set but
    /// cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, BlogError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::InvalidConfig`] if `LISTEN_ADDR` cannot be
    /// parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BlogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| BlogError::InvalidConfig(format!("LISTEN_ADDR {raw_addr:?}: {e}")))?;

        let database_url = lookup("BLOG_DB_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let log_format = match lookup("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections: parse_value(&lookup, "DATABASE_MAX_CONNECTIONS", 5),
            database_connect_timeout_secs: parse_value(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT_SECS",
                5,
            ),
            seed_on_startup: parse_bool(&lookup, "SEED_ON_STARTUP", true),
            log_format,
        })
    }

    /// Connection acquire timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database_connect_timeout_secs)
    }
}

/// Parses a value as `T`, returning `default` on missing or invalid input.
fn parse_value<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BlogConfig, BlogError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BlogConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let Ok(config) = config_from(&[]) else {
            panic!("defaults must load");
        };
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(config.database_max_connections, 5);
        assert!(config.seed_on_startup);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_applied() {
        let Ok(config) = config_from(&[
            ("BLOG_DB_URL", "sqlite::memory:"),
            ("LISTEN_ADDR", "0.0.0.0:8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("SEED_ON_STARTUP", "FALSE"),
            ("LOG_FORMAT", "JSON"),
        ]) else {
            panic!("overrides must load");
        };
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.database_max_connections, 12);
        assert!(!config.seed_on_startup);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let Ok(config) = config_from(&[
            ("DATABASE_CONNECT_TIMEOUT_SECS", "soon"),
            ("SEED_ON_STARTUP", "maybe"),
        ]) else {
            panic!("fallbacks must load");
        };
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert!(config.seed_on_startup);
    }

    #[test]
    fn blank_database_url_uses_default() {
        let Ok(config) = config_from(&[("BLOG_DB_URL", "  ")]) else {
            panic!("blank url must fall back");
        };
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        let result = config_from(&[("LISTEN_ADDR", "not-an-addr")]);
        assert!(matches!(result, Err(BlogError::InvalidConfig(_))));
    }
}
