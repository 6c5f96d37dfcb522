use std::io::IsTerminal;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::api::{
    DEFAULT_AUTHORS, DEFAULT_PAGE_SIZE, DEFAULT_SS58_FORMAT, MAX_PAGE_SIZE,
};
use crate::constants::cache::{
    DEFAULT_DETAIL_TTL_SECS, DEFAULT_LIST_TTL_SECS, DEFAULT_LOCK_LEASE_MS,
    DEFAULT_LOCK_POLL_MS, DEFAULT_LOCK_TIMEOUT_MS, DEFAULT_REDIS_URL,
};
use crate::constants::database::DEFAULT_DATABASE_URL;
use crate::constants::server::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub api: ApiConfig,
}

/// Log output format
///
/// `Auto` picks JSON when stdout is not a terminal, text otherwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Text,
    #[default]
    Auto,
}

impl LogFormat {
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if std::io::stdout().is_terminal() => Self::Text,
            Self::Auto => Self::Json,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    /// Serve the built-in sample chain instead of connecting to PostgreSQL
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    /// Default freshness of list responses, 0 disables caching
    pub list_ttl_secs: u64,
    /// Default freshness of detail responses, 0 disables caching
    pub detail_ttl_secs: u64,
    pub lock_timeout_ms: u64,
    pub lock_lease_ms: u64,
    pub lock_poll_ms: u64,
    /// Also cache detail lookups that found nothing
    pub cache_not_found: bool,
}

impl CacheConfig {
    pub fn list_ttl(&self) -> Option<Duration> {
        non_zero_secs(self.list_ttl_secs)
    }

    pub fn detail_ttl(&self) -> Option<Duration> {
        non_zero_secs(self.detail_ttl_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// SS58 address format used to render and parse account addresses
    pub ss58_format: u16,
    pub authors: Vec<String>,
}

pub(crate) fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl Default for Config {
    fn default() -> Self {
        // these are just some sane defaults, most likely we will
        // have them overridden
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            mock_mode: cfg!(feature = "mocks"),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            list_ttl_secs: DEFAULT_LIST_TTL_SECS,
            detail_ttl_secs: DEFAULT_DETAIL_TTL_SECS,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
            lock_lease_ms: DEFAULT_LOCK_LEASE_MS,
            lock_poll_ms: DEFAULT_LOCK_POLL_MS,
            cache_not_found: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            ss58_format: DEFAULT_SS58_FORMAT,
            authors: DEFAULT_AUTHORS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> std::io::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            port = 9000

            [cache]
            backend = "redis"
            list_ttl_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.list_ttl(), None);
        assert_eq!(
            config.cache.detail_ttl(),
            Some(Duration::from_secs(DEFAULT_DETAIL_TTL_SECS))
        );
        assert_eq!(config.api.max_page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn invalid_file_is_rejected() {
        let err = Config::from_toml("port = \"not a port\"").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn explicit_log_formats_resolve_to_themselves() {
        assert_eq!(LogFormat::Json.resolve(), LogFormat::Json);
        assert_eq!(LogFormat::Text.resolve(), LogFormat::Text);
        assert_ne!(LogFormat::Auto.resolve(), LogFormat::Auto);
    }
}
