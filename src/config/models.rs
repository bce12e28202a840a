//! Configuration data structures for the opensheet gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the Sheets API credential, and response cache tuning.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Google Sheets API settings.
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Admin listener for metrics and health.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of tokio worker threads.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Where `GET /` redirects to.
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
}

/// Settings for the upstream Google Sheets API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// API key sent as the `key` query parameter. Required.
    #[serde(default)]
    pub api_key: ApiKey,

    /// Base URL of the Sheets REST API.
    /// Default: `https://sheets.googleapis.com/v4`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum number of idle connections to keep per host.
    /// Default: `100`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,
}

/// Settings for the response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether responses are cached at all.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Value of the `s-maxage` directive on successful responses.
    /// Default: `30`
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,

    /// Capacity of the in-process LRU store.
    /// Default: `1000`
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Namespace prepended to every cache key.
    /// Default: `https://opensheet.elk.sh/`
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask API keys in logged messages.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_secrets: bool,
}

/// Settings for the admin listener serving `/metrics` and `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Default: `false`
    #[serde(default)]
    pub enabled: bool,

    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// Default: `9090`
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Google API key. Wiped from memory on drop and never printed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            docs_url: default_docs_url(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            api_base_url: default_api_base_url(),
            connection_pool_size: default_pool_size(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_ttl(),
            max_entries: default_max_entries(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_secrets: true,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_metrics_port(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_docs_url() -> String {
    "https://github.com/benborgers/opensheet#readme".to_string()
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_pool_size() -> usize {
    100
}

fn default_ttl() -> u64 {
    30
}

fn default_max_entries() -> usize {
    1000
}

fn default_key_prefix() -> String {
    "https://opensheet.elk.sh/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
