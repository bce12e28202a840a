//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to keep the
//! Google API key out of logs. `reqwest` errors embed the full request URL,
//! key included, so anything derived from them goes through [`sanitize`].
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{GatewayError, Result};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static SANITIZE_ENABLED: AtomicBool = AtomicBool::new(true);

/// `key=...` query parameters
static KEY_PARAM_REGEX: OnceLock<Regex> = OnceLock::new();
/// Bare Google API keys, which start with "AIza"
static API_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn key_param_regex() -> &'static Regex {
    KEY_PARAM_REGEX.get_or_init(|| Regex::new(r"([?&]key=)[^&\s#]+").expect("Invalid regex pattern"))
}

fn api_key_regex() -> &'static Regex {
    API_KEY_REGEX.get_or_init(|| Regex::new(r"AIza[0-9A-Za-z_\-]{10,}").expect("Invalid regex pattern"))
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    SANITIZE_ENABLED.store(config.sanitize_secrets, Ordering::Relaxed);

    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| GatewayError::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
    };

    installed.map_err(|e| GatewayError::Internal(format!("Failed to install logger: {}", e)))
}

/// Removes API keys from a message before it is logged.
///
/// Replaces `key=` query values with `key=[REDACTED]` and any bare
/// `AIza...` token with `[REDACTED_API_KEY]`. A no-op when sanitizing was
/// switched off in the logging config.
pub fn sanitize(input: &str) -> String {
    if !SANITIZE_ENABLED.load(Ordering::Relaxed) {
        return input.to_string();
    }

    let result = key_param_regex().replace_all(input, "${1}[REDACTED]");
    api_key_regex()
        .replace_all(&result, "[REDACTED_API_KEY]")
        .into_owned()
}
