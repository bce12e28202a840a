// Error types for the opensheet gateway
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Message returned when the request path is not `/spreadsheet_id/sheet_name`.
pub const URL_FORMAT_MESSAGE: &str = "URL format is /spreadsheet_id/sheet_name";

/// Message returned when the upstream answered without any rows.
pub const EMPTY_RESULT_MESSAGE: &str = "No data found in the specified sheet.";

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed request path (wrong segment count).
    #[error("{0}")]
    BadRequest(String),

    /// The Sheets API reported a structured error.
    #[error("{0}")]
    Upstream(String),

    /// Well-formed request, but the range holds no rows.
    #[error("No data found in the specified sheet.")]
    EmptyResult,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid percent-encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Status code presented to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::NOT_FOUND,
            GatewayError::Upstream(_) | GatewayError::EmptyResult => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for the `{"error": ...}` envelope, or `None` for faults that
    /// end the request without one.
    pub fn envelope_message(&self) -> Option<String> {
        match self {
            GatewayError::BadRequest(_) | GatewayError::Upstream(_) | GatewayError::EmptyResult => {
                Some(self.to_string())
            }
            _ => None,
        }
    }

    pub fn bad_url() -> Self {
        GatewayError::BadRequest(URL_FORMAT_MESSAGE.to_string())
    }
}

// Convert GatewayError to HTTP responses for Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.envelope_message() {
            Some(message) => crate::server::response::error(&message, status).into_response(),
            None => {
                error!(
                    "Request failed without envelope: {}",
                    crate::utils::logging::sanitize(&self.to_string())
                );
                status.into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
