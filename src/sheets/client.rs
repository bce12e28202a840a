// Google Sheets API client
// Author: kelexine (https://github.com/kelexine)

use super::models::SpreadsheetResponse;
use crate::config::{ApiKey, SheetsConfig};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Field projection requested from the API: only what the normalizer reads.
pub const FIELDS: &str = "sheets.data.rowData.values(userEnteredValue,hyperlink)";

/// Anything that can answer "give me this named range".
///
/// The gateway only talks to the upstream through this trait so tests can
/// count calls or serve canned documents.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch one named range. `sheet_name` is already decoded.
    ///
    /// A structured upstream error is returned as `GatewayError::Upstream`;
    /// transport and decode failures surface as faults.
    async fn fetch_range(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<SpreadsheetResponse>;
}

/// Client for the Google Sheets v4 REST API, authenticated by API key.
pub struct SheetsClient {
    http_client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl SheetsClient {
    /// Create a new client with a pooled HTTP connection.
    ///
    /// No request timeout is configured: a stalled upstream holds only the
    /// request waiting on it.
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        let http_client = Client::builder()
            .pool_max_idle_per_host(config.connection_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Sheets HTTP client with connection pooling");

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn range_url(&self, spreadsheet_id: &str) -> String {
        format!("{}/spreadsheets/{}/", self.base_url, spreadsheet_id)
    }
}

#[async_trait]
impl SheetSource for SheetsClient {
    async fn fetch_range(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<SpreadsheetResponse> {
        let url = self.range_url(spreadsheet_id);
        debug!("Fetching range {:?} of spreadsheet {}", sheet_name, spreadsheet_id);

        let start = Instant::now();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("key", self.api_key.expose()),
                ("ranges", sheet_name),
                ("fields", FIELDS),
            ])
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                crate::metrics::record_upstream_call("transport_error", start.elapsed().as_secs_f64());
                return Err(e.into());
            }
        };

        // Status is not inspected; the body holds either data or an error object.
        let status = response.status();
        let body = response.text().await?;
        let mut document: SpreadsheetResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Sheets response (HTTP {}): {}", status, e);
            crate::metrics::record_upstream_call("decode_error", start.elapsed().as_secs_f64());
            e
        })?;

        if let Some(api_error) = document.error.take() {
            debug!("Sheets API error: HTTP {} - {:?}", status, api_error.message);
            crate::metrics::record_upstream_call("api_error", start.elapsed().as_secs_f64());
            let message = api_error
                .message
                .or(api_error.status)
                .unwrap_or_else(|| format!("Sheets API returned HTTP {}", status.as_u16()));
            return Err(GatewayError::Upstream(message));
        }

        crate::metrics::record_upstream_call("ok", start.elapsed().as_secs_f64());
        Ok(document)
    }
}
