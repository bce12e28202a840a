//! Wire types for the Google Sheets `spreadsheets.get` response.
//!
//! Only the projection requested by the gateway is modelled
//! (`sheets.data.rowData.values(userEnteredValue,hyperlink)`). Cell fields
//! other than `userEnteredValue` are kept verbatim so they reach the client
//! untouched.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Top-level document returned by the Sheets API: either data or an error.
#[derive(Debug, Default, Deserialize)]
pub struct SpreadsheetResponse {
    #[serde(default)]
    pub sheets: Option<Vec<Sheet>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

impl SpreadsheetResponse {
    /// Rows of the first grid of the first sheet, if any.
    pub fn into_row_data(self) -> Option<Vec<RowData>> {
        self.sheets?
            .into_iter()
            .next()?
            .data?
            .into_iter()
            .next()?
            .row_data
    }
}

/// Structured error object (`{"error": {"code": 404, "message": "..."}}`).
#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub data: Option<Vec<GridData>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default)]
    pub row_data: Option<Vec<RowData>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RowData {
    #[serde(default)]
    pub values: Option<Vec<CellData>>,
}

/// One cell. `userEnteredValue` is the typed-value wrapper; everything else
/// (e.g. `hyperlink`) lands in `extra`.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_entered_value: Option<ExtendedValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The four mutually exclusive typed-value fields, in priority order.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_value: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_value: Option<String>,
}
