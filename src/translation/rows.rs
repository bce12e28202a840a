// Row translation (Sheets typed cells → plain JSON rows)
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};
use crate::sheets::{CellData, ExtendedValue, RowData, SpreadsheetResponse};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

/// A row as served to clients.
pub type Row = Vec<Cell>;

/// Plain value pulled out of a typed-value wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Number(Number),
    Bool(bool),
    Formula(String),
}

/// A normalized cell: any upstream metadata plus an optional `value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
}

/// Translate an upstream document into rows.
///
/// Fails with `EmptyResult` when the first grid of the first sheet has no
/// row data at all.
pub fn translate_rows(document: SpreadsheetResponse) -> Result<Vec<Row>> {
    let row_data = document.into_row_data().unwrap_or_default();
    if row_data.is_empty() {
        return Err(GatewayError::EmptyResult);
    }

    let rows: Vec<Row> = row_data.into_iter().map(translate_row).collect();
    debug!("Translated {} rows", rows.len());
    Ok(rows)
}

fn translate_row(row: RowData) -> Row {
    // Rows with no `values` are blank lines in the sheet.
    row.values
        .unwrap_or_default()
        .into_iter()
        .map(translate_cell)
        .collect()
}

/// Replace `userEnteredValue` with a flat `value`; keep everything else.
pub fn translate_cell(cell: CellData) -> Cell {
    let CellData {
        user_entered_value,
        extra,
    } = cell;

    Cell {
        metadata: extra,
        value: user_entered_value.and_then(extract_value),
    }
}

/// First present field wins: string, number, boolean, formula.
fn extract_value(value: ExtendedValue) -> Option<CellValue> {
    let ExtendedValue {
        string_value,
        number_value,
        bool_value,
        formula_value,
    } = value;

    string_value
        .map(CellValue::String)
        .or_else(|| number_value.map(CellValue::Number))
        .or_else(|| bool_value.map(CellValue::Bool))
        .or_else(|| formula_value.map(CellValue::Formula))
}
