// Google Sheets upstream module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod models;
mod reference;

pub use client::{SheetSource, SheetsClient, FIELDS};
pub use models::{CellData, ExtendedValue, RowData, SpreadsheetResponse};
pub use reference::SheetReference;
