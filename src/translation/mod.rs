// Translation module - Sheets API ↔ plain JSON rows
// Author: kelexine (https://github.com/kelexine)

pub mod rows;

pub use rows::{translate_cell, translate_rows, Cell, CellValue, Row};
