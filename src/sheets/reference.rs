// Request path parsing into a spreadsheet/sheet pair
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};

/// A spreadsheet id plus one named range inside it, as taken from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReference {
    spreadsheet_id: String,
    /// Still percent-encoded, exactly as it appeared in the path.
    raw_sheet_name: String,
}

impl SheetReference {
    /// Parse `/{spreadsheet_id}/{sheet_name}`.
    ///
    /// Empty segments are ignored, so trailing and doubled slashes are
    /// tolerated. Anything other than exactly two segments is rejected.
    pub fn from_path(path: &str) -> Result<Self> {
        let mut segments = path
            .strip_prefix('/')
            .unwrap_or(path)
            .split('/')
            .filter(|s| !s.is_empty());

        match (segments.next(), segments.next(), segments.next()) {
            (Some(id), Some(sheet), None) => Ok(Self {
                spreadsheet_id: id.to_string(),
                raw_sheet_name: sheet.to_string(),
            }),
            _ => Err(GatewayError::bad_url()),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn raw_sheet_name(&self) -> &str {
        &self.raw_sheet_name
    }

    /// Sheet name as the Sheets API expects it: `+` becomes a space, then
    /// percent-escapes are decoded.
    pub fn sheet_name(&self) -> Result<String> {
        let spaced = self.raw_sheet_name.replace('+', " ");
        Ok(urlencoding::decode(&spaced)?.into_owned())
    }
}
