// Cache key construction
// Author: kelexine (https://github.com/kelexine)

use crate::sheets::SheetReference;
use std::fmt;

/// Identity of a cached sheet response.
///
/// Built from the spreadsheet id and the sheet segment *as received*, so
/// `/id/My%20Sheet` and `/id/My+Sheet` are cached separately even though
/// they name the same range upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `prefix` + spreadsheet id + `/` + percent-encoded raw sheet segment.
    ///
    /// The prefix is expected to end with `/` so the key reads as a URL.
    pub fn new(prefix: &str, spreadsheet_id: &str, raw_sheet_name: &str) -> Self {
        Self(format!(
            "{}{}/{}",
            prefix,
            spreadsheet_id,
            urlencoding::encode(raw_sheet_name)
        ))
    }

    pub fn for_reference(prefix: &str, reference: &SheetReference) -> Self {
        Self::new(prefix, reference.spreadsheet_id(), reference.raw_sheet_name())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
