// src/fetch/sheet_id.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::ConvertError;

/// Tried in order; the first capture wins.
static ID_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("path pattern should compile"),
        Regex::new(r"key=([a-zA-Z0-9_-]+)").expect("key pattern should compile"),
    ]
});

static BARE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("bare id pattern should compile"));

/// A spreadsheet identifier, guaranteed to match `[a-zA-Z0-9_-]+`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SheetId(String);

impl SheetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pull the sheet ID out of a full URL (`/spreadsheets/d/<id>` or `key=<id>`)
/// or accept a bare ID as is.
pub fn extract_sheet_id(reference: &str) -> Result<SheetId, ConvertError> {
    let reference = reference.trim();

    for re in ID_PATTERNS.iter() {
        if let Some(m) = re.captures(reference).and_then(|caps| caps.get(1)) {
            return Ok(SheetId(m.as_str().to_string()));
        }
    }

    if BARE_ID.is_match(reference) {
        return Ok(SheetId(reference.to_string()));
    }

    Err(ConvertError::InvalidReference {
        reference: reference.to_string(),
    })
}
