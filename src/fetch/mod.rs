// src/fetch/mod.rs

pub mod http;
pub mod parse;
pub mod sheet_id;

use tracing::info;

pub use http::{build_export_url, HttpSheetSource};
pub use parse::parse_records;
pub use sheet_id::{extract_sheet_id, SheetId};

use crate::error::ConvertError;

/// Anything that can turn a sheet ID into parsed CSV records (header row first).
pub trait SheetSource {
    fn fetch_records(&self, id: &SheetId) -> Result<Vec<Vec<String>>, ConvertError>;
}

impl<S: SheetSource + ?Sized> SheetSource for &S {
    fn fetch_records(&self, id: &SheetId) -> Result<Vec<Vec<String>>, ConvertError> {
        (**self).fetch_records(id)
    }
}

/// Resolve `reference` to a sheet ID, then pull its records from `source`.
/// An unrecognised reference fails before `source` is touched.
pub fn fetch_sheet<S: SheetSource + ?Sized>(
    source: &S,
    reference: &str,
) -> Result<Vec<Vec<String>>, ConvertError> {
    let id = extract_sheet_id(reference)?;
    let records = source.fetch_records(&id)?;
    info!(id = %id, records = records.len(), "fetched sheet");
    Ok(records)
}
