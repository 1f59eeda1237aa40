//! Snapshot a public Google Sheet into a local SQLite file.
//!
//! The pipeline fetches the sheet's CSV export, sanitizes the header row into
//! column names, creates a single `walkthrough_data` table and bulk-inserts
//! every data row as text.

pub mod config;
pub mod convert;
pub mod db;
pub mod error;
pub mod fetch;
pub mod progress;
pub mod schema;

pub use config::FetchConfig;
pub use convert::{
    convert_sheet_to_sqlite, convert_sheet_to_sqlite_with_progress, convert_with_source,
    ConversionSummary, RawTable,
};
pub use error::{ConvertError, ErrorKind};
pub use fetch::{extract_sheet_id, HttpSheetSource, SheetId, SheetSource};
pub use progress::{NoProgress, Progress};
