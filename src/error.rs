// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a failed conversion, independent of the underlying cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidReference,
    Retrieval,
    Parse,
    EmptySource,
    StoreCreation,
    RowInsert,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidReference => "invalid_reference",
            ErrorKind::Retrieval => "retrieval",
            ErrorKind::Parse => "parse",
            ErrorKind::EmptySource => "empty_source",
            ErrorKind::StoreCreation => "store_creation",
            ErrorKind::RowInsert => "row_insert",
        }
    }
}

/// Every way a sheet-to-database conversion can fail. All of them are terminal.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("could not extract sheet ID from reference: {reference}")]
    InvalidReference { reference: String },

    #[error("invalid export URL {url}")]
    ExportUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to fetch sheet from {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to fetch sheet from {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse CSV at record {record}")]
    Parse {
        record: usize,
        #[source]
        source: csv::Error,
    },

    #[error("no data found in the spreadsheet")]
    EmptySource,

    #[error("failed to {operation} at {}", .path.display())]
    StoreCreation {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Whole-batch insert failure (begin, prepare or commit); no single row is at fault.
    #[error("failed to {operation}")]
    InsertStatement {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A specific data row failed; `row` is 1-based.
    #[error("failed to insert row {row}")]
    RowInsert {
        row: usize,
        #[source]
        source: rusqlite::Error,
    },
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InvalidReference { .. } => ErrorKind::InvalidReference,
            ConvertError::ExportUrl { .. }
            | ConvertError::HttpStatus { .. }
            | ConvertError::Transport { .. } => ErrorKind::Retrieval,
            ConvertError::Parse { .. } => ErrorKind::Parse,
            ConvertError::EmptySource => ErrorKind::EmptySource,
            ConvertError::StoreCreation { .. } => ErrorKind::StoreCreation,
            ConvertError::InsertStatement { .. } | ConvertError::RowInsert { .. } => {
                ErrorKind::RowInsert
            }
        }
    }

    /// Builds a `map_err` adapter for failures while preparing the destination store.
    pub(crate) fn store(
        path: impl Into<PathBuf>,
        operation: &'static str,
    ) -> impl FnOnce(anyhow::Error) -> Self {
        let path = path.into();
        move |source| ConvertError::StoreCreation {
            path,
            operation,
            source,
        }
    }
}
