// src/convert.rs

use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::FetchConfig;
use crate::db::{self, create_database, insert_rows};
use crate::error::ConvertError;
use crate::fetch::{extract_sheet_id, fetch_sheet, HttpSheetSource, SheetSource};
use crate::progress::{emit, NoProgress, Progress};

/// A sheet split into its header row and the data rows beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Cells of the first record, verbatim.
    pub headers: Vec<String>,
    /// Every later record; widths may differ from `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// `None` when there is not even a header row.
    pub fn from_records(mut records: Vec<Vec<String>>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let rows = records.split_off(1);
        let headers = records.pop()?;
        Some(Self { headers, rows })
    }
}

/// What a finished conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub columns: usize,
    pub rows: usize,
    /// Sheet column names as created, in order (the identity column is not included).
    pub column_names: Vec<String>,
}

/// Fetch the sheet behind `reference` and write it to a new SQLite file at `db_path`.
pub fn convert_sheet_to_sqlite<P: AsRef<Path>>(
    reference: &str,
    db_path: P,
) -> Result<ConversionSummary, ConvertError> {
    convert_sheet_to_sqlite_with_progress(reference, db_path, &NoProgress)
}

/// Same as [`convert_sheet_to_sqlite`], reporting milestones to `progress`.
pub fn convert_sheet_to_sqlite_with_progress<P: AsRef<Path>>(
    reference: &str,
    db_path: P,
    progress: &dyn Progress,
) -> Result<ConversionSummary, ConvertError> {
    // reject bad references before any client is built
    extract_sheet_id(reference)?;
    let source = HttpSheetSource::new(FetchConfig::default())?;
    convert_with_source(&source, reference, db_path, progress)
}

/// Run the whole pipeline against any [`SheetSource`]:
/// fetch → split header → create table → insert rows.
#[instrument(level = "info", skip_all, fields(reference = %reference, path = %db_path.as_ref().display()))]
pub fn convert_with_source<S, P>(
    source: &S,
    reference: &str,
    db_path: P,
    progress: &dyn Progress,
) -> Result<ConversionSummary, ConvertError>
where
    S: SheetSource + ?Sized,
    P: AsRef<Path>,
{
    let db_path = db_path.as_ref();
    let start = Instant::now();

    // 1) Retrieve + parse
    emit(progress, "Fetching data from Google Sheet...");
    let records = fetch_sheet(source, reference)?;
    let table = RawTable::from_records(records).ok_or(ConvertError::EmptySource)?;

    let (columns, rows) = (table.headers.len(), table.rows.len());
    info!(columns, rows, "sheet retrieved");
    emit(progress, &format!("Found {columns} columns and {rows} rows"));

    // 2) Fresh database with one table shaped after the header row
    emit(progress, "Creating database...");
    let mut conn = create_database(db_path, &table.headers)?;

    // 3) Bulk insert
    emit(progress, "Inserting data...");
    let inserted = insert_rows(&mut conn, &table.headers, &table.rows);
    // release the store before reporting either outcome
    drop(conn);
    let inserted = inserted?;

    info!(rows = inserted, elapsed = ?start.elapsed(), "conversion complete");
    emit(progress, &format!("Successfully converted {inserted} rows"));

    Ok(ConversionSummary {
        columns,
        rows: inserted,
        column_names: db::table_columns(&table.headers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fetch::{parse_records, SheetId};
    use anyhow::Result;
    use rusqlite::Connection;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,walkthrough_conversion=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Serves a fixed CSV body for every ID and remembers which IDs were asked for.
    struct CannedSource {
        csv: &'static str,
        requested: RefCell<Vec<String>>,
    }

    impl CannedSource {
        fn new(csv: &'static str) -> Self {
            Self {
                csv,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl SheetSource for CannedSource {
        fn fetch_records(&self, id: &SheetId) -> Result<Vec<Vec<String>>, ConvertError> {
            self.requested.borrow_mut().push(id.to_string());
            parse_records(self.csv.as_bytes())
        }
    }

    struct FailingSource;

    impl SheetSource for FailingSource {
        fn fetch_records(&self, id: &SheetId) -> Result<Vec<Vec<String>>, ConvertError> {
            Err(ConvertError::HttpStatus {
                url: format!("https://docs.google.com/spreadsheets/d/{id}/export?format=csv"),
                status: 403,
            })
        }
    }

    fn read_table(path: &PathBuf) -> Result<Vec<(i64, String, String)>> {
        let conn = Connection::open(path)?;
        let mut stmt = conn.prepare("SELECT id, Name, Age FROM walkthrough_data ORDER BY id")?;
        let rows = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    #[test]
    fn end_to_end_with_mocked_retrieval() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("out.db");
        let source = CannedSource::new("Name,Age\nAlice,30\nBob,\n");
        let messages = RefCell::new(Vec::<String>::new());
        let sink = |s: &str| messages.borrow_mut().push(s.to_string());

        let summary = convert_with_source(
            &source,
            "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=0",
            &path,
            &sink,
        )?;

        assert_eq!(*source.requested.borrow(), vec!["ABC123".to_string()]);
        assert_eq!(
            summary,
            ConversionSummary {
                columns: 2,
                rows: 2,
                column_names: vec!["Name".into(), "Age".into()],
            }
        );
        assert_eq!(
            read_table(&path)?,
            vec![
                (1, "Alice".to_string(), "30".to_string()),
                (2, "Bob".to_string(), String::new()),
            ]
        );

        let conn = Connection::open(&path)?;
        let cols: Vec<String> = conn
            .prepare("PRAGMA table_info(walkthrough_data)")?
            .query_map([], |r| r.get(1))?
            .collect::<rusqlite::Result<_>>()?;
        assert_eq!(cols, vec!["id", "Name", "Age"]);

        assert_eq!(
            *messages.borrow(),
            vec![
                "Fetching data from Google Sheet...",
                "Found 2 columns and 2 rows",
                "Creating database...",
                "Inserting data...",
                "Successfully converted 2 rows",
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_source_creates_no_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.db");

        let err = convert_with_source(&CannedSource::new(""), "ABC123", &path, &NoProgress)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EmptySource);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn header_only_sheet_gives_empty_table() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("header.db");

        let summary = convert_with_source(&CannedSource::new("Name,Age\n"), "ABC123", &path, &NoProgress)?;

        assert_eq!(summary.rows, 0);
        assert!(read_table(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn rerun_replaces_previous_conversion() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.db");

        convert_with_source(
            &CannedSource::new("Name,Age\nOld,99\nOlder,100\nOldest,101\n"),
            "ABC123",
            &path,
            &NoProgress,
        )?;
        convert_with_source(&CannedSource::new("Name,Age\nNew,1\n"), "ABC123", &path, &NoProgress)?;

        assert_eq!(read_table(&path)?, vec![(1, "New".to_string(), "1".to_string())]);
        Ok(())
    }

    #[test]
    fn invalid_reference_touches_nothing() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.db");
        let source = CannedSource::new("Name,Age\nAlice,30\n");
        let messages = RefCell::new(Vec::<String>::new());
        let sink = |s: &str| messages.borrow_mut().push(s.to_string());

        let err = convert_with_source(&source, "https://example.com/not-a-sheet", &path, &sink)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        assert!(source.requested.borrow().is_empty());
        assert!(!path.exists());
        assert_eq!(*messages.borrow(), vec!["Fetching data from Google Sheet..."]);
        Ok(())
    }

    #[test]
    fn retrieval_failure_leaves_existing_file_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.db");
        std::fs::write(&path, b"previous")?;

        let err = convert_with_source(&FailingSource, "ABC123", &path, &NoProgress).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Retrieval);
        assert_eq!(std::fs::read(&path)?, b"previous");
        Ok(())
    }

    #[test]
    fn ragged_rows_are_padded_and_truncated() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ragged.db");

        convert_with_source(
            &CannedSource::new("Name,Age\nshort\nlong,1,extra,more\n"),
            "ABC123",
            &path,
            &NoProgress,
        )?;

        assert_eq!(
            read_table(&path)?,
            vec![
                (1, "short".to_string(), String::new()),
                (2, "long".to_string(), "1".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn panicking_progress_does_not_abort() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.db");
        let sink = |_: &str| panic!("listener failed");

        let summary = convert_with_source(&CannedSource::new("Name,Age\nA,1\n"), "ABC123", &path, &sink)?;

        assert_eq!(summary.rows, 1);
        Ok(())
    }

    #[test]
    fn store_failure_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missing").join("out.db");

        let err = convert_with_source(&CannedSource::new("Name,Age\nA,1\n"), "ABC123", &path, &NoProgress)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StoreCreation);
        Ok(())
    }

    #[test]
    fn http_entry_point_rejects_bad_reference_first() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.db");
        let messages = RefCell::new(Vec::<String>::new());
        let sink = |s: &str| messages.borrow_mut().push(s.to_string());

        let err = convert_sheet_to_sqlite_with_progress("https://example.com/not-a-sheet", &path, &sink)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        assert!(messages.borrow().is_empty());
        assert!(!path.exists());

        let err = convert_sheet_to_sqlite("", &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        Ok(())
    }

    #[test]
    fn raw_table_split() {
        assert_eq!(RawTable::from_records(Vec::new()), None);
        let t = RawTable::from_records(vec![vec!["h".into()], vec!["a".into()], vec![]]).unwrap();
        assert_eq!(t.headers, vec!["h"]);
        assert_eq!(t.rows.len(), 2);
    }
}
