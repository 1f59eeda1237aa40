// src/db/mod.rs

pub mod insert;

use anyhow::Context;
use rusqlite::Connection;
use std::{fs, io, path::Path};
use tracing::{debug, instrument};

pub use insert::insert_rows;

use crate::error::ConvertError;
use crate::schema::{column_names, create_table_sql};

/// The single table every conversion produces.
pub const TABLE_NAME: &str = "walkthrough_data";

/// Surrogate key column placed ahead of the sheet columns.
pub const ID_COLUMN: &str = "id";

/// Column names for `headers`, in header order.
///
/// Both table creation and row insertion go through here, so they can never
/// disagree on naming or ordering.
pub fn table_columns(headers: &[String]) -> Vec<String> {
    column_names(headers, &[ID_COLUMN])
}

/// Replace whatever is at `path` with a fresh SQLite file holding an empty
/// [`TABLE_NAME`] table shaped after `headers`.
#[instrument(
    level = "info",
    skip(path, headers),
    fields(path = %path.as_ref().display(), columns = headers.len())
)]
pub fn create_database<P: AsRef<Path>>(
    path: P,
    headers: &[String],
) -> Result<Connection, ConvertError> {
    let path = path.as_ref();

    // 1) Start fresh: drop any earlier file at the destination
    match fs::remove_file(path) {
        Ok(()) => debug!("removed existing database"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(ConvertError::store(path, "remove existing database")(
                anyhow::Error::new(e),
            ))
        }
    }

    // 2) Open (and create) the store
    let conn = Connection::open(path)
        .context("opening SQLite database")
        .map_err(ConvertError::store(path, "create database"))?;

    // 3) One TEXT column per sanitized header, behind the identity column
    let sql = create_table_sql(TABLE_NAME, ID_COLUMN, &table_columns(headers));
    debug!(%sql, "creating table");

    if let Err(e) = conn.execute_batch(&sql) {
        // release the handle before reporting
        drop(conn);
        return Err(ConvertError::store(path, "create table")(
            anyhow::Error::new(e).context(format!("executing CREATE TABLE {TABLE_NAME}")),
        ));
    }

    Ok(conn)
}
