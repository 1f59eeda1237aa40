// src/db/insert.rs

use rusqlite::{params_from_iter, Connection};
use tracing::{debug, instrument, warn};

use super::{table_columns, TABLE_NAME};
use crate::error::ConvertError;
use crate::schema::insert_sql;

/// Insert `rows` into the table created for `headers`, inside one transaction.
///
/// Each row binds exactly `headers.len()` values: missing trailing cells bind
/// as empty text, surplus cells are ignored. The first failing row aborts the
/// whole batch with its 1-based position and rolls back every earlier row, so
/// the table is left empty rather than partially populated. Returns the number
/// of rows inserted.
#[instrument(level = "info", skip_all, fields(columns = headers.len(), rows = rows.len()))]
pub fn insert_rows(
    conn: &mut Connection,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<usize, ConvertError> {
    if rows.is_empty() {
        debug!("no data rows to insert");
        return Ok(0);
    }

    let sql = insert_sql(TABLE_NAME, &table_columns(headers));
    debug!(%sql, "prepared insert");

    let tx = conn
        .transaction()
        .map_err(|source| ConvertError::InsertStatement {
            operation: "begin insert transaction",
            source,
        })?;
    {
        let mut stmt = tx
            .prepare(&sql)
            .map_err(|source| ConvertError::InsertStatement {
                operation: "prepare insert statement",
                source,
            })?;

        let width = headers.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() > width {
                debug!(row = idx + 1, extra = row.len() - width, "dropping surplus cells");
            }
            let values = (0..width).map(|j| row.get(j).map(String::as_str).unwrap_or(""));
            if let Err(source) = stmt.execute(params_from_iter(values)) {
                warn!(row = idx + 1, error = %source, "row insert failed");
                return Err(ConvertError::RowInsert {
                    row: idx + 1,
                    source,
                });
            }
        }
    }
    tx.commit().map_err(|source| ConvertError::InsertStatement {
        operation: "commit inserted rows",
        source,
    })?;

    Ok(rows.len())
}
