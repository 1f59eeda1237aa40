// src/fetch/parse.rs

use csv::ReaderBuilder;
use std::io::Read;
use tracing::{debug, trace};

use crate::error::ConvertError;

/// Read every CSV record from `reader`, header row included.
///
/// Records may have any number of fields, and stray quotes inside unquoted
/// fields are kept as literal characters. Invalid UTF-8 is replaced rather
/// than rejected. Only I/O failures from the underlying reader abort parsing.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Vec<String>>, ConvertError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // ragged rows are legal input
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in rdr.byte_records().enumerate() {
        let record = result.map_err(|source| ConvertError::Parse {
            record: idx + 1,
            source,
        })?;
        let row: Vec<String> = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        trace!(record = idx + 1, fields = row.len(), "parsed record");
        records.push(row);
    }

    debug!(records = records.len(), "CSV parse complete");
    Ok(records)
}
