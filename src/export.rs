//! CSV export of extraction results
//!
//! Header row with the column names, one record per row, no index column.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::ExportError;
use crate::extractors::ExtractionResult;

/// Write `result` as CSV to any writer
pub fn write_csv<W: Write>(writer: W, result: &ExtractionResult) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(result.headers())?;
    for row in result.rows() {
        wtr.write_record(row.values())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `result` as a CSV string
pub fn to_csv_string(result: &ExtractionResult) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, result)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `result` to a file at `path`, replacing any existing file
pub fn save_csv(path: &Path, result: &ExtractionResult) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(file, result)?;
    info!("saved {} rows to {}", result.len(), path.display());
    Ok(())
}

/// Read CSV text back into header names and column -> value rows
pub fn parse_csv(text: &str) -> Result<(Vec<String>, Vec<HashMap<String, String>>), ExportError> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr.headers()?.iter().map(String::from).collect();
    let rows = rdr
        .deserialize::<HashMap<String, String>>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok((headers, rows))
}
