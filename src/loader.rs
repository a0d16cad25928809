use crate::error::{AppError, AppResult};
use crate::types::{Cell, ElectionTable};
use crate::util::{is_missing_marker, parse_f64_safe};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    /// Rows whose width differed from the header; padded or truncated.
    pub ragged_rows: usize,
    pub missing_cells: usize,
}

/// Classify one raw CSV field.
pub fn parse_cell(raw: &str) -> Cell {
    if is_missing_marker(raw) {
        return Cell::Missing;
    }
    match parse_f64_safe(Some(raw)) {
        Some(n) => Cell::Number(n),
        None => Cell::Text(raw.trim().to_string()),
    }
}

pub fn read_table<R: Read>(reader: R) -> AppResult<(ElectionTable, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::MissingHeader);
    }
    let width = headers.len();
    let mut table = ElectionTable::new(headers.iter().map(|h| h.trim().to_string()));

    let mut total_rows = 0usize;
    let mut ragged_rows = 0usize;
    let mut missing_cells = 0usize;
    for result in rdr.records() {
        let record = result?;
        total_rows += 1;
        if record.len() != width {
            ragged_rows += 1;
        }
        let cells: Vec<Cell> = record.iter().map(parse_cell).collect();
        missing_cells += cells.iter().filter(|c| c.is_missing()).count();
        missing_cells += width.saturating_sub(cells.len());
        table.push_row(cells);
    }

    debug!(total_rows, ragged_rows, missing_cells, "loaded election table");
    let report = LoadReport {
        total_rows,
        ragged_rows,
        missing_cells,
    };
    Ok((table, report))
}

pub fn load_table<P: AsRef<Path>>(path: P) -> AppResult<(ElectionTable, LoadReport)> {
    let file = File::open(path)?;
    read_table(file)
}
