//! Spreadsheet loading
//!
//! Workbooks (xlsx, xlsm, xlsb, xls, ods) are read with calamine, `.csv`
//! files with the csv crate. Either way the first row holds the headers and
//! the result goes through [`Table::from_source`] for schema normalization.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{info, warn};

use super::{Cell, Table};
use crate::error::LoadError;

/// Load a listing table, degrading to an empty canonical table on failure
pub fn load(path: impl AsRef<Path>) -> Table {
    load_sheet(path, None)
}

/// Same as [`load`], reading a named worksheet instead of the first one
pub fn load_sheet(path: impl AsRef<Path>, sheet: Option<&str>) -> Table {
    let path = path.as_ref();

    match try_load(path, sheet) {
        Ok(table) => table,
        Err(e @ LoadError::SourceMissing { .. }) => {
            warn!("{}, serving an empty inventory", e);
            Table::empty()
        }
        Err(e) => {
            warn!("Error reading listings: {}", e);
            Table::empty()
        }
    }
}

/// Load a listing table, reporting why the source could not be used
pub fn try_load(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Table, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::SourceMissing {
            path: path.to_path_buf(),
        });
    }

    let (headers, rows) = if is_csv(path) {
        read_csv(path)?
    } else {
        read_workbook(path, sheet)?
    };

    let table = Table::from_source(headers, rows);
    info!(
        "Loaded {} listings with {} columns from {:?}",
        table.len(),
        table.columns().len(),
        path
    );

    Ok(table)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

type RawSheet = (Vec<String>, Vec<Vec<Cell>>);

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<RawSheet, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::unparseable(path, e))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| LoadError::unparseable(path, e))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::unparseable(path, "workbook has no worksheets"))?
            .map_err(|e| LoadError::unparseable(path, e))?,
    };

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(LoadError::unparseable(path, "worksheet is empty"));
    };

    let headers = header_row
        .iter()
        .map(|data| data.to_string())
        .collect();

    let rows = rows
        .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>())
        .filter(|row| !is_blank(row))
        .collect();

    Ok((headers, rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<RawSheet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::unparseable(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| LoadError::unparseable(path, e))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::unparseable(path, e))?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        records.push(fields);
    }

    let width = headers.len();
    let numeric: Vec<bool> = (0..width)
        .map(|col| {
            records
                .iter()
                .filter_map(|r| r.get(col))
                .filter(|f| !f.is_empty())
                .all(|f| f.trim().parse::<f64>().is_ok())
        })
        .collect();

    let rows = records
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .enumerate()
                .map(|(col, field)| {
                    if field.is_empty() {
                        return Cell::Empty;
                    }
                    match field.trim().parse::<f64>() {
                        Ok(n) if numeric.get(col).copied().unwrap_or(false) => Cell::Number(n),
                        _ => Cell::Text(field),
                    }
                })
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

fn is_blank(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_empty)
}
