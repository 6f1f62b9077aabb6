//! Spreadsheet Column Extraction

use crate::error::IngestError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Read the first sheet of an `.xlsx`/`.xls` workbook and return the first
/// column whose non-missing cells all parse as numbers. The first row is
/// treated as a header and excluded.
pub(crate) fn read_spreadsheet(path: &Path) -> Result<Vec<f64>, IngestError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoNumericColumn)?
        .map_err(|e| IngestError::Spreadsheet(e.to_string()))?;

    let width = range.width();
    let rows: Vec<_> = range.rows().skip(1).collect();

    for column in 0..width {
        let mut values = Vec::new();
        let mut all_numeric = true;
        for row in &rows {
            match row.get(column) {
                None | Some(Data::Empty) => continue,
                Some(cell) => match numeric_cell(cell) {
                    Some(v) => values.push(v),
                    None => {
                        all_numeric = false;
                        break;
                    }
                },
            }
        }
        if all_numeric && !values.is_empty() {
            debug!(column, n = values.len(), "spreadsheet column selected");
            return Ok(values);
        }
    }

    Err(IngestError::NoNumericColumn)
}

fn numeric_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
