//! Reading xlsx files into the text-only [`Workbook`] model.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use xlsx2xml_model::{Row, Sheet, Workbook};

use crate::error::{IngestError, Result};

/// Reads the first worksheet of an xlsx file.
///
/// Later sheets are never converted, so they are not decoded. Rows and
/// columns keep their absolute positions: row 0 / column 0 is always A1,
/// even when the used range starts further down or right.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|source| IngestError::WorkbookOpen {
            path: path.to_path_buf(),
            source,
        })?;

    let source_name = path.display().to_string();
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(Workbook::new(source_name, Vec::new()));
    };

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(source)) => {
            return Err(IngestError::SheetRead {
                path: path.to_path_buf(),
                sheet: sheet_name,
                source,
            });
        }
        None => return Ok(Workbook::new(source_name, Vec::new())),
    };

    let rows = range_to_rows(&range);
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = rows.len(),
        "read worksheet"
    );
    Ok(Workbook::new(source_name, vec![Sheet::new(sheet_name, rows)]))
}

/// Converts a calamine range to text rows anchored at A1.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Row> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row: Row = vec![String::new(); start_col as usize];
        row.extend(cells.iter().map(cell_text));
        trim_trailing_empty(&mut row);
        rows.push(row);
    }
    rows
}

/// Display text of a cell.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_float(*value),
        Data::Bool(value) => String::from(if *value { "TRUE" } else { "FALSE" }),
        other => other.to_string(),
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn trim_trailing_empty(row: &mut Row) {
    while row.last().is_some_and(String::is_empty) {
        row.pop();
    }
}
