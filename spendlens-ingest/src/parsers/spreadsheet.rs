//! Spreadsheet statement exports (xlsx/xls/ods), first worksheet only.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use spendlens_core::{LoadError, TransactionTable};

use crate::columns::{Cell, ColumnMap, excel_serial_to_datetime, parse_date_text};

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
            Some(ts) => Cell::DateTime(ts),
            None => Cell::Text(data.to_string()),
        },
        Data::DateTimeIso(s) => match parse_date_text(s) {
            Some(ts) => Cell::DateTime(ts),
            None => Cell::text(s),
        },
        other => Cell::text(&other.to_string()),
    }
}

/// Parse the first worksheet of a workbook on disk.
pub fn parse_statement_workbook(path: &Path) -> Result<TransactionTable, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Spreadsheet("workbook has no worksheets".to_string()))?
        .map_err(|e| LoadError::Spreadsheet(e.to_string()))?;

    let mut rows_iter = range.rows();
    let header: Vec<String> = rows_iter
        .next()
        .ok_or(LoadError::EmptyFile)?
        .iter()
        .map(|c| c.to_string())
        .collect();
    let columns = ColumnMap::resolve(&header)?;

    let mut rows = Vec::new();
    for (i, row) in rows_iter.enumerate() {
        let cells: Vec<Cell> = row.iter().map(to_cell).collect();
        if cells.iter().all(|c| *c == Cell::Empty) {
            continue;
        }
        rows.push(columns.transaction(i + 1, &cells)?);
    }

    Ok(TransactionTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Float(-97.5)), Cell::Number(-97.5));
        assert_eq!(to_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(to_cell(&Data::String("  ".to_string())), Cell::Empty);
        assert_eq!(
            to_cell(&Data::String("Супермаркеты".to_string())),
            Cell::Text("Супермаркеты".to_string())
        );
        assert!(matches!(
            to_cell(&Data::DateTimeIso("2021-12-31T16:44:00".to_string())),
            Cell::DateTime(_)
        ));
    }

    #[test]
    fn test_missing_workbook_is_spreadsheet_error() {
        let err = parse_statement_workbook(Path::new("does/not/exist.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Spreadsheet(_)));
    }
}
