//! CSV statement exports.
//!
//! Banks export either `;`-separated (decimal comma) or `,`-separated files,
//! so the delimiter is picked from the header line:
//!   "Дата операции";"Дата платежа";"Номер карты";"Статус";"Сумма операции";...
//!   "31.12.2021 16:44:00";"31.12.2021";"*7197";"OK";"-160,89";...

use std::io::Read;

use spendlens_core::{LoadError, TransactionTable};

use crate::columns::{Cell, ColumnMap};

fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons >= commas && semicolons > 0 {
        b';'
    } else {
        b','
    }
}

/// Parse a CSV export from any reader.
pub fn parse_statement_csv<R: Read>(mut reader: R) -> Result<TransactionTable, LoadError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| LoadError::Csv(e.to_string()))?;
    parse_statement_str(&content)
}

/// Parse CSV export text.
pub fn parse_statement_str(content: &str) -> Result<TransactionTable, LoadError> {
    let content = content.trim_start_matches('\u{feff}');
    let header_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(LoadError::EmptyFile)?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| LoadError::Csv(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LoadError::Csv(e.to_string()))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let cells: Vec<Cell> = record.iter().map(Cell::text).collect();
        rows.push(columns.transaction(i + 1, &cells)?);
    }

    Ok(TransactionTable::new(rows))
}
