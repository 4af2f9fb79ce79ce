//! spendlens-ingest: statement loading (CSV and spreadsheet exports) behind an injectable source.

pub mod columns;
pub mod parsers;
pub mod source;

pub use parsers::csv_export::{parse_statement_csv, parse_statement_str};
pub use parsers::spreadsheet::parse_statement_workbook;
pub use source::{CsvText, StatementFile, TransactionSource, load};
