//! Error taxonomy shared by the spendlens crates.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading a statement export into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("statement has no header row")]
    EmptyFile,

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: cannot parse operation date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: cannot parse '{value}' in column '{column}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Top-level error returned by filters, aggregators, search and page builders.
#[derive(Debug, Error)]
pub enum Error {
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("invalid period '{0}', use W, M, Y or ALL")]
    InvalidPeriod(String),

    #[error("search failed: {0}")]
    Search(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_converts() {
        let err: Error = LoadError::MissingColumn("Категория".to_string()).into();
        assert!(matches!(err, Error::Load(LoadError::MissingColumn(_))));
        assert_eq!(
            err.to_string(),
            "load failed: missing required column 'Категория'"
        );
    }

    #[test]
    fn test_invalid_period_message() {
        let err = Error::InvalidPeriod("Q".to_string());
        assert_eq!(err.to_string(), "invalid period 'Q', use W, M, Y or ALL");
    }
}
