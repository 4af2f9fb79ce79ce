//! Where transaction tables come from.
//!
//! Every `load` call re-reads its storage; nothing is cached between calls.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use spendlens_core::{LoadError, TransactionTable};

use crate::parsers::csv_export::parse_statement_csv;
use crate::parsers::spreadsheet::parse_statement_workbook;

/// Storage handle that can produce a fresh transaction table
pub trait TransactionSource {
    fn load(&self) -> Result<TransactionTable, LoadError>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String {
        "in-memory table".to_string()
    }
}

/// An in-memory table is its own source (test fixtures, pre-loaded data).
impl TransactionSource for TransactionTable {
    fn load(&self) -> Result<TransactionTable, LoadError> {
        Ok(self.clone())
    }
}

impl<T: TransactionSource + ?Sized> TransactionSource for &T {
    fn load(&self) -> Result<TransactionTable, LoadError> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Statement export on disk; format chosen by extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    path: PathBuf,
}

impl StatementFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_workbook(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "xlsx" | "xlsm" | "xls" | "ods"))
            .unwrap_or(false)
    }
}

impl TransactionSource for StatementFile {
    fn load(&self) -> Result<TransactionTable, LoadError> {
        let table = if self.is_workbook() {
            std::fs::metadata(&self.path).map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
            parse_statement_workbook(&self.path)
        } else {
            let file = File::open(&self.path).map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
            parse_statement_csv(BufReader::new(file))
        };

        match &table {
            Ok(t) => log::debug!("loaded {} rows from {}", t.len(), self.path.display()),
            Err(e) => log::error!("error loading {}: {e}", self.path.display()),
        }
        table
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV text held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvText(pub String);

impl TransactionSource for CsvText {
    fn load(&self) -> Result<TransactionTable, LoadError> {
        parse_statement_csv(self.0.as_bytes())
    }

    fn describe(&self) -> String {
        "in-memory CSV".to_string()
    }
}

/// Load a table from any source.
pub fn load<S: TransactionSource + ?Sized>(source: &S) -> Result<TransactionTable, LoadError> {
    source.load()
}
