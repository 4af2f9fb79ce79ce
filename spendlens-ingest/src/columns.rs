//! Fixed column headers of the statement export and per-cell conversion.
//!
//! Header names are the exporting bank's own (Russian) strings and must match
//! exactly; extra columns are ignored.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use spendlens_core::{LoadError, Transaction};

pub const OPERATION_DATE: &str = "Дата операции";
pub const PAYMENT_AMOUNT: &str = "Сумма платежа";
pub const OPERATION_AMOUNT: &str = "Сумма операции";
pub const CATEGORY: &str = "Категория";
pub const DESCRIPTION: &str = "Описание";
pub const CARD_NUMBER: &str = "Номер карты";
pub const BONUS: &str = "Бонусы (включая кэшбэк)";

const DATE_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DAY_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

static EMPTY: Cell = Cell::Empty;

/// A single cell, normalized across CSV and spreadsheet readers
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    operation_date: usize,
    payment_amount: usize,
    operation_amount: usize,
    category: usize,
    description: usize,
    card_number: Option<usize>,
    bonus: Option<usize>,
}

impl ColumnMap {
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim().trim_start_matches('\u{feff}') == name)
        };
        let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

        Ok(Self {
            operation_date: require(OPERATION_DATE)?,
            payment_amount: require(PAYMENT_AMOUNT)?,
            operation_amount: require(OPERATION_AMOUNT)?,
            category: require(CATEGORY)?,
            description: require(DESCRIPTION)?,
            card_number: find(CARD_NUMBER),
            bonus: find(BONUS),
        })
    }

    /// Build a transaction from one data row. `row` is 1-based, header excluded.
    pub fn transaction(&self, row: usize, cells: &[Cell]) -> Result<Transaction, LoadError> {
        let cell = |idx: usize| cells.get(idx).unwrap_or(&EMPTY);

        let operation_date = cell_to_datetime(cell(self.operation_date)).ok_or_else(|| {
            LoadError::InvalidDate {
                row,
                value: cell_to_string(cell(self.operation_date)),
            }
        })?;

        let number = |idx: usize, column: &str| {
            cell_to_number(cell(idx)).ok_or_else(|| LoadError::InvalidNumber {
                row,
                column: column.to_string(),
                value: cell_to_string(cell(idx)),
            })
        };

        let operation_amount = number(self.operation_amount, OPERATION_AMOUNT)?;
        let payment_amount = number(self.payment_amount, PAYMENT_AMOUNT)?;
        let bonus = match self.bonus {
            Some(idx) => number(idx, BONUS)?,
            None => 0.0,
        };

        let card_number = self
            .card_number
            .map(|idx| card_to_string(cell(idx)))
            .filter(|s| !s.is_empty());

        Ok(Transaction {
            operation_date,
            payment_amount,
            operation_amount,
            category: cell_to_string(cell(self.category)),
            description: cell_to_string(cell(self.description)),
            card_number,
            bonus,
        })
    }
}

/// Parse an operation date written as text.
pub fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DAY_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Parse an amount like "-1 160,89" or "75.5". Blank is zero; NaN and
/// infinities are rejected.
pub fn parse_amount_text(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convert an Excel serial day number (1900 date system) to a timestamp.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::try_seconds(seconds)?)
}

fn cell_to_datetime(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_date_text(s),
        Cell::Number(n) => excel_serial_to_datetime(*n),
        Cell::Empty => None,
    }
}

fn cell_to_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n).filter(|v| v.is_finite()),
        Cell::Text(s) => parse_amount_text(s),
        Cell::Empty => Some(0.0),
        Cell::DateTime(_) => None,
    }
}

fn cell_to_string(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => n.to_string(),
        Cell::DateTime(dt) => dt.to_string(),
    }
}

// Card numbers typed into a spreadsheet come back as floats.
fn card_to_string(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        other => cell_to_string(other),
    }
}
