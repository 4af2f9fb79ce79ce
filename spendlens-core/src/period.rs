//! Period windows (week/month/year/all) for restricting a table before aggregation.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::transaction::TransactionTable;

/// Reporting period code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "M")]
    Month,
    #[serde(rename = "Y")]
    Year,
    #[serde(rename = "ALL")]
    All,
}

impl Period {
    pub fn code(&self) -> &'static str {
        match self {
            Period::Week => "W",
            Period::Month => "M",
            Period::Year => "Y",
            Period::All => "ALL",
        }
    }

    /// Start of the window ending at `reference`.
    ///
    /// `All` starts at the earliest row of `table`; `None` when the table is empty.
    pub fn window_start(
        &self,
        reference: NaiveDateTime,
        table: &TransactionTable,
    ) -> Option<NaiveDateTime> {
        match self {
            Period::Week => {
                let back = reference.weekday().num_days_from_monday() as i64;
                Some(reference - Duration::days(back))
            }
            Period::Month => {
                let first = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?;
                Some(first.and_time(NaiveTime::MIN))
            }
            Period::Year => {
                let first = NaiveDate::from_ymd_opt(reference.year(), 1, 1)?;
                Some(first.and_time(NaiveTime::MIN))
            }
            Period::All => table.min_date(),
        }
    }

    pub fn window(&self, reference: NaiveDateTime, table: &TransactionTable) -> Option<Window> {
        self.window_start(reference, table)
            .map(|start| Window::new(start, reference))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" | "WEEK" => Ok(Period::Week),
            "M" | "MONTH" => Ok(Period::Month),
            "Y" | "YEAR" => Ok(Period::Year),
            "ALL" => Ok(Period::All),
            _ => Err(Error::InvalidPeriod(s.to_string())),
        }
    }
}

/// Closed interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The `days`-long window ending at `end`.
    pub fn trailing(end: NaiveDateTime, days: i64) -> Self {
        Self::new(end - Duration::days(days), end)
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn apply(&self, table: &TransactionTable) -> TransactionTable {
        table.between(self.start, self.end)
    }
}

/// Rows of `table` inside the `period` window ending at `reference`.
pub fn filter_by_period(
    table: &TransactionTable,
    reference: NaiveDateTime,
    period: Period,
) -> TransactionTable {
    let filtered = match period.window(reference, table) {
        Some(window) => window.apply(table),
        None => TransactionTable::default(),
    };
    log::debug!(
        "period {} ending {}: {} of {} rows",
        period,
        reference,
        filtered.len(),
        table.len()
    );
    filtered
}

/// Same as [`filter_by_period`] but takes the raw period token.
pub fn filter(table: &TransactionTable, reference: NaiveDateTime, period: &str) -> Result<TransactionTable> {
    let period: Period = period.parse()?;
    Ok(filter_by_period(table, reference, period))
}
