//! spendlens-core: transaction model, error taxonomy, period windows and locale tables

pub mod error;
pub mod locale;
pub mod period;
pub mod time;
pub mod transaction;

pub use error::{Error, LoadError, Result};
pub use locale::{DayKind, DayPart, Locale};
pub use period::{Period, Window, filter, filter_by_period};
pub use time::{now_in, parse_report_date, parse_timestamp, parse_year_month};
pub use transaction::{Transaction, TransactionTable};

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to the nearest integer, ties to even.
pub fn round_whole(x: f64) -> f64 {
    x.round_ties_even()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round2(3.004), 3.0);
        assert_eq!(round2(2.999999), 3.0);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round_whole(2.5), 2.0);
        assert_eq!(round_whole(3.5), 4.0);
        assert_eq!(round_whole(1499.6), 1500.0);
    }
}
