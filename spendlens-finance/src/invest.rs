//! "Investment piggy bank": round every purchase up to a multiple of a limit
//! and count the difference as saved.

use chrono::Datelike;

use spendlens_core::{Error, Result, Transaction, parse_year_month, round2};

/// Amount saved by rounding one expense of `amount` up to the next multiple of `limit`.
///
/// An exact multiple still rounds up to the following one.
pub fn round_up_savings(amount: f64, limit: f64) -> f64 {
    let spent = amount.abs();
    let rounded = ((spent / limit).floor() + 1.0) * limit;
    rounded - spent
}

/// Total savings for the month "YYYY-MM", rounded to cents.
pub fn investment_bank(month: &str, transactions: &[Transaction], limit: f64) -> Result<f64> {
    let (year, month_no) = parse_year_month(month)
        .inspect_err(|e| log::error!("error calculating investment savings: {e}"))?;
    if limit.is_nan() || limit <= 0.0 {
        let err = Error::InvalidInput(format!("rounding limit must be positive, got {limit}"));
        log::error!("error calculating investment savings: {err}");
        return Err(err);
    }

    let total: f64 = transactions
        .iter()
        .filter(|t| {
            t.is_expense()
                && t.operation_date.year() == year
                && t.operation_date.month() == month_no
        })
        .map(|t| round_up_savings(t.operation_amount, limit))
        .sum();

    Ok(round2(total))
}
