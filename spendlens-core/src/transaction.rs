//! Transaction records and the in-memory table they are loaded into

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of a bank statement export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Operation timestamp
    pub operation_date: NaiveDateTime,
    /// Amount charged to the account, in account currency
    pub payment_amount: f64,
    /// Positive = income, negative = expense
    pub operation_amount: f64,
    pub category: String,
    pub description: String,
    /// Masked card number (e.g. "*7197"), absent for non-card operations
    pub card_number: Option<String>,
    /// Bonus points including cashback
    pub bonus: f64,
}

impl Transaction {
    /// Create a transaction whose payment amount equals its operation amount.
    pub fn new(
        operation_date: NaiveDateTime,
        operation_amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            operation_date,
            payment_amount: operation_amount,
            operation_amount,
            category: category.into(),
            description: description.into(),
            card_number: None,
            bonus: 0.0,
        }
    }

    pub fn with_payment_amount(mut self, amount: f64) -> Self {
        self.payment_amount = amount;
        self
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card_number = Some(card.into());
        self
    }

    pub fn with_bonus(mut self, bonus: f64) -> Self {
        self.bonus = bonus;
        self
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.operation_amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.operation_amount > 0.0
    }

    /// Get the absolute operation amount
    pub fn abs_amount(&self) -> f64 {
        self.operation_amount.abs()
    }
}

/// Ordered collection of transactions as they appeared in the export.
///
/// Every filtering operation keeps the original row order, which is what
/// makes "top N" selection deterministic on ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Transaction> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    /// Keep the rows matching `pred`, preserving order.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&Transaction) -> bool,
    {
        self.rows.iter().filter(|t| pred(t)).cloned().collect()
    }

    /// Rows with `start <= operation_date <= end`.
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.filter(|t| t.operation_date >= start && t.operation_date <= end)
    }

    pub fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter().filter(|t| t.is_expense())
    }

    pub fn incomes(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter().filter(|t| t.is_income())
    }

    /// Earliest operation date in the table.
    pub fn min_date(&self) -> Option<NaiveDateTime> {
        self.rows.iter().map(|t| t.operation_date).min()
    }
}

impl FromIterator<Transaction> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for TransactionTable {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_transaction_creation() {
        let t = Transaction::new(at(2021, 12, 1), -4500.0, "Супермаркеты", "Магнит")
            .with_card("*7197")
            .with_bonus(45.0);
        assert!(t.is_expense());
        assert!(!t.is_income());
        assert_eq!(t.abs_amount(), 4500.0);
        assert_eq!(t.payment_amount, -4500.0);
        assert_eq!(t.card_number.as_deref(), Some("*7197"));
    }

    #[test]
    fn test_zero_amount_is_neither() {
        let t = Transaction::new(at(2021, 12, 1), 0.0, "Прочее", "");
        assert!(!t.is_expense());
        assert!(!t.is_income());
    }

    #[test]
    fn test_between_is_inclusive_and_ordered() {
        let table: TransactionTable = vec![
            Transaction::new(at(2021, 12, 3), -3.0, "A", "third"),
            Transaction::new(at(2021, 12, 1), -1.0, "A", "first"),
            Transaction::new(at(2021, 12, 5), -5.0, "A", "fifth"),
        ]
        .into_iter()
        .collect();

        let window = table.between(at(2021, 12, 1), at(2021, 12, 3));
        let names: Vec<_> = window.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["third", "first"]);
        assert_eq!(table.min_date(), Some(at(2021, 12, 1)));
    }

    #[test]
    fn test_serializes_as_list() {
        let table = TransactionTable::new(vec![Transaction::new(at(2021, 12, 1), 10.0, "A", "x")]);
        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["operation_amount"], 10.0);
    }
}
