//! Which categories earned the most cashback in a given month.

use chrono::Datelike;
use serde::{Serialize, Serializer};

use spendlens_core::{Error, Result, TransactionTable};

use crate::render::{Render, text_table};

/// Category -> bonus total, highest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashbackRanking(pub Vec<(String, f64)>);

impl CashbackRanking {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.0.iter().find(|(c, _)| c == category).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Serialized as a JSON object in ranking order.
impl Serialize for CashbackRanking {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl Render for CashbackRanking {
    fn render(&self) -> String {
        let rows = self
            .0
            .iter()
            .map(|(c, v)| vec![c.clone(), format!("{v:.2}")])
            .collect();
        text_table(&["category", "cashback"], rows)
    }
}

/// Sum of bonuses per category for `year`-`month`, sorted descending.
/// Ties keep the order in which categories first appear.
pub fn profitable_cashback_categories(
    data: &TransactionTable,
    year: i32,
    month: u32,
) -> Result<CashbackRanking> {
    if !(1..=12).contains(&month) {
        let err = Error::InvalidInput(format!("month must be 1..=12, got {month}"));
        log::error!("error analyzing cashback categories: {err}");
        return Err(err);
    }

    let mut totals: Vec<(String, f64)> = Vec::new();
    for t in data.iter().filter(|t| {
        t.operation_date.year() == year && t.operation_date.month() == month && !t.category.is_empty()
    }) {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.bonus,
            None => totals.push((t.category.clone(), t.bonus)),
        }
    }

    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(CashbackRanking(totals))
}
