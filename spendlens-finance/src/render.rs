//! Plain-text rendering of report results, used for report files and CLI output.

use spendlens_core::{Transaction, TransactionTable};

/// Human-readable rendering of a report result
pub trait Render {
    fn render(&self) -> String;
}

impl Render for f64 {
    fn render(&self) -> String {
        format!("{self:.2}")
    }
}

impl Render for TransactionTable {
    fn render(&self) -> String {
        render_transactions(self.rows())
    }
}

fn render_transactions(rows: &[Transaction]) -> String {
    let body = rows
        .iter()
        .map(|t| {
            vec![
                t.operation_date.format("%Y-%m-%d %H:%M:%S").to_string(),
                t.card_number.clone().unwrap_or_default(),
                format!("{:.2}", t.operation_amount),
                format!("{:.2}", t.payment_amount),
                t.category.clone(),
                t.description.clone(),
                format!("{:.2}", t.bonus),
            ]
        })
        .collect();
    text_table(
        &["date", "card", "amount", "payment", "category", "description", "bonus"],
        body,
    )
}

/// Render rows as a left-aligned table with a header line.
pub fn text_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c}{}", " ".repeat(w - c.chars().count())))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(line(headers.to_vec()));
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}
