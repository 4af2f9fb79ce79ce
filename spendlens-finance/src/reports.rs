//! Spending reports over the trailing 90 days: by category per month,
//! by weekday, and workday vs weekend.
//!
//! Each report takes an optional reference date "YYYY-MM-DD" (midnight);
//! without one the window ends now.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

use spendlens_core::{DayKind, Locale, Result, TransactionTable, Window, parse_report_date};

use crate::render::{Render, text_table};

/// Length of the trailing report window, in days
pub const REPORT_WINDOW_DAYS: i64 = 90;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Resolve the reference date of a report: the given date at midnight, or now.
pub fn reference_date(date: Option<&str>) -> Result<NaiveDateTime> {
    match date {
        Some(d) => parse_report_date(d),
        None => Ok(Local::now().naive_local()),
    }
}

fn report_window(report: &str, date: Option<&str>) -> Result<Window> {
    let reference = reference_date(date).inspect_err(|e| log::error!("error in {report}: {e}"))?;
    Ok(Window::trailing(reference, REPORT_WINDOW_DAYS))
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Total spent in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    /// Last day of the month
    pub month: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub months: Vec<MonthlySpend>,
}

/// Monthly expense totals of one category over the last 90 days.
pub fn spending_by_category(
    transactions: &TransactionTable,
    category: &str,
    date: Option<&str>,
) -> Result<CategorySpending> {
    let window = report_window("spending_by_category", date)?;

    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for t in transactions
        .expenses()
        .filter(|t| window.contains(t.operation_date) && t.category == category)
    {
        let key = (t.operation_date.year(), t.operation_date.month());
        *by_month.entry(key).or_insert(0.0) += t.operation_amount;
    }

    let months = by_month
        .into_iter()
        .filter_map(|((y, m), sum)| {
            month_end(y, m).map(|month| MonthlySpend {
                month,
                total: sum.abs(),
            })
        })
        .collect();

    Ok(CategorySpending {
        category: category.to_string(),
        months,
    })
}

impl Render for CategorySpending {
    fn render(&self) -> String {
        let rows = self
            .months
            .iter()
            .map(|m| vec![m.month.to_string(), format!("{:.2}", m.total)])
            .collect();
        format!(
            "{}\n{}",
            self.category,
            text_table(&["month", "total"], rows)
        )
    }
}

/// Average expense on one weekday
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySpend {
    pub weekday: Weekday,
    pub name: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySpending {
    pub rows: Vec<WeekdaySpend>,
}

/// Mean expense per weekday over the last 90 days, Monday first.
/// Weekdays without expenses are absent.
pub fn spending_by_weekday(
    transactions: &TransactionTable,
    locale: &Locale,
    date: Option<&str>,
) -> Result<WeekdaySpending> {
    let window = report_window("spending_by_weekday", date)?;

    let mut acc: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for t in transactions
        .expenses()
        .filter(|t| window.contains(t.operation_date))
    {
        let slot = acc
            .entry(t.operation_date.weekday().num_days_from_monday())
            .or_insert((0.0, 0));
        slot.0 += t.operation_amount;
        slot.1 += 1;
    }

    let rows = acc
        .into_iter()
        .map(|(idx, (sum, n))| {
            let weekday = WEEK[idx as usize];
            WeekdaySpend {
                weekday,
                name: locale.weekday_name(weekday).to_string(),
                average: (sum / n as f64).abs(),
            }
        })
        .collect();

    Ok(WeekdaySpending { rows })
}

impl Render for WeekdaySpending {
    fn render(&self) -> String {
        let rows = self
            .rows
            .iter()
            .map(|r| vec![r.name.clone(), format!("{:.2}", r.average)])
            .collect();
        text_table(&["weekday", "average"], rows)
    }
}

/// Average expense on workdays or weekends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayKindSpend {
    pub kind: DayKind,
    pub name: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkdaySpending {
    pub rows: Vec<DayKindSpend>,
}

/// Mean expense on workdays vs weekends over the last 90 days, workdays first.
pub fn spending_by_workday(
    transactions: &TransactionTable,
    locale: &Locale,
    date: Option<&str>,
) -> Result<WorkdaySpending> {
    let window = report_window("spending_by_workday", date)?;

    let mut acc: BTreeMap<DayKind, (f64, usize)> = BTreeMap::new();
    for t in transactions
        .expenses()
        .filter(|t| window.contains(t.operation_date))
    {
        let slot = acc
            .entry(DayKind::of(t.operation_date.weekday()))
            .or_insert((0.0, 0));
        slot.0 += t.operation_amount;
        slot.1 += 1;
    }

    let rows = acc
        .into_iter()
        .map(|(kind, (sum, n))| DayKindSpend {
            kind,
            name: locale.day_kind_name(kind).to_string(),
            average: (sum / n as f64).abs(),
        })
        .collect();

    Ok(WorkdaySpending { rows })
}

impl Render for WorkdaySpending {
    fn render(&self) -> String {
        let rows = self
            .rows
            .iter()
            .map(|r| vec![r.name.clone(), format!("{:.2}", r.average)])
            .collect();
        text_table(&["day type", "average"], rows)
    }
}
