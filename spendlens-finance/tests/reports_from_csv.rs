use chrono::{NaiveDate, Weekday};
use spendlens_core::{DayKind, Locale, TransactionTable};
use spendlens_finance::{
    investment_bank, person_transfers_search, phone_number_search, profitable_cashback_categories,
    simple_search, spending_by_category, spending_by_weekday, spending_by_workday,
};
use spendlens_ingest::{StatementFile, TransactionSource};
use std::path::PathBuf;

fn operations() -> TransactionTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("data")
        .join("operations.csv");
    StatementFile::new(path).load().unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_category_spending_over_quarter() {
    let report = spending_by_category(&operations(), "Супермаркеты", Some("2021-12-31")).unwrap();
    let months: Vec<_> = report.months.iter().map(|m| (m.month, m.total)).collect();
    assert_eq!(
        months,
        vec![
            (NaiveDate::from_ymd_opt(2021, 10, 31).unwrap(), 1620.0),
            (NaiveDate::from_ymd_opt(2021, 11, 30).unwrap(), 1350.0),
            (NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(), 1980.0),
        ]
    );
}

#[test]
fn test_weekday_averages() {
    let report = spending_by_weekday(&operations(), &Locale::russian(), Some("2021-12-31")).unwrap();
    assert_eq!(report.rows.len(), 7);
    assert_eq!(report.rows[0].weekday, Weekday::Mon);
    assert_eq!(report.rows[0].name, "Понедельник");
    assert!(close(report.rows[4].average, 854.2307692307693));
    assert!(close(report.rows[6].average, 726.2142857142857));
}

#[test]
fn test_workday_vs_weekend() {
    let report = spending_by_workday(&operations(), &Locale::russian(), Some("2021-12-31")).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].kind, DayKind::Workday);
    assert!(close(report.rows[0].average, 40184.0 / 67.0));
    assert_eq!(report.rows[1].name, "Выходной");
    assert!(close(report.rows[1].average, 16853.5 / 27.0));
}

#[test]
fn test_december_cashback_ranking() {
    let ranking = profitable_cashback_categories(&operations(), 2021, 12).unwrap();
    let top: Vec<_> = ranking.0.iter().take(3).map(|(c, v)| (c.as_str(), *v)).collect();
    assert_eq!(
        top,
        vec![("Рестораны", 24.0), ("Супермаркеты", 18.0), ("Транспорт", 18.0)]
    );
    assert_eq!(ranking.get("Переводы"), Some(0.0));
}

#[test]
fn test_december_round_ups() {
    let rows = operations().into_rows();
    assert_eq!(investment_bank("2021-12", &rows, 50.0).unwrap(), 920.0);
    assert_eq!(investment_bank("2021-12", &rows, 100.0).unwrap(), 1820.0);
    assert_eq!(investment_bank("2020-01", &rows, 50.0).unwrap(), 0.0);
}

#[test]
fn test_searches_on_sample() {
    let table = operations();

    let phones = phone_number_search(&table).unwrap();
    assert_eq!(phones.len(), 2);

    let people = person_transfers_search(&table, &Locale::russian()).unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people.rows()[0].description, "Иванов И.");

    let zara = simple_search(&table, "zara").unwrap();
    assert!(zara.iter().all(|t| t.description.starts_with("Zara")));
    assert!(zara.len() > 1);
}
