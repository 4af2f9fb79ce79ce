use spendlens_core::{Error, Locale};
use spendlens_finance::pages::{CardSummary, CategoryAmount};
use spendlens_finance::{Dashboard, JsonSettingsFile};
use spendlens_ingest::StatementFile;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("data")
}

fn dashboard() -> Dashboard<StatementFile, JsonSettingsFile> {
    Dashboard::new(
        StatementFile::new(data_dir().join("operations.csv")),
        JsonSettingsFile::new(data_dir().join("user_settings.json")),
    )
}

fn amount(category: &str, amount: i64) -> CategoryAmount {
    CategoryAmount {
        category: category.to_string(),
        amount,
    }
}

#[test]
fn test_main_page_from_sample() {
    let page = dashboard().main_page("2021-12-31 16:44:00").unwrap();

    assert_eq!(page.greeting, "Добрый день");
    assert_eq!(
        page.cards,
        vec![
            CardSummary { last_digits: "7197".into(), total_spent: 16472.5, cashback: 164.73 },
            CardSummary { last_digits: "4556".into(), total_spent: 5907.5, cashback: 59.08 },
        ]
    );

    let top: Vec<_> = page
        .top_transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(
        top,
        vec![
            "Зарплата",
            "Zara возврат",
            "Кэшбэк за обычные покупки",
            "Аптека Ригла",
            "KFC Колхоз",
        ]
    );

    assert_eq!(page.currency_rates.len(), 2);
    assert_eq!(page.stock_prices.len(), 5);
    assert_eq!(page.stock_prices[0].stock, "AAPL");
}

#[test]
fn test_events_page_month() {
    let page = dashboard().events_page("2021-12-31 23:59:59", "M").unwrap();

    assert_eq!(page.expenses.total_amount, 26880);
    assert_eq!(
        page.expenses.main,
        vec![
            amount("Наличные", 5000),
            amount("Переводы", 4500),
            amount("Рестораны", 2650),
            amount("Транспорт", 1992),
            amount("Супермаркеты", 1980),
            amount("Каршеринг", 1870),
            amount("Цветы", 1758),
            amount("Остальное", 7130),
        ]
    );
    assert_eq!(
        page.expenses.transfers_and_cash,
        vec![amount("Наличные", 5000), amount("Переводы", 4500)]
    );

    assert_eq!(page.income.total_amount, 61120);
    assert_eq!(
        page.income.main,
        vec![amount("Пополнения", 60000), amount("Одежда", 799), amount("Бонусы", 320)]
    );
}

#[test]
fn test_events_page_json_shape() {
    let page = dashboard().events_page("2021-12-31 23:59:59", "all").unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert!(json["expenses"]["total_amount"].is_i64());
    assert_eq!(json["expenses"]["main"].as_array().unwrap().len(), 8);
    assert_eq!(json["income"]["main"][0]["category"], "Пополнения");
    assert_eq!(json["currency_rates"][0]["currency"], "USD");
    assert_eq!(json["stock_prices"][4]["stock"], "TSLA");
}

#[test]
fn test_english_labels_only_change_buckets() {
    let page = dashboard()
        .with_locale(Locale::english())
        .main_page("2021-12-31 07:00:00")
        .unwrap();
    assert_eq!(page.greeting, "Good morning");
}

#[test]
fn test_bad_inputs_propagate() {
    let dash = dashboard();
    assert!(matches!(
        dash.events_page("2021-12-31 23:59:59", "fortnight"),
        Err(Error::InvalidPeriod(_))
    ));

    let missing = Dashboard::new(
        StatementFile::new(data_dir().join("missing.csv")),
        JsonSettingsFile::new(data_dir().join("user_settings.json")),
    );
    assert!(matches!(missing.main_page("2021-12-31 16:44:00"), Err(Error::Load(_))));
}
