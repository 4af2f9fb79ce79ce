//! Dashboard payloads: the main page (cards, top transactions, greeting)
//! and the events page (expense and income breakdown for a period).

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use spendlens_core::{
    Locale, Period, Result, Transaction, TransactionTable, filter_by_period, parse_timestamp,
    round2, round_whole,
};
use spendlens_ingest::TransactionSource;

use crate::market::{CurrencyRate, MarketData, StockPrice, StubMarketData, currency_rates, stock_prices};
use crate::settings::{Settings, SettingsSource};

/// Rows shown in the main page's top list
pub const TOP_TRANSACTIONS: usize = 5;
/// Named expense categories on the events page before the rest is bucketed
pub const TOP_EXPENSE_CATEGORIES: usize = 7;
/// Flat cashback rate used for the card widget
pub const CARD_CASHBACK_RATE: f64 = 0.01;

/// Which amount ranks the "top N" list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TopBy {
    #[default]
    PaymentAmount,
    OperationAmount,
}

impl TopBy {
    fn amount(&self, t: &Transaction) -> f64 {
        match self {
            TopBy::PaymentAmount => t.payment_amount,
            TopBy::OperationAmount => t.operation_amount,
        }
    }
}

/// The `n` largest rows by `by`, ties in table order.
pub fn top_transactions(table: &TransactionTable, n: usize, by: TopBy) -> Vec<Transaction> {
    let mut rows: Vec<&Transaction> = table.iter().collect();
    rows.sort_by(|a, b| by.amount(b).total_cmp(&by.amount(a)));
    rows.into_iter().take(n).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

fn last_digits(card: &str) -> String {
    let n = card.chars().count();
    card.chars().skip(n.saturating_sub(4)).collect()
}

/// Spending per card inside `window`, for every card that appears in `all`.
pub fn card_summaries(all: &TransactionTable, window: &TransactionTable) -> Vec<CardSummary> {
    let mut cards: Vec<&str> = Vec::new();
    for card in all.iter().filter_map(|t| t.card_number.as_deref()) {
        if !cards.contains(&card) {
            cards.push(card);
        }
    }

    cards
        .into_iter()
        .map(|card| {
            let total: f64 = window
                .expenses()
                .filter(|t| t.card_number.as_deref() == Some(card))
                .map(|t| t.abs_amount())
                .sum();
            CardSummary {
                last_digits: last_digits(card),
                total_spent: round2(total),
                cashback: round2(total * CARD_CASHBACK_RATE),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTransaction {
    pub date: NaiveDateTime,
    pub payment_amount: f64,
    pub category: String,
    pub description: String,
}

impl From<Transaction> for TopTransaction {
    fn from(t: Transaction) -> Self {
        Self {
            date: t.operation_date,
            payment_amount: t.payment_amount,
            category: t.category,
            description: t.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainPage {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

/// Main page for `reference`: current-month cards and top rows.
pub fn build_main_page<M: MarketData + ?Sized>(
    table: &TransactionTable,
    settings: &Settings,
    market: &M,
    locale: &Locale,
    reference: NaiveDateTime,
) -> MainPage {
    let month = filter_by_period(table, reference, Period::Month);
    MainPage {
        greeting: locale.greeting(reference.hour()).to_string(),
        cards: card_summaries(table, &month),
        top_transactions: top_transactions(&month, TOP_TRANSACTIONS, TopBy::PaymentAmount)
            .into_iter()
            .map(TopTransaction::from)
            .collect(),
        currency_rates: currency_rates(settings, market),
        stock_prices: stock_prices(settings, market),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensesBlock {
    pub total_amount: i64,
    pub main: Vec<CategoryAmount>,
    pub transfers_and_cash: Vec<CategoryAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeBlock {
    pub total_amount: i64,
    pub main: Vec<CategoryAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsPage {
    pub expenses: ExpensesBlock,
    pub income: IncomeBlock,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

/// Absolute totals per category, largest first; ties keep first-seen order.
fn totals_by_category<'a>(rows: impl Iterator<Item = &'a Transaction>) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for t in rows.filter(|t| !t.category.is_empty()) {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.abs_amount(),
            None => totals.push((t.category.clone(), t.abs_amount())),
        }
    }
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
}

fn whole(x: f64) -> i64 {
    round_whole(x) as i64
}

fn to_amounts(totals: Vec<(String, f64)>) -> Vec<CategoryAmount> {
    totals
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category,
            amount: whole(amount),
        })
        .collect()
}

/// Expense breakdown of an already filtered table.
pub fn expenses_block(window: &TransactionTable, locale: &Locale) -> ExpensesBlock {
    let total: f64 = window.expenses().map(|t| t.abs_amount()).sum();

    let mut main = totals_by_category(window.expenses());
    if main.len() > TOP_EXPENSE_CATEGORIES {
        let other: f64 = main[TOP_EXPENSE_CATEGORIES..].iter().map(|(_, v)| v).sum();
        main.truncate(TOP_EXPENSE_CATEGORIES);
        main.push((locale.other.to_string(), other));
    }

    let transfers_and_cash = totals_by_category(window.expenses().filter(|t| {
        t.category == locale.transfers_category || t.category == locale.cash_category
    }));

    ExpensesBlock {
        total_amount: whole(total),
        main: to_amounts(main),
        transfers_and_cash: to_amounts(transfers_and_cash),
    }
}

/// Income breakdown of an already filtered table.
pub fn income_block(window: &TransactionTable) -> IncomeBlock {
    let total: f64 = window.incomes().map(|t| t.operation_amount).sum();
    IncomeBlock {
        total_amount: whole(total),
        main: to_amounts(totals_by_category(window.incomes())),
    }
}

/// Events page for the `period` window ending at `reference`.
pub fn build_events_page<M: MarketData + ?Sized>(
    table: &TransactionTable,
    settings: &Settings,
    market: &M,
    locale: &Locale,
    reference: NaiveDateTime,
    period: Period,
) -> EventsPage {
    let window = filter_by_period(table, reference, period);
    EventsPage {
        expenses: expenses_block(&window, locale),
        income: income_block(&window),
        currency_rates: currency_rates(settings, market),
        stock_prices: stock_prices(settings, market),
    }
}

/// Page entry points over a transaction source and a settings source.
/// Both are reloaded on every call.
pub struct Dashboard<S, C, M = StubMarketData> {
    source: S,
    settings: C,
    market: M,
    locale: Locale,
}

impl<S, C> Dashboard<S, C, StubMarketData>
where
    S: TransactionSource,
    C: SettingsSource,
{
    pub fn new(source: S, settings: C) -> Self {
        Self::with_market(source, settings, StubMarketData::default())
    }
}

impl<S, C, M> Dashboard<S, C, M>
where
    S: TransactionSource,
    C: SettingsSource,
    M: MarketData,
{
    pub fn with_market(source: S, settings: C, market: M) -> Self {
        Self {
            source,
            settings,
            market,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Main page for a timestamp like "2021-12-31 16:44:00".
    pub fn main_page(&self, date: &str) -> Result<MainPage> {
        let page = || -> Result<MainPage> {
            let reference = parse_timestamp(date)?;
            let table = self.source.load()?;
            let settings = self.settings.load_settings()?;
            Ok(build_main_page(&table, &settings, &self.market, &self.locale, reference))
        };
        page().inspect_err(|e| log::error!("error generating main page data: {e}"))
    }

    /// Events page for a timestamp and a period code (W, M, Y, ALL).
    pub fn events_page(&self, date: &str, period: &str) -> Result<EventsPage> {
        let page = || -> Result<EventsPage> {
            let reference = parse_timestamp(date)?;
            let period: Period = period.parse()?;
            let table = self.source.load()?;
            let settings = self.settings.load_settings()?;
            Ok(build_events_page(
                &table,
                &settings,
                &self.market,
                &self.locale,
                reference,
                period,
            ))
        };
        page().inspect_err(|e| log::error!("error generating events page data: {e}"))
    }
}
