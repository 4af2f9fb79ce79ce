//! Currency rates and stock prices for the dashboard widgets.
//!
//! Only a fixed-value provider exists; live quotes are out of scope.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

pub trait MarketData {
    fn currency_rate(&self, currency: &str) -> f64;
    fn stock_price(&self, ticker: &str) -> f64;
}

/// Returns the same placeholder quote for every symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StubMarketData {
    pub rate: f64,
    pub price: f64,
}

impl Default for StubMarketData {
    fn default() -> Self {
        Self {
            rate: 75.0,
            price: 100.0,
        }
    }
}

impl MarketData for StubMarketData {
    fn currency_rate(&self, _currency: &str) -> f64 {
        self.rate
    }

    fn stock_price(&self, _ticker: &str) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
}

/// Quotes for the currencies the user follows, in settings order.
pub fn currency_rates<M: MarketData + ?Sized>(settings: &Settings, market: &M) -> Vec<CurrencyRate> {
    settings
        .user_currencies
        .iter()
        .map(|c| CurrencyRate {
            currency: c.clone(),
            rate: market.currency_rate(c),
        })
        .collect()
}

/// Prices for the stocks the user follows, in settings order.
pub fn stock_prices<M: MarketData + ?Sized>(settings: &Settings, market: &M) -> Vec<StockPrice> {
    settings
        .user_stocks
        .iter()
        .map(|s| StockPrice {
            stock: s.clone(),
            price: market.stock_price(s),
        })
        .collect()
}
