//! spendlens-finance: spending reports, cashback and round-up analysis,
//! row searches and the dashboard pages built on top of them

pub mod cashback;
pub mod invest;
pub mod market;
pub mod pages;
pub mod render;
pub mod report_file;
pub mod reports;
pub mod search;
pub mod settings;

pub use cashback::{CashbackRanking, profitable_cashback_categories};
pub use invest::{investment_bank, round_up_savings};
pub use market::{CurrencyRate, MarketData, StockPrice, StubMarketData};
pub use pages::{Dashboard, EventsPage, MainPage, TopBy, build_events_page, build_main_page, top_transactions};
pub use render::Render;
pub use report_file::ReportWriter;
pub use reports::{
    CategorySpending, WeekdaySpending, WorkdaySpending, reference_date, spending_by_category,
    spending_by_weekday, spending_by_workday,
};
pub use search::{person_transfers_search, pattern_search, phone_number_search, simple_search};
pub use settings::{JsonSettingsFile, Settings, SettingsSource};
