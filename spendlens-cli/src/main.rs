use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use spendlens_core::time::TIMESTAMP_FORMAT;
use spendlens_core::{TransactionTable, now_in, parse_year_month};
use spendlens_finance::{
    Dashboard, JsonSettingsFile, Render, investment_bank, pattern_search,
    person_transfers_search, phone_number_search, profitable_cashback_categories, simple_search,
    spending_by_category, spending_by_weekday, spending_by_workday,
};
use spendlens_ingest::{StatementFile, TransactionSource};

mod config;
mod state;

use config::{Config, init_config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version,
    about = "Bank statement analytics: dashboard pages, spending reports and searches"
)]
struct Cli {
    /// Config file (default: ~/.spendlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Statement export to analyze (overrides [data].statement)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// User settings JSON (overrides [data].settings)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Directory for saved reports (overrides [report].dir)
    #[arg(long, global = true)]
    report_dir: Option<PathBuf>,

    /// Do not save report files
    #[arg(long, global = true)]
    no_report: bool,

    /// Output language: ru or en (overrides [locale].language)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config file if none exists
    InitConfig,

    /// Main page JSON: greeting, cards, top transactions, quotes
    MainPage {
        /// "YYYY-MM-DD HH:MM:SS" (default: now in the configured timezone)
        #[arg(long)]
        date: Option<String>,
    },

    /// Events page JSON: expense and income breakdown for a period
    EventsPage {
        /// "YYYY-MM-DD HH:MM:SS" (default: now in the configured timezone)
        #[arg(long)]
        date: Option<String>,

        /// W, M, Y or ALL
        #[arg(long, default_value = "M")]
        period: String,
    },

    /// Monthly spending of one category over the last 90 days
    Category {
        category: String,

        /// Reference date "YYYY-MM-DD" (default: now)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Average spending per weekday over the last 90 days
    Weekday {
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Average spending on workdays vs weekends over the last 90 days
    Workday {
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Cashback earned per category in a month
    Cashback {
        /// "YYYY-MM"
        month: String,

        #[arg(long)]
        json: bool,
    },

    /// Savings from rounding every purchase of a month up to a multiple of LIMIT
    Invest {
        /// "YYYY-MM"
        month: String,

        #[arg(long, default_value_t = 50.0)]
        limit: f64,
    },

    /// Rows whose description or category contains a text
    Search {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Rows mentioning a +7 phone number
    Phones {
        #[arg(long)]
        json: bool,
    },

    /// Transfers to private persons
    Transfers {
        #[arg(long)]
        json: bool,
    },

    /// Rows matching a regular expression (case-insensitive)
    Pattern {
        pattern: String,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(p) => p.clone(),
        None => state::default_config_path()?,
    };

    let cfg = apply_overrides(load_config(&config_path)?, &cli);
    run(cli.command, &cfg, &config_path)
}

/// Command-line flags win over the config file.
fn apply_overrides(mut cfg: Config, cli: &Cli) -> Config {
    if let Some(p) = &cli.data {
        cfg.data.statement = p.clone();
    }
    if let Some(p) = &cli.settings {
        cfg.data.settings = p.clone();
    }
    if let Some(p) = &cli.report_dir {
        cfg.report.dir = p.clone();
    }
    if cli.no_report {
        cfg.report.enabled = false;
    }
    if let Some(l) = &cli.locale {
        cfg.locale.language = l.clone();
    }
    cfg
}

fn run(command: Command, cfg: &Config, config_path: &Path) -> Result<()> {
    let locale = cfg.locale()?;
    let source = StatementFile::new(&cfg.data.statement);
    let reports = cfg.report_writer();

    match command {
        Command::InitConfig => init_config(config_path)?,

        Command::MainPage { date } => {
            let date = page_date(date, cfg)?;
            let dash = Dashboard::new(source, JsonSettingsFile::new(&cfg.data.settings))
                .with_locale(locale);
            print_json(&dash.main_page(&date)?)?;
        }

        Command::EventsPage { date, period } => {
            let date = page_date(date, cfg)?;
            let dash = Dashboard::new(source, JsonSettingsFile::new(&cfg.data.settings))
                .with_locale(locale);
            print_json(&dash.events_page(&date, &period)?)?;
        }

        Command::Category {
            category,
            date,
            json,
        } => {
            let table = load_table(&source)?;
            let report = reports.record("spending_by_category", || {
                spending_by_category(&table, &category, date.as_deref())
            })?;
            print(&report, json)?;
        }

        Command::Weekday { date, json } => {
            let table = load_table(&source)?;
            let report = reports.record("spending_by_weekday", || {
                spending_by_weekday(&table, &locale, date.as_deref())
            })?;
            print(&report, json)?;
        }

        Command::Workday { date, json } => {
            let table = load_table(&source)?;
            let report = reports.record("spending_by_workday", || {
                spending_by_workday(&table, &locale, date.as_deref())
            })?;
            print(&report, json)?;
        }

        Command::Cashback { month, json } => {
            let (year, month) = parse_year_month(&month)?;
            let table = load_table(&source)?;
            print(&profitable_cashback_categories(&table, year, month)?, json)?;
        }

        Command::Invest { month, limit } => {
            let rows = load_table(&source)?.into_rows();
            let saved = investment_bank(&month, &rows, limit)?;
            println!("{}", saved.render());
        }

        Command::Search { query, json } => {
            let table = load_table(&source)?;
            print(&simple_search(&table, &query)?, json)?;
        }

        Command::Phones { json } => {
            let table = load_table(&source)?;
            print(&phone_number_search(&table)?, json)?;
        }

        Command::Transfers { json } => {
            let table = load_table(&source)?;
            print(&person_transfers_search(&table, &locale)?, json)?;
        }

        Command::Pattern { pattern, json } => {
            let table = load_table(&source)?;
            print(&pattern_search(&table, &pattern)?, json)?;
        }
    }

    Ok(())
}

fn load_table(source: &StatementFile) -> Result<TransactionTable> {
    source
        .load()
        .with_context(|| format!("loading {}", source.describe()))
}

fn page_date(date: Option<String>, cfg: &Config) -> Result<String> {
    match date {
        Some(d) => Ok(d),
        None => Ok(now_in(&cfg.locale.timezone)?
            .format(TIMESTAMP_FORMAT)
            .to_string()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize output")?
    );
    Ok(())
}

fn print<T: Serialize + Render>(value: &T, json: bool) -> Result<()> {
    if json {
        print_json(value)
    } else {
        println!("{}", value.render());
        Ok(())
    }
}
