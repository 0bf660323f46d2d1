//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod compare;
pub mod delete;
pub mod history;
pub mod risk;
pub mod simulate;
pub mod summary;
pub mod view;

// Re-export submodules for convenience
pub use add::AddArgs;
pub use clear::ClearArgs;
pub use compare::CompareArgs;
pub use delete::DeleteArgs;
pub use history::HistoryArgs;
pub use risk::RiskArgs;
pub use simulate::SimulateArgs;
pub use summary::SummaryArgs;

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use folio_core::Holding;
use folio_ext_file::{
    create_file_holdings_store, create_file_market_data, CsvMarketData, JsonHoldingsStore,
};
use folio_portfolio::{fetch_latest_prices, value_portfolio, PortfolioValuation};
use folio_traits::{HoldingsStore, RetryingGateway};
use rust_decimal::Decimal;

use crate::cli::OutputFormat;
use crate::config::CliConfig;

/// Everything a command needs besides its own arguments.
pub struct Context {
    /// Resolved configuration.
    pub config: CliConfig,
    /// Requested output format.
    pub format: OutputFormat,
}

impl Context {
    /// Holdings store at the configured path.
    pub fn store(&self) -> JsonHoldingsStore {
        create_file_holdings_store(&self.config.holdings_path)
    }

    /// Loads all holdings.
    pub fn holdings(&self) -> Result<Vec<Holding>> {
        let path = &self.config.holdings_path;
        self.store()
            .load()
            .with_context(|| format!("failed to load holdings from {}", path.display()))
    }

    /// CSV market data gateway over the configured prices directory.
    pub fn gateway(&self) -> Result<RetryingGateway<CsvMarketData>> {
        let dir = &self.config.prices_dir;
        create_file_market_data(dir, self.config.retry())
            .with_context(|| format!("cannot read prices from {}", dir.display()))
    }

    /// Values the holdings at their latest close.
    pub fn valuation(&self, holdings: &[Holding]) -> Result<PortfolioValuation> {
        let gateway = self.gateway()?;
        let prices: BTreeMap<String, f64> = fetch_latest_prices(holdings, &gateway)?;
        Ok(value_portfolio(holdings, &prices)?)
    }
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Rounds a decimal amount to cents for display.
pub fn cents(value: Decimal) -> String {
    value.round_dp(2).to_string()
}
