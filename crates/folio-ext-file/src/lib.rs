//! # Folio Ext File
//!
//! File-based market data and holdings storage for Folio.
//!
//! This crate provides default implementations for local use and testing:
//! - CSV close-price histories, one `<TICKER>.csv` per ticker
//! - JSON holdings file (default `data/portfolio.json`)
//! - In-memory gateway and store for fixtures
//!
//! Network market data clients plug in through the same
//! [`folio_traits::MarketDataGateway`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod holdings;
mod market_data;

pub use holdings::*;
pub use market_data::*;

use std::path::Path;

use folio_traits::error::TraitError;
use folio_traits::retry::{RetryConfig, RetryingGateway};

/// Create a CSV market data gateway with retries on transient I/O failures.
pub fn create_file_market_data(
    prices_dir: impl AsRef<Path>,
    retry: RetryConfig,
) -> Result<RetryingGateway<CsvMarketData>, TraitError> {
    Ok(RetryingGateway::new(CsvMarketData::new(prices_dir)?, retry))
}

/// Create a JSON holdings store.
pub fn create_file_holdings_store(path: impl AsRef<Path>) -> JsonHoldingsStore {
    JsonHoldingsStore::new(path)
}
