//! Market data gateway trait.
//!
//! The engine needs exactly two things from market data: a daily close
//! history over a look-back period, and the latest close. Gateways are
//! synchronous; an invocation fetches each ticker once and works on that
//! snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use folio_core::{Period, PriceSeries};

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// In-memory fixtures
    Manual,
}

/// Supplier of historical and latest close prices.
pub trait MarketDataGateway: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Daily closes for `ticker` over `period`, oldest first.
    ///
    /// May return an empty series; callers treat that as missing data.
    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError>;

    /// Most recent close for `ticker`.
    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError>;
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for &G {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError> {
        (**self).get_history(ticker, period)
    }

    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
        (**self).get_latest_price(ticker)
    }
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for Box<G> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError> {
        (**self).get_history(ticker, period)
    }

    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
        (**self).get_latest_price(ticker)
    }
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for Arc<G> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError> {
        (**self).get_history(ticker, period)
    }

    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
        (**self).get_latest_price(ticker)
    }
}
