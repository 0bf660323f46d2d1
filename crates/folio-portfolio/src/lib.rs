//! # Folio Portfolio
//!
//! Holdings-level aggregation for the Folio library.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every calculation takes its holdings and prices explicitly
//! - **Combined by ticker**: several lots of one ticker carry a single weight
//! - **Deterministic order**: tickers are iterated alphabetically
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use folio_core::Holding;
//! use folio_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let holdings = vec![Holding::new("AAPL", dec!(10), dec!(150)).unwrap()];
//! let prices = BTreeMap::from([("AAPL".to_string(), 180.0)]);
//!
//! let weights = current_value_weights(&holdings, &prices).unwrap();
//! assert_eq!(weights.total_value(), 1800.0);
//!
//! let valuation = value_portfolio(&holdings, &prices).unwrap();
//! assert_eq!(valuation.total_pnl, dec!(300));
//! ```
//!
//! ## Module Overview
//!
//! - [`weights`] - Current-value and transaction-value weights
//! - [`valuation`] - Mark-to-market valuation and PnL
//! - [`bucketing`] - Sector / asset-class breakdown
//! - [`market`] - Market data snapshots for a set of holdings

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bucketing;
pub mod market;
pub mod valuation;
pub mod weights;

pub use bucketing::{breakdown, BreakdownKey, BucketSummary};
pub use market::{distinct_tickers, fetch_histories, fetch_history, fetch_latest_prices};
pub use valuation::{value_portfolio, PortfolioValuation, PositionValuation};
pub use weights::{current_value_weights, transaction_value_weights, PortfolioWeights};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bucketing::{breakdown, BreakdownKey, BucketSummary};
    pub use crate::market::{fetch_histories, fetch_history, fetch_latest_prices};
    pub use crate::valuation::{value_portfolio, PortfolioValuation, PositionValuation};
    pub use crate::weights::{current_value_weights, transaction_value_weights, PortfolioWeights};
}
