//! # Folio Risk
//!
//! Backward-looking risk analytics for a portfolio.
//!
//! This crate provides:
//!
//! - **Realized index**: holdings weighted by transaction value, each ticker
//!   normalized to 1.0 on the dates all tickers share
//! - **Metrics**: annualized volatility and return, Sharpe ratio
//! - **VaR**: historical Value-at-Risk
//! - **Benchmark**: portfolio versus a benchmark ticker
//!
//! ## Example
//!
//! ```rust
//! use folio_risk::prelude::*;
//!
//! let returns = [0.01, -0.02, 0.005, 0.012, -0.004];
//! let vol = annualized_volatility(&returns).unwrap();
//! let ret = annualized_return(&returns).unwrap();
//! let sharpe = sharpe_ratio(ret, vol, 0.02).unwrap();
//! assert!(sharpe.is_finite());
//!
//! let var = historical_var(&returns, 1.0, 0.95, 1).unwrap();
//! assert!(var.var > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod benchmark;
pub mod calculator;
pub mod config;
pub mod index;
pub mod metrics;
pub mod var;

pub use benchmark::{compare_with_benchmark, BenchmarkComparison, ComparisonRow, DEFAULT_BENCHMARK};
pub use calculator::{calculate_risk_metrics, realized_index, RiskCalculator, RiskReport};
pub use config::RiskConfig;
pub use index::{common_dates, realized_portfolio_index, PortfolioIndex};
pub use metrics::{annualized_return, annualized_volatility, sharpe_ratio};
pub use var::{historical_var, VaRResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::benchmark::{compare_with_benchmark, BenchmarkComparison, ComparisonRow};
    pub use crate::calculator::{calculate_risk_metrics, RiskCalculator, RiskReport};
    pub use crate::config::RiskConfig;
    pub use crate::index::{realized_portfolio_index, PortfolioIndex};
    pub use crate::metrics::{annualized_return, annualized_volatility, sharpe_ratio};
    pub use crate::var::{historical_var, VaRResult};
}
