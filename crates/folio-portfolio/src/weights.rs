//! Portfolio weights by ticker.
//!
//! Holdings of the same ticker are combined before weighting, so a
//! portfolio with two lots of AAPL carries a single AAPL weight.

use std::collections::BTreeMap;

use folio_core::{FolioError, FolioResult, Holding};
use serde::Serialize;

/// Weight per distinct ticker plus the total the weights are relative to.
///
/// Tickers are kept in a `BTreeMap`, so iteration order is alphabetical
/// and stable across invocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioWeights {
    weights: BTreeMap<String, f64>,
    total_value: f64,
}

impl PortfolioWeights {
    /// Weight of `ticker`, if held.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.weights.get(ticker).copied()
    }

    /// Total value the weights are fractions of.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Iterates `(ticker, weight)` in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Distinct tickers in ticker order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Number of distinct tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if there are no tickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights (1.0 up to rounding).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// The underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }
}

/// Weights by current market value: `Σ(price × quantity) / total`.
///
/// # Errors
///
/// - `EmptyPortfolio` if `holdings` is empty or the total value is zero
/// - `DataUnavailable` if a held ticker has no entry in `prices`
/// - `InvalidParameter` if a price is not a finite positive number
pub fn current_value_weights(
    holdings: &[Holding],
    prices: &BTreeMap<String, f64>,
) -> FolioResult<PortfolioWeights> {
    let mut values = BTreeMap::new();
    for holding in holdings {
        let price = price_for(holding.ticker(), prices)?;
        *values.entry(holding.ticker().to_string()).or_insert(0.0) +=
            price * holding.quantity_f64();
    }
    normalize(values, "current value")
}

/// Weights by cost basis: `Σ(quantity × purchase_price) / total`.
///
/// # Errors
///
/// Returns `EmptyPortfolio` if `holdings` is empty or the total cost is zero.
pub fn transaction_value_weights(holdings: &[Holding]) -> FolioResult<PortfolioWeights> {
    let mut values = BTreeMap::new();
    for holding in holdings {
        *values.entry(holding.ticker().to_string()).or_insert(0.0) +=
            holding.transaction_value_f64();
    }
    normalize(values, "transaction value")
}

/// Looks up and validates the current price of `ticker`.
pub(crate) fn price_for(ticker: &str, prices: &BTreeMap<String, f64>) -> FolioResult<f64> {
    let price = *prices
        .get(ticker)
        .ok_or_else(|| FolioError::data_unavailable(ticker, "no current price"))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(FolioError::invalid_parameter(
            "current_price",
            format!("{ticker}: must be positive, got {price}"),
        ));
    }
    Ok(price)
}

fn normalize(values: BTreeMap<String, f64>, basis: &str) -> FolioResult<PortfolioWeights> {
    if values.is_empty() {
        return Err(FolioError::empty_portfolio("no holdings"));
    }
    let total_value: f64 = values.values().sum();
    if total_value <= 0.0 {
        return Err(FolioError::empty_portfolio(format!("total {basis} is zero")));
    }

    let weights = values
        .into_iter()
        .map(|(ticker, value)| (ticker, value / total_value))
        .collect();

    Ok(PortfolioWeights {
        weights,
        total_value,
    })
}
