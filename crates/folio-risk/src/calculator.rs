//! Integrated risk calculator for a portfolio.
//!
//! [`RiskCalculator`] derives every metric from one realized index, and
//! [`calculate_risk_metrics`] builds that index from holdings and a
//! market data gateway.
//!
//! # Example
//!
//! ```ignore
//! use folio_risk::prelude::*;
//!
//! let report = calculate_risk_metrics(&holdings, &gateway, &RiskConfig::default())?;
//!
//! println!("Volatility: {:.2}%", report.annualized_volatility * 100.0);
//! println!("Sharpe: {:.2}", report.sharpe_ratio);
//! println!("VaR(95%): {:.4}", report.value_at_risk_95);
//! ```

use folio_core::{FolioError, FolioResult, Holding};
use folio_portfolio::{fetch_histories, transaction_value_weights};
use folio_traits::MarketDataGateway;
use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::index::{realized_portfolio_index, PortfolioIndex};
use crate::metrics::{annualized_return, annualized_volatility, sharpe_ratio};
use crate::var::{historical_var, VaRResult};

/// Confidence level of the reported Value-at-Risk.
pub const VAR_CONFIDENCE: f64 = 0.95;

/// Complete risk metrics for a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// `stdev(daily returns) × √252`.
    pub annualized_volatility: f64,
    /// `mean(daily returns) × 252`.
    pub annualized_return: f64,
    /// Excess return per unit of volatility.
    pub sharpe_ratio: f64,
    /// One-day 95% historical VaR in index units.
    pub value_at_risk_95: f64,
    /// Rate the Sharpe ratio was computed against.
    pub risk_free_rate: f64,
    /// Number of daily returns used.
    pub observations: usize,
}

/// Calculator for historical portfolio risk metrics.
#[derive(Debug, Clone)]
pub struct RiskCalculator {
    /// Daily simple returns of the index.
    returns: Vec<f64>,
    /// Last index value, the base of the VaR amount.
    last_value: f64,
    risk_free_rate: f64,
}

impl RiskCalculator {
    /// Creates a calculator over a realized index.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the index has fewer than 2 points.
    pub fn new(index: &PortfolioIndex, risk_free_rate: f64) -> FolioResult<Self> {
        let returns = index.returns()?;
        let last_value = index
            .last_value()
            .ok_or_else(|| FolioError::insufficient_data("aligned history", 2, 0))?;
        Ok(Self {
            returns,
            last_value,
            risk_free_rate,
        })
    }

    /// Daily returns the metrics are computed from.
    #[must_use]
    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    /// Annualized volatility of the index.
    ///
    /// # Errors
    ///
    /// Propagates statistics errors; a constructed calculator always holds at
    /// least one return.
    pub fn annualized_volatility(&self) -> FolioResult<f64> {
        annualized_volatility(&self.returns)
    }

    /// Annualized mean return of the index.
    ///
    /// # Errors
    ///
    /// Propagates statistics errors; a constructed calculator always holds at
    /// least one return.
    pub fn annualized_return(&self) -> FolioResult<f64> {
        annualized_return(&self.returns)
    }

    /// Sharpe ratio of the index against the configured risk-free rate.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedMetric` on a flat index.
    pub fn sharpe_ratio(&self) -> FolioResult<f64> {
        sharpe_ratio(
            self.annualized_return()?,
            self.annualized_volatility()?,
            self.risk_free_rate,
        )
    }

    /// One-day historical VaR at `confidence`, scaled by the last index value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `confidence` is not in `(0, 1)`.
    pub fn value_at_risk(&self, confidence: f64) -> FolioResult<VaRResult> {
        historical_var(&self.returns, self.last_value, confidence, 1)
    }

    /// All metrics at once.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedMetric` when the volatility is zero.
    pub fn report(&self) -> FolioResult<RiskReport> {
        let volatility = self.annualized_volatility()?;
        let mean_return = self.annualized_return()?;
        let sharpe = sharpe_ratio(mean_return, volatility, self.risk_free_rate)?;
        let var = self.value_at_risk(VAR_CONFIDENCE)?;

        Ok(RiskReport {
            annualized_volatility: volatility,
            annualized_return: mean_return,
            sharpe_ratio: sharpe,
            value_at_risk_95: var.var,
            risk_free_rate: self.risk_free_rate,
            observations: self.returns.len(),
        })
    }
}

/// Builds the realized index of `holdings` over `config.period`.
///
/// Tickers are weighted by their share of total transaction value.
///
/// # Errors
///
/// - `EmptyPortfolio` for empty holdings
/// - `DataUnavailable` when a history is missing or empty
/// - `InsufficientData` if the histories share no date
pub fn realized_index<G>(
    holdings: &[Holding],
    gateway: &G,
    config: &RiskConfig,
) -> FolioResult<PortfolioIndex>
where
    G: MarketDataGateway + ?Sized,
{
    if holdings.is_empty() {
        return Err(FolioError::empty_portfolio("no holdings to analyze"));
    }
    let weights = transaction_value_weights(holdings)?;
    let histories = fetch_histories(weights.tickers(), gateway, config.period)?;
    realized_portfolio_index(&histories, &weights)
}

/// Computes volatility, return, Sharpe ratio and VaR of the holdings.
///
/// # Errors
///
/// See [`realized_index`]; additionally `InsufficientData` with fewer than
/// 2 aligned observations and `UndefinedMetric` for a flat index.
pub fn calculate_risk_metrics<G>(
    holdings: &[Holding],
    gateway: &G,
    config: &RiskConfig,
) -> FolioResult<RiskReport>
where
    G: MarketDataGateway + ?Sized,
{
    config.validate()?;
    let index = realized_index(holdings, gateway, config)?;
    if index.len() < 2 {
        return Err(FolioError::insufficient_data("aligned history", 2, index.len()));
    }

    tracing::info!(
        observations = index.len(),
        period = %config.period,
        risk_free_rate = config.risk_free_rate,
        "Calculating risk metrics"
    );

    let report = RiskCalculator::new(&index, config.risk_free_rate)?.report()?;
    tracing::debug!(
        volatility = report.annualized_volatility,
        sharpe = report.sharpe_ratio,
        var_95 = report.value_at_risk_95,
        "Risk metrics complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use folio_core::PricePoint;

    fn index(values: &[f64]) -> PortfolioIndex {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        PortfolioIndex::from_points(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| PricePoint::new(start + chrono::Days::new(i as u64), *v))
                .collect(),
        )
    }

    #[test]
    fn test_report() {
        let calc = RiskCalculator::new(&index(&[1.0, 1.01, 0.999, 1.02, 1.015]), 0.02).unwrap();
        let report = calc.report().unwrap();

        assert_eq!(report.observations, 4);
        assert_eq!(report.risk_free_rate, 0.02);
        assert!(report.annualized_volatility > 0.0);
        assert_relative_eq!(
            report.sharpe_ratio,
            (report.annualized_return - 0.02) / report.annualized_volatility
        );
        assert!(report.value_at_risk_95 > 0.0);
    }

    #[test]
    fn test_flat_index() {
        let calc = RiskCalculator::new(&index(&[1.0; 6]), 0.02).unwrap();
        assert_eq!(calc.annualized_volatility().unwrap(), 0.0);
        assert_eq!(calc.value_at_risk(VAR_CONFIDENCE).unwrap().var, 0.0);
        assert!(matches!(
            calc.sharpe_ratio().unwrap_err(),
            FolioError::UndefinedMetric { .. }
        ));
        assert!(calc.report().is_err());
    }

    #[test]
    fn test_accessors() {
        let calc = RiskCalculator::new(&index(&[1.0, 1.1, 0.99]), 0.01).unwrap();
        assert_eq!(calc.returns().len(), 2);
        assert_relative_eq!(calc.returns()[0], 0.1, epsilon = 1e-12);
        // +10% then -10%
        assert_relative_eq!(calc.annualized_return().unwrap(), 0.0, epsilon = 1e-9);
        assert!(matches!(
            calc.value_at_risk(1.0).unwrap_err(),
            FolioError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_var_uses_last_index_value() {
        let calc = RiskCalculator::new(&index(&[1.0, 0.9, 1.8]), 0.0).unwrap();
        // returns [-0.1, 1.0], p5 = -0.1 + 1.1 × 0.05
        let var = calc.value_at_risk(0.95).unwrap();
        assert_relative_eq!(var.var, 0.045 * 1.8, epsilon = 1e-12);
    }
}
