//! End-to-end projection of a portfolio.
//!
//! Fetches one market data snapshot per ticker, estimates parameters,
//! simulates the ensemble and summarizes it. Any failure aborts the whole
//! projection; partial results are never returned.

use chrono::NaiveDate;
use folio_core::calendars::WeekendCalendar;
use folio_core::{FolioError, FolioResult, Holding, Period};
use folio_math::RandomSource;
use folio_portfolio::{current_value_weights, fetch_histories, fetch_latest_prices};
use folio_traits::MarketDataGateway;

use crate::aggregator::{build_ensemble, AssetAllocation};
use crate::config::SimulationConfig;
use crate::estimator::estimate_parameters;
use crate::summarizer::{summarize, SimulationSummary};

/// Weighted, parameterized assets ready to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInputs {
    /// One allocation per distinct ticker, in ticker order.
    pub allocations: Vec<AssetAllocation>,
    /// Total current value of the portfolio.
    pub total_value: f64,
}

/// Fetches prices and histories and estimates every asset's parameters.
///
/// # Errors
///
/// - `EmptyPortfolio` for empty holdings or zero total value
/// - `DataUnavailable` if the gateway fails or returns an empty history
/// - `InsufficientData` if a history has fewer than 2 closes
pub fn gather_inputs<G>(
    holdings: &[Holding],
    gateway: &G,
    history_period: Period,
) -> FolioResult<ProjectionInputs>
where
    G: MarketDataGateway + ?Sized,
{
    if holdings.is_empty() {
        return Err(FolioError::empty_portfolio("no holdings to simulate"));
    }

    let prices = fetch_latest_prices(holdings, gateway)?;
    let weights = current_value_weights(holdings, &prices)?;
    let histories = fetch_histories(weights.tickers(), gateway, history_period)?;

    let mut allocations = Vec::with_capacity(weights.len());
    for (ticker, weight) in weights.iter() {
        let series = histories
            .get(ticker)
            .ok_or_else(|| FolioError::data_unavailable(ticker, "no price history"))?;
        let current_price = prices
            .get(ticker)
            .copied()
            .ok_or_else(|| FolioError::data_unavailable(ticker, "no current price"))?;
        allocations.push(AssetAllocation {
            ticker: ticker.to_string(),
            current_price,
            weight,
            parameters: estimate_parameters(series)?,
        });
    }

    Ok(ProjectionInputs {
        allocations,
        total_value: weights.total_value(),
    })
}

/// Projects the portfolio with the random source described by `config`.
///
/// The summary records the base seed used, so an unseeded run can be
/// reproduced by passing that seed back in.
///
/// # Errors
///
/// See [`gather_inputs`]; `InvalidParameter` for a zero horizon or zero
/// simulations.
pub fn simulate_portfolio<G>(
    holdings: &[Holding],
    gateway: &G,
    config: &SimulationConfig,
    start: NaiveDate,
) -> FolioResult<SimulationSummary>
where
    G: MarketDataGateway + ?Sized,
{
    let source = config.random_source();
    let mut summary = simulate_portfolio_with(holdings, gateway, config, start, &source)?;
    summary.seed = Some(source.seed());
    Ok(summary)
}

/// Projects the portfolio with an injected random source.
///
/// # Errors
///
/// Same as [`simulate_portfolio`].
pub fn simulate_portfolio_with<G, S>(
    holdings: &[Holding],
    gateway: &G,
    config: &SimulationConfig,
    start: NaiveDate,
    source: &S,
) -> FolioResult<SimulationSummary>
where
    G: MarketDataGateway + ?Sized,
    S: RandomSource,
{
    config.validate()?;
    let inputs = gather_inputs(holdings, gateway, config.history_period)?;

    tracing::info!(
        assets = inputs.allocations.len(),
        total_value = inputs.total_value,
        n_simulations = config.n_simulations,
        trading_days = config.trading_days(),
        "Running portfolio simulation"
    );

    let ensemble = build_ensemble(
        &inputs.allocations,
        inputs.total_value,
        config.trading_days(),
        config,
        source,
    )?;
    let summary = summarize(&ensemble, start, &WeekendCalendar)?;

    if let Some(last) = summary.final_row() {
        tracing::info!(
            date = %last.date,
            mean = last.mean,
            p10 = last.percentile_10,
            p90 = last.percentile_90,
            "Simulation complete"
        );
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::PriceSeries;
    use folio_traits::{SourceType, TraitError};
    use rust_decimal_macros::dec;

    struct FixedGateway;

    impl MarketDataGateway for FixedGateway {
        fn source_type(&self) -> SourceType {
            SourceType::Manual
        }

        fn get_history(&self, ticker: &str, _period: Period) -> Result<PriceSeries, TraitError> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            let closes: &[f64] = match ticker {
                "AAPL" => &[150.0, 153.0, 151.5],
                "SHORT" => &[10.0],
                _ => return Err(TraitError::NotFound(ticker.to_string())),
            };
            PriceSeries::from_closes(ticker, start, closes)
                .map_err(|e| TraitError::InvalidInput(e.to_string()))
        }

        fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
            match ticker {
                "AAPL" => Ok(150.0),
                "SHORT" => Ok(10.0),
                _ => Err(TraitError::NotFound(ticker.to_string())),
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_gather_inputs() {
        let holdings = vec![Holding::new("AAPL", dec!(10), dec!(150)).unwrap()];
        let inputs = gather_inputs(&holdings, &FixedGateway, Period::one_year()).unwrap();
        assert_eq!(inputs.total_value, 1500.0);
        assert_eq!(inputs.allocations.len(), 1);
        assert_eq!(inputs.allocations[0].weight, 1.0);
        assert_eq!(inputs.allocations[0].parameters.observations, 2);
    }

    #[test]
    fn test_records_seed() {
        let holdings = vec![Holding::new("AAPL", dec!(10), dec!(150)).unwrap()];
        let config = SimulationConfig::sequential()
            .with_years(1)
            .with_simulations(5)
            .with_seed(77);
        let summary = simulate_portfolio(&holdings, &FixedGateway, &config, today()).unwrap();
        assert_eq!(summary.seed, Some(77));
    }

    #[test]
    fn test_errors_propagate() {
        let config = SimulationConfig::sequential().with_simulations(5).with_seed(1);

        let err = simulate_portfolio(&[], &FixedGateway, &config, today()).unwrap_err();
        assert!(matches!(err, FolioError::EmptyPortfolio { .. }));

        let unknown = vec![Holding::new("ZZZZ", dec!(1), dec!(1)).unwrap()];
        let err = simulate_portfolio(&unknown, &FixedGateway, &config, today()).unwrap_err();
        assert!(matches!(err, FolioError::DataUnavailable { ticker, .. } if ticker == "ZZZZ"));

        let short = vec![Holding::new("SHORT", dec!(1), dec!(10)).unwrap()];
        let err = simulate_portfolio(&short, &FixedGateway, &config, today()).unwrap_err();
        assert!(matches!(err, FolioError::InsufficientData { subject, .. } if subject == "SHORT"));
    }
}
