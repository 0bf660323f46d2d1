//! Combines per-asset paths into portfolio-value paths.
//!
//! Member `m` at day `t` is `Σ_asset relative[m, asset, t] × weight × V0`,
//! where `V0` is the total current value. Every member redraws every asset
//! from its own `(run, ticker)` random stream.

use folio_core::{FolioError, FolioResult};
use folio_math::{ticker_key, RandomSource};
use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::estimator::ReturnParameters;
use crate::parallel::maybe_parallel_map;
use crate::simulator::{validate_inputs, RelativePath};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// One asset's share of the portfolio and its return model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetAllocation {
    /// Ticker symbol.
    pub ticker: String,
    /// Current price `S0`.
    pub current_price: f64,
    /// Fraction of total current value.
    pub weight: f64,
    /// Estimated drift and volatility.
    pub parameters: ReturnParameters,
}

/// `n_simulations × trading_days` matrix of portfolio values.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationEnsemble {
    values: Array2<f64>,
    initial_value: f64,
}

impl SimulationEnsemble {
    /// Wraps a precomputed value matrix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the matrix has no rows or no columns.
    pub fn from_values(values: Array2<f64>, initial_value: f64) -> FolioResult<Self> {
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(FolioError::invalid_parameter(
                "ensemble",
                format!("empty ensemble ({} x {})", values.nrows(), values.ncols()),
            ));
        }
        Ok(Self {
            values,
            initial_value,
        })
    }

    /// Number of members.
    #[must_use]
    pub fn n_simulations(&self) -> usize {
        self.values.nrows()
    }

    /// Number of trading days per member.
    #[must_use]
    pub fn trading_days(&self) -> usize {
        self.values.ncols()
    }

    /// Total current value the ensemble starts from.
    #[must_use]
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// The full matrix, one row per member.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Path of member `index`.
    #[must_use]
    pub fn member(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    /// Values of all members on day `day`.
    #[must_use]
    pub fn day(&self, day: usize) -> ArrayView1<'_, f64> {
        self.values.column(day)
    }
}

/// Simulates `config.n_simulations` portfolio-value paths.
///
/// Each asset draws from the stream keyed by its ticker, so an asset's path
/// under a given seed does not depend on which other assets are present.
///
/// # Errors
///
/// - `EmptyPortfolio` if `allocations` is empty or `total_value` is not positive
/// - `InvalidParameter` if `n_simulations` or `trading_days` is zero, weights
///   do not sum to 1, or any asset's parameters or price are invalid
pub fn build_ensemble<S: RandomSource>(
    allocations: &[AssetAllocation],
    total_value: f64,
    trading_days: usize,
    config: &SimulationConfig,
    source: &S,
) -> FolioResult<SimulationEnsemble> {
    if allocations.is_empty() {
        return Err(FolioError::empty_portfolio("no assets to simulate"));
    }
    if !total_value.is_finite() || total_value <= 0.0 {
        return Err(FolioError::empty_portfolio(format!(
            "total current value must be positive, got {total_value}"
        )));
    }
    if config.n_simulations == 0 {
        return Err(FolioError::invalid_parameter(
            "n_simulations",
            "at least one simulation is required",
        ));
    }
    for allocation in allocations {
        validate_inputs(&allocation.parameters, allocation.current_price, trading_days)?;
    }
    let weight_sum: f64 = allocations.iter().map(|a| a.weight).sum();
    if (weight_sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(FolioError::invalid_parameter(
            "weights",
            format!("must sum to 1, got {weight_sum}"),
        ));
    }

    let runs: Vec<u64> = (0..config.n_simulations as u64).collect();
    let rows = maybe_parallel_map(&runs, config, |&run| {
        simulate_member(allocations, total_value, trading_days, source, run)
    });

    let mut values = Array2::zeros((config.n_simulations, trading_days));
    for (mut target, row) in values.axis_iter_mut(Axis(0)).zip(rows) {
        for (cell, value) in target.iter_mut().zip(row) {
            *cell = value;
        }
    }

    SimulationEnsemble::from_values(values, total_value)
}

fn simulate_member<S: RandomSource>(
    allocations: &[AssetAllocation],
    total_value: f64,
    trading_days: usize,
    source: &S,
    run: u64,
) -> Vec<f64> {
    let mut row = vec![0.0; trading_days];
    for allocation in allocations {
        let mut rng = source.stream(run, ticker_key(&allocation.ticker));
        let scale = allocation.weight * total_value;
        let path = RelativePath::new(allocation.parameters, trading_days, &mut rng);
        for (cell, relative) in row.iter_mut().zip(path) {
            *cell += relative * scale;
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use folio_math::SeededSource;

    fn allocation(ticker: &str, weight: f64, drift: f64, vol: f64) -> AssetAllocation {
        AssetAllocation {
            ticker: ticker.to_string(),
            current_price: 100.0,
            weight,
            parameters: ReturnParameters::new(drift, vol).unwrap(),
        }
    }

    #[test]
    fn test_day_zero_equals_total_value() {
        let allocations = vec![
            allocation("AAPL", 0.6, 0.0005, 0.02),
            allocation("TLT", 0.4, 0.0001, 0.005),
        ];
        let config = SimulationConfig::sequential().with_simulations(50);
        let ensemble =
            build_ensemble(&allocations, 10_000.0, 30, &config, &SeededSource::new(1)).unwrap();

        assert_eq!(ensemble.n_simulations(), 50);
        assert_eq!(ensemble.trading_days(), 30);
        for v in ensemble.day(0) {
            assert_relative_eq!(*v, 10_000.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let allocations = vec![
            allocation("AAPL", 0.5, 0.0005, 0.02),
            allocation("MSFT", 0.5, 0.0003, 0.015),
        ];
        let source = SeededSource::new(2024);
        let sequential = SimulationConfig::sequential().with_simulations(200);
        let parallel = SimulationConfig::default()
            .with_simulations(200)
            .with_threshold(1);

        let a = build_ensemble(&allocations, 5_000.0, 60, &sequential, &source).unwrap();
        let b = build_ensemble(&allocations, 5_000.0, 60, &parallel, &source).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_members_differ() {
        let allocations = vec![allocation("AAPL", 1.0, 0.0, 0.02)];
        let config = SimulationConfig::sequential().with_simulations(2);
        let ensemble =
            build_ensemble(&allocations, 1_000.0, 10, &config, &SeededSource::new(3)).unwrap();
        assert_ne!(ensemble.member(0), ensemble.member(1));
    }

    #[test]
    fn test_asset_path_independent_of_other_holdings() {
        let config = SimulationConfig::sequential().with_simulations(3);
        let source = SeededSource::new(42);

        let alone = vec![allocation("MSFT", 1.0, 0.0, 0.02)];
        let alone = build_ensemble(&alone, 1_000.0, 20, &config, &source).unwrap();

        // AAPL sorts first and contributes a flat 500 on every day
        let with_aapl = vec![
            allocation("AAPL", 0.5, 0.0, 0.0),
            allocation("MSFT", 0.5, 0.0, 0.02),
        ];
        let with_aapl = build_ensemble(&with_aapl, 1_000.0, 20, &config, &source).unwrap();

        for m in 0..3 {
            for (a, b) in alone.member(m).iter().zip(with_aapl.member(m)) {
                assert_relative_eq!(a / 2.0, b - 500.0, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let source = SeededSource::new(0);
        let config = SimulationConfig::sequential().with_simulations(10);

        assert!(matches!(
            build_ensemble(&[], 1_000.0, 10, &config, &source),
            Err(FolioError::EmptyPortfolio { .. })
        ));

        let one = vec![allocation("AAPL", 1.0, 0.0, 0.01)];
        assert!(matches!(
            build_ensemble(&one, 0.0, 10, &config, &source),
            Err(FolioError::EmptyPortfolio { .. })
        ));
        assert!(matches!(
            build_ensemble(&one, 1_000.0, 10, &config.clone().with_simulations(0), &source),
            Err(FolioError::InvalidParameter { .. })
        ));

        let unbalanced = vec![allocation("AAPL", 0.7, 0.0, 0.01)];
        assert!(matches!(
            build_ensemble(&unbalanced, 1_000.0, 10, &config, &source),
            Err(FolioError::InvalidParameter { .. })
        ));
    }
}
