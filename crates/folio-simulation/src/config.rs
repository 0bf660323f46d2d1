//! Configuration for portfolio projection.

use folio_core::{FolioError, FolioResult, Period, TRADING_DAYS_PER_YEAR};
use folio_math::SeededSource;
use serde::{Deserialize, Serialize};

/// Configuration for a Monte Carlo projection.
///
/// Controls horizon, ensemble size, seeding, history look-back and
/// parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Projection horizon in years (252 trading days each).
    pub years: u32,

    /// Number of ensemble members.
    pub n_simulations: usize,

    /// Base seed. `None` draws a fresh seed per invocation.
    pub seed: Option<u64>,

    /// Look-back period used to estimate drift and volatility.
    pub history_period: Period,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum ensemble size to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            years: 5,
            n_simulations: 500,
            seed: None,
            history_period: Period::five_years(),
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl SimulationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the horizon in years.
    #[must_use]
    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    /// Sets the number of ensemble members.
    #[must_use]
    pub fn with_simulations(mut self, n: usize) -> Self {
        self.n_simulations = n;
        self
    }

    /// Fixes the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the estimation look-back.
    #[must_use]
    pub fn with_history_period(mut self, period: Period) -> Self {
        self.history_period = period;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Number of projected trading days: `years × 252`.
    #[must_use]
    pub fn trading_days(&self) -> usize {
        self.years as usize * TRADING_DAYS_PER_YEAR
    }

    /// Checks horizon and ensemble size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `years` or `n_simulations` is zero.
    pub fn validate(&self) -> FolioResult<()> {
        if self.years == 0 {
            return Err(FolioError::invalid_parameter(
                "years",
                "projection horizon must be at least one year",
            ));
        }
        if self.n_simulations == 0 {
            return Err(FolioError::invalid_parameter(
                "n_simulations",
                "at least one simulation is required",
            ));
        }
        Ok(())
    }

    /// Random source for this run: seeded if a seed is set, fresh otherwise.
    #[must_use]
    pub fn random_source(&self) -> SeededSource {
        self.seed
            .map_or_else(SeededSource::from_entropy, SeededSource::new)
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = SimulationConfig::default();
        assert_eq!(config.years, 5);
        assert_eq!(config.n_simulations, 500);
        assert_eq!(config.trading_days(), 1260);
        assert!(config.seed.is_none());
        assert_eq!(config.history_period.to_string(), "5y");
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulationConfig::new()
            .with_years(1)
            .with_simulations(1000)
            .with_seed(42)
            .with_threshold(10);

        assert_eq!(config.trading_days(), 252);
        assert_eq!(config.n_simulations, 1000);
        assert_eq!(config.random_source().seed(), 42);
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_validate() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(matches!(
            SimulationConfig::default().with_simulations(0).validate(),
            Err(FolioError::InvalidParameter { .. })
        ));
        assert!(matches!(
            SimulationConfig::default().with_years(0).validate(),
            Err(FolioError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_should_parallelize() {
        let config = SimulationConfig::new().with_threshold(100);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(50));
            assert!(config.should_parallelize(100));
        }

        #[cfg(not(feature = "parallel"))]
        assert!(!config.should_parallelize(100));

        assert!(!SimulationConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_serde_partial() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"years": 2, "seed": 7, "history_period": "1y"}"#).unwrap();
        assert_eq!(config.years, 2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.n_simulations, 500);
        assert_eq!(config.history_period, Period::one_year());
    }
}
