//! Drift and volatility estimation from daily closes.

use folio_core::{FolioError, FolioResult, PriceSeries};
use folio_math::statistics::{describe, pct_change};
use serde::{Deserialize, Serialize};

/// Per-asset parameters of the discretized GBM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnParameters {
    /// Daily log drift: mean − ½ × variance of simple returns.
    pub drift: f64,
    /// Daily volatility: sample standard deviation of simple returns.
    pub volatility: f64,
    /// Number of daily returns the estimate is based on.
    pub observations: usize,
}

impl ReturnParameters {
    /// Creates parameters directly, bypassing estimation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-finite drift or a negative or
    /// non-finite volatility.
    pub fn new(drift: f64, volatility: f64) -> FolioResult<Self> {
        let params = Self {
            drift,
            volatility,
            observations: 0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that the parameters can drive a simulation.
    ///
    /// # Errors
    ///
    /// See [`ReturnParameters::new`].
    pub fn validate(&self) -> FolioResult<()> {
        if !self.drift.is_finite() {
            return Err(FolioError::invalid_parameter(
                "drift",
                format!("must be finite, got {}", self.drift),
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(FolioError::invalid_parameter(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        Ok(())
    }
}

/// Daily simple returns `close[i] / close[i-1] − 1`, oldest first.
///
/// # Errors
///
/// Returns `InsufficientData` naming the ticker for fewer than 2 closes.
pub fn daily_returns(series: &PriceSeries) -> FolioResult<Vec<f64>> {
    if series.len() < 2 {
        return Err(FolioError::insufficient_data(series.ticker(), 2, series.len()));
    }
    pct_change(&series.closes()).map_err(|e| FolioError::from_math(series.ticker(), e))
}

/// Estimates drift and volatility from a close history.
///
/// A single return has no dispersion, so its volatility is 0.
///
/// # Errors
///
/// Returns `InsufficientData` naming the ticker for fewer than 2 closes.
pub fn estimate_parameters(series: &PriceSeries) -> FolioResult<ReturnParameters> {
    let returns = daily_returns(series)?;
    let stats = describe(&returns).map_err(|e| FolioError::from_math(series.ticker(), e))?;

    let params = ReturnParameters {
        drift: stats.mean - 0.5 * stats.variance,
        volatility: stats.std_dev,
        observations: stats.count,
    };
    tracing::debug!(
        ticker = series.ticker(),
        drift = params.drift,
        volatility = params.volatility,
        observations = params.observations,
        "Estimated return parameters"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes("AAPL", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), closes)
            .unwrap()
    }

    #[test]
    fn test_estimate_known_values() {
        let params = estimate_parameters(&series(&[150.0, 153.0, 151.5])).unwrap();

        // returns: 0.02, -0.0098039...
        let r1: f64 = 153.0 / 150.0 - 1.0;
        let r2: f64 = 151.5 / 153.0 - 1.0;
        let mean = (r1 + r2) / 2.0;
        let var = ((r1 - mean).powi(2) + (r2 - mean).powi(2)) / 1.0;

        assert_eq!(params.observations, 2);
        assert_relative_eq!(params.volatility, var.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(params.drift, mean - 0.5 * var, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_prices_zero_volatility() {
        let params = estimate_parameters(&series(&[100.0; 20])).unwrap();
        assert_eq!(params.volatility, 0.0);
        assert_eq!(params.drift, 0.0);
    }

    #[test]
    fn test_single_return() {
        let params = estimate_parameters(&series(&[100.0, 110.0])).unwrap();
        assert_eq!(params.observations, 1);
        assert_eq!(params.volatility, 0.0);
        assert_relative_eq!(params.drift, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_insufficient_data() {
        let err = estimate_parameters(&series(&[100.0])).unwrap_err();
        assert_eq!(err, FolioError::insufficient_data("AAPL", 2, 1));

        let err = estimate_parameters(&PriceSeries::empty("AAPL").unwrap()).unwrap_err();
        assert!(matches!(err, FolioError::InsufficientData { actual: 0, .. }));
    }

    #[test]
    fn test_parameter_validation() {
        assert!(ReturnParameters::new(0.001, 0.02).is_ok());
        assert!(ReturnParameters::new(0.001, -0.02).is_err());
        assert!(ReturnParameters::new(f64::NAN, 0.02).is_err());
        assert!(ReturnParameters::new(0.0, f64::INFINITY).is_err());
    }
}
