//! Configuration for historical risk metrics.

use folio_core::{FolioError, FolioResult, Period};
use serde::{Deserialize, Serialize};

/// Configuration for [`calculate_risk_metrics`](crate::calculate_risk_metrics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Annual risk-free rate used by the Sharpe ratio.
    pub risk_free_rate: f64,

    /// Look-back period of the realized index.
    pub period: Period,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            period: Period::one_year(),
        }
    }
}

impl RiskConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the look-back period.
    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Checks the risk-free rate is finite.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a NaN or infinite rate.
    pub fn validate(&self) -> FolioResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(FolioError::invalid_parameter(
                "risk_free_rate",
                format!("must be finite, got {}", self.risk_free_rate),
            ));
        }
        Ok(())
    }
}
