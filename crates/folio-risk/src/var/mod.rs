//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the potential loss over a specified time horizon
//! at a given confidence level.

mod historical;

pub use historical::*;

use serde::{Deserialize, Serialize};

/// Value at Risk result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// The VaR value (absolute loss, never negative)
    pub var: f64,
    /// Return quantile the loss was read from
    pub return_quantile: f64,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Time horizon in days
    pub horizon_days: u32,
}

impl std::fmt::Display for VaRResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}d): ${:.2}",
            self.confidence_level * 100.0,
            self.horizon_days,
            self.var
        )
    }
}
