//! Historical VaR calculation.

use super::VaRResult;
use folio_core::{FolioError, FolioResult};
use folio_math::statistics::percentile;

/// Calculate historical VaR from a series of returns.
///
/// The return quantile at `1 − confidence_level` is taken with linear
/// interpolation. Only losses count: a non-negative quantile gives a VaR
/// of zero.
///
/// # Arguments
///
/// * `returns` - Historical returns (as decimals, e.g., -0.01 for -1%)
/// * `portfolio_value` - Current portfolio value
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `horizon_days` - Time horizon in days
///
/// # Errors
///
/// - `InsufficientData` if `returns` is empty
/// - `InvalidParameter` for a confidence outside `(0, 1)` or a zero horizon
pub fn historical_var(
    returns: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    horizon_days: u32,
) -> FolioResult<VaRResult> {
    if returns.is_empty() {
        return Err(FolioError::insufficient_data("returns", 1, 0));
    }
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(FolioError::invalid_parameter(
            "confidence_level",
            format!("must be between 0 and 1, got {confidence_level}"),
        ));
    }
    if horizon_days == 0 {
        return Err(FolioError::invalid_parameter(
            "horizon_days",
            "must be at least 1",
        ));
    }

    let quantile = percentile(returns, (1.0 - confidence_level) * 100.0)
        .map_err(|e| FolioError::from_math("returns", e))?;

    // Scale for time horizon (assumes daily returns)
    let var = if quantile < 0.0 {
        -quantile * f64::from(horizon_days).sqrt() * portfolio_value
    } else {
        0.0
    };

    Ok(VaRResult {
        var,
        return_quantile: quantile,
        confidence_level,
        horizon_days,
    })
}
