//! Annualized return statistics.
//!
//! Daily statistics are scaled with [`TRADING_DAYS_PER_YEAR`]: the mean by
//! 252, the sample standard deviation by √252.

use folio_core::{FolioError, FolioResult, TRADING_DAYS_PER_YEAR};
use folio_math::statistics::{mean, std_dev};

/// Annualized volatility: `stdev(returns) × √252`.
///
/// A single return has zero volatility.
///
/// # Errors
///
/// Returns `InsufficientData` for an empty slice.
pub fn annualized_volatility(returns: &[f64]) -> FolioResult<f64> {
    let sd = std_dev(returns).map_err(|e| FolioError::from_math("returns", e))?;
    Ok(sd * (TRADING_DAYS_PER_YEAR as f64).sqrt())
}

/// Annualized arithmetic return: `mean(returns) × 252`.
///
/// # Errors
///
/// Returns `InsufficientData` for an empty slice.
pub fn annualized_return(returns: &[f64]) -> FolioResult<f64> {
    let m = mean(returns).map_err(|e| FolioError::from_math("returns", e))?;
    Ok(m * TRADING_DAYS_PER_YEAR as f64)
}

/// Sharpe ratio: `(annualized_return − risk_free_rate) / annualized_volatility`.
///
/// # Errors
///
/// Returns `UndefinedMetric` when the volatility is zero (or not a finite
/// positive number).
pub fn sharpe_ratio(
    annualized_return: f64,
    annualized_volatility: f64,
    risk_free_rate: f64,
) -> FolioResult<f64> {
    if !annualized_volatility.is_finite() || annualized_volatility <= 0.0 {
        return Err(FolioError::undefined_metric(
            "Sharpe ratio",
            format!("annualized volatility is {annualized_volatility}"),
        ));
    }
    Ok((annualized_return - risk_free_rate) / annualized_volatility)
}
