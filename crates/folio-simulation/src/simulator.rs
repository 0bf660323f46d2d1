//! Forward relative-price paths under discretized GBM.
//!
//! Day 0 is the starting point (relative price 1). Each following day adds
//! one normal draw `drift + volatility × z` to the log price, so a path of
//! `n` days consumes `n − 1` draws.

use folio_core::{FolioError, FolioResult};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

use crate::estimator::ReturnParameters;

/// One simulated price path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationPath {
    start_price: f64,
    relative: Vec<f64>,
}

impl SimulationPath {
    /// Starting price `S0`.
    #[must_use]
    pub fn start_price(&self) -> f64 {
        self.start_price
    }

    /// Prices relative to `S0`; the first element is 1.
    #[must_use]
    pub fn relative(&self) -> &[f64] {
        &self.relative
    }

    /// Absolute prices: `S0 × relative`.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.relative.iter().map(|r| r * self.start_price).collect()
    }

    /// Number of trading days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relative.len()
    }

    /// Returns true for a zero-length path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relative.is_empty()
    }
}

/// Lazily generated relative prices, `1, exp(x1), exp(x1 + x2), ...`.
pub struct RelativePath<'a, R: Rng + ?Sized> {
    params: ReturnParameters,
    rng: &'a mut R,
    log_price: f64,
    remaining: usize,
    started: bool,
}

impl<'a, R: Rng + ?Sized> RelativePath<'a, R> {
    /// Creates a generator for `trading_days` relative prices.
    ///
    /// Parameters must already be validated.
    pub fn new(params: ReturnParameters, trading_days: usize, rng: &'a mut R) -> Self {
        Self {
            params,
            rng,
            log_price: 0.0,
            remaining: trading_days,
            started: false,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for RelativePath<'_, R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if self.started {
            let z: f64 = self.rng.sample(StandardNormal);
            self.log_price += self.params.drift + self.params.volatility * z;
        } else {
            self.started = true;
        }
        Some(self.log_price.exp())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for RelativePath<'_, R> {}

/// Simulates one path of `trading_days` relative prices starting at `s0`.
///
/// # Errors
///
/// Returns `InvalidParameter` if `s0` is not a finite positive number,
/// `trading_days` is zero, or the parameters are invalid.
pub fn simulate_path<R: Rng + ?Sized>(
    params: &ReturnParameters,
    s0: f64,
    trading_days: usize,
    rng: &mut R,
) -> FolioResult<SimulationPath> {
    validate_inputs(params, s0, trading_days)?;
    Ok(SimulationPath {
        start_price: s0,
        relative: RelativePath::new(*params, trading_days, rng).collect(),
    })
}

pub(crate) fn validate_inputs(
    params: &ReturnParameters,
    s0: f64,
    trading_days: usize,
) -> FolioResult<()> {
    if !s0.is_finite() || s0 <= 0.0 {
        return Err(FolioError::invalid_parameter(
            "start_price",
            format!("must be positive, got {s0}"),
        ));
    }
    if trading_days == 0 {
        return Err(FolioError::invalid_parameter(
            "trading_days",
            "must be at least 1",
        ));
    }
    params.validate()
}
