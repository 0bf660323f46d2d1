//! Descriptive statistics over `f64` samples.
//!
//! Conventions follow the usual numerical-library defaults:
//!
//! - Variance and standard deviation are *sample* statistics (divisor `n - 1`).
//!   A single observation has zero dispersion.
//! - Percentiles use linear interpolation between closest ranks, with
//!   rank `p / 100 * (n - 1)` over the sorted sample.

use crate::error::{MathError, MathResult};

/// Summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptive {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample variance (divisor `n - 1`).
    pub variance: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
}

/// Computes count, mean, sample variance and standard deviation.
pub fn describe(values: &[f64]) -> MathResult<Descriptive> {
    let mean = mean(values)?;
    let variance = variance_about(values, mean);
    Ok(Descriptive {
        count: values.len(),
        mean,
        variance,
        std_dev: variance.sqrt(),
    })
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (divisor `n - 1`).
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    let mean = mean(values)?;
    Ok(variance_about(values, mean))
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

fn variance_about(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let sumsq_dev = values
        .iter()
        .map(|v| {
            let dev = v - mean;
            dev * dev
        })
        .sum::<f64>();
    sumsq_dev / (n - 1) as f64
}

/// Percentile of an unsorted sample, `p` in `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> MathResult<f64> {
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("sample contains NaN"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Percentile of an already ascending-sorted sample, `p` in `[0, 100]`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(MathError::invalid_input(format!(
            "percentile must be within [0, 100], got {p}"
        )));
    }

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Period-over-period simple returns: `values[i] / values[i - 1] - 1`.
///
/// The output has one element fewer than the input.
pub fn pct_change(values: &[f64]) -> MathResult<Vec<f64>> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }

    values
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            if w[0] == 0.0 {
                Err(MathError::division_by_zero(format!(
                    "pct_change at index {}",
                    i + 1
                )))
            } else {
                Ok(w[1] / w[0] - 1.0)
            }
        })
        .collect()
}
