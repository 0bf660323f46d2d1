//! Reduces an ensemble to mean and percentile bands per business day.

use chrono::NaiveDate;
use folio_core::calendars::Calendar;
use folio_core::{FolioError, FolioResult, TRADING_DAYS_PER_YEAR};
use folio_math::statistics::{mean, percentile};
use serde::Serialize;

use crate::aggregator::SimulationEnsemble;

/// Distribution of portfolio value on one projected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Business day.
    pub date: NaiveDate,
    /// Mean across members.
    pub mean: f64,
    /// 10th percentile across members.
    pub percentile_10: f64,
    /// 90th percentile across members.
    pub percentile_90: f64,
}

/// Final value and return of one band of the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedOutcome {
    /// Band name: "Mean", "10th percentile" or "90th percentile".
    pub label: &'static str,
    /// Value on the last projected day.
    pub final_value: f64,
    /// `final / initial − 1`.
    pub total_return: f64,
    /// `(final / initial)^(1 / years) − 1`.
    pub annualized_return: f64,
}

/// Per-day summary of a projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// One row per trading day, oldest first.
    pub rows: Vec<SummaryRow>,
    /// Number of ensemble members.
    pub n_simulations: usize,
    /// Number of projected trading days.
    pub trading_days: usize,
    /// Total current value on day 0.
    pub initial_value: f64,
    /// Base seed the ensemble was drawn with, when known.
    pub seed: Option<u64>,
}

impl SimulationSummary {
    /// Last projected row.
    #[must_use]
    pub fn final_row(&self) -> Option<&SummaryRow> {
        self.rows.last()
    }

    /// Projection horizon in years.
    #[must_use]
    pub fn years(&self) -> f64 {
        self.trading_days as f64 / TRADING_DAYS_PER_YEAR as f64
    }

    /// Final value, total and annualized return of the mean, p10 and p90 bands.
    #[must_use]
    pub fn outcomes(&self) -> Vec<ProjectedOutcome> {
        let Some(last) = self.final_row() else {
            return Vec::new();
        };
        let years = self.years();
        [
            ("Mean", last.mean),
            ("10th percentile", last.percentile_10),
            ("90th percentile", last.percentile_90),
        ]
        .into_iter()
        .map(|(label, final_value)| {
            let growth = final_value / self.initial_value;
            ProjectedOutcome {
                label,
                final_value,
                total_return: growth - 1.0,
                annualized_return: growth.powf(1.0 / years) - 1.0,
            }
        })
        .collect()
    }
}

/// Summarizes every day of `ensemble` independently.
///
/// The first row is dated `start` rolled forward to a business day; each
/// following row is the next business day of `calendar`.
///
/// # Errors
///
/// Returns `InvalidParameter` if a day cannot be summarized (non-finite values).
pub fn summarize(
    ensemble: &SimulationEnsemble,
    start: NaiveDate,
    calendar: &dyn Calendar,
) -> FolioResult<SimulationSummary> {
    let dates = calendar.business_days(start, ensemble.trading_days());

    let mut rows = Vec::with_capacity(dates.len());
    for (day, date) in dates.into_iter().enumerate() {
        let values = ensemble.day(day).to_vec();
        let summarize_err = |e| FolioError::from_math(format!("projection day {day}"), e);
        rows.push(SummaryRow {
            date,
            mean: mean(&values).map_err(summarize_err)?,
            percentile_10: percentile(&values, 10.0).map_err(summarize_err)?,
            percentile_90: percentile(&values, 90.0).map_err(summarize_err)?,
        });
    }

    Ok(SimulationSummary {
        rows,
        n_simulations: ensemble.n_simulations(),
        trading_days: ensemble.trading_days(),
        initial_value: ensemble.initial_value(),
        seed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, Weekday};
    use folio_core::calendars::WeekendCalendar;
    use ndarray::array;

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_single_member_bands_collapse() {
        let ensemble =
            SimulationEnsemble::from_values(array![[100.0, 101.0, 99.5]], 100.0).unwrap();
        let summary = summarize(&ensemble, saturday(), &WeekendCalendar).unwrap();

        for (row, expected) in summary.rows.iter().zip([100.0, 101.0, 99.5]) {
            assert_eq!(row.mean, expected);
            assert_eq!(row.percentile_10, expected);
            assert_eq!(row.percentile_90, expected);
        }
    }

    #[test]
    fn test_linear_percentiles() {
        let values = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let ensemble = SimulationEnsemble::from_values(values, 3.0).unwrap();
        let summary = summarize(&ensemble, saturday(), &WeekendCalendar).unwrap();

        let row = summary.rows[0];
        assert_relative_eq!(row.mean, 3.0);
        assert_relative_eq!(row.percentile_10, 1.4, epsilon = 1e-12);
        assert_relative_eq!(row.percentile_90, 4.6, epsilon = 1e-12);
    }

    #[test]
    fn test_dates_skip_weekends() {
        let ensemble =
            SimulationEnsemble::from_values(ndarray::Array2::from_elem((1, 6), 1.0), 1.0).unwrap();
        let summary = summarize(&ensemble, saturday(), &WeekendCalendar).unwrap();

        let dates: Vec<_> = summary.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(dates[5], NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(dates
            .iter()
            .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn test_outcomes() {
        let ensemble = SimulationEnsemble::from_values(
            ndarray::Array2::from_elem((1, TRADING_DAYS_PER_YEAR * 2), 100.0),
            100.0,
        )
        .unwrap();
        let mut summary = summarize(&ensemble, saturday(), &WeekendCalendar).unwrap();
        summary.rows.last_mut().unwrap().mean = 121.0;

        let outcomes = summary.outcomes();
        assert_eq!(outcomes.len(), 3);
        assert_relative_eq!(outcomes[0].total_return, 0.21, epsilon = 1e-12);
        assert_relative_eq!(outcomes[0].annualized_return, 0.1, epsilon = 1e-12);
        assert_relative_eq!(outcomes[1].total_return, 0.0);
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        let err = SimulationEnsemble::from_values(ndarray::Array2::zeros((0, 5)), 1.0).unwrap_err();
        assert!(matches!(err, FolioError::InvalidParameter { .. }));
    }
}
