//! Realized portfolio index.
//!
//! Each ticker's closes are restricted to the dates every ticker shares,
//! normalized to 1.0 at the first shared date, weighted by the ticker's
//! share of total transaction value and summed. With weights summing to
//! one the index starts at 1.0.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use folio_core::{FolioError, FolioResult, PricePoint, PriceSeries};
use folio_math::statistics::pct_change;
use folio_portfolio::PortfolioWeights;
use serde::{Deserialize, Serialize};

/// Label carried by the index series.
pub const PORTFOLIO_LABEL: &str = "PORTFOLIO";

/// Dates present in every series, ascending.
#[must_use]
pub fn common_dates<'a, I>(series: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a PriceSeries>,
{
    let mut iter = series.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let mut dates: BTreeSet<NaiveDate> = first.points().iter().map(|p| p.date).collect();
    for s in iter {
        let other: BTreeSet<NaiveDate> = s.points().iter().map(|p| p.date).collect();
        dates.retain(|d| other.contains(d));
    }
    dates.into_iter().collect()
}

/// Weighted, normalized value of the holdings over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioIndex {
    points: Vec<PricePoint>,
}

impl PortfolioIndex {
    /// Wraps already computed index points.
    #[must_use]
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Index observations in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index values in date order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// The most recent index value.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Daily simple returns of the index.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than 2 observations.
    pub fn returns(&self) -> FolioResult<Vec<f64>> {
        if self.points.len() < 2 {
            return Err(FolioError::insufficient_data(
                PORTFOLIO_LABEL,
                2,
                self.points.len(),
            ));
        }
        pct_change(&self.values()).map_err(|e| FolioError::from_math(PORTFOLIO_LABEL, e))
    }

    /// The index as a price series labelled [`PORTFOLIO_LABEL`].
    ///
    /// # Errors
    ///
    /// Propagates series validation failures (non-positive values).
    pub fn to_series(&self) -> FolioResult<PriceSeries> {
        PriceSeries::new(PORTFOLIO_LABEL, self.points.clone())
    }
}

/// Builds the realized index from per-ticker histories and weights.
///
/// # Errors
///
/// - `DataUnavailable` if a weighted ticker has no history
/// - `InsufficientData` if the histories share no date
/// - `InvalidParameter` if a ticker's first shared close is not positive
pub fn realized_portfolio_index(
    histories: &BTreeMap<String, PriceSeries>,
    weights: &PortfolioWeights,
) -> FolioResult<PortfolioIndex> {
    let mut weighted = Vec::with_capacity(weights.len());
    for (ticker, weight) in weights.iter() {
        let series = histories
            .get(ticker)
            .ok_or_else(|| FolioError::data_unavailable(ticker, "no price history"))?;
        weighted.push((ticker, series, weight));
    }

    let dates = common_dates(weighted.iter().map(|(_, s, _)| *s));
    if dates.is_empty() {
        return Err(FolioError::insufficient_data("aligned history", 2, 0));
    }

    let mut values = vec![0.0; dates.len()];
    for (ticker, series, weight) in weighted {
        let closes = aligned_closes(ticker, series, &dates)?;
        let base = closes[0];
        if !base.is_finite() || base <= 0.0 {
            return Err(FolioError::invalid_parameter(
                "close",
                format!("{ticker}: first aligned close must be positive, got {base}"),
            ));
        }
        for (v, close) in values.iter_mut().zip(&closes) {
            *v += weight * close / base;
        }
    }

    tracing::debug!(
        tickers = weights.len(),
        observations = dates.len(),
        "Built realized portfolio index"
    );

    Ok(PortfolioIndex::from_points(
        dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| PricePoint::new(date, value))
            .collect(),
    ))
}

fn aligned_closes(ticker: &str, series: &PriceSeries, dates: &[NaiveDate]) -> FolioResult<Vec<f64>> {
    dates
        .iter()
        .map(|d| {
            series
                .close_on(*d)
                .ok_or_else(|| FolioError::data_unavailable(ticker, format!("no close on {d}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use folio_core::Holding;
    use folio_portfolio::transaction_value_weights;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn series(ticker: &str, points: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::new(
            ticker,
            points
                .iter()
                .map(|&(d, c)| PricePoint::new(day(d), c))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_common_dates() {
        let a = series("A", &[(2, 1.0), (3, 1.0), (4, 1.0), (5, 1.0)]);
        let b = series("B", &[(3, 1.0), (5, 1.0), (8, 1.0)]);
        assert_eq!(common_dates([&a, &b]), vec![day(3), day(5)]);
        assert!(common_dates(std::iter::empty::<&PriceSeries>()).is_empty());
    }

    #[test]
    fn test_index_weights_normalized_closes() {
        let holdings = vec![
            Holding::new("A", dec!(1), dec!(300)).unwrap(),
            Holding::new("B", dec!(1), dec!(100)).unwrap(),
        ];
        let weights = transaction_value_weights(&holdings).unwrap();
        let mut histories = BTreeMap::new();
        histories.insert("A".to_string(), series("A", &[(1, 50.0), (2, 100.0), (3, 55.0)]));
        histories.insert("B".to_string(), series("B", &[(2, 10.0), (3, 12.0)]));

        let index = realized_portfolio_index(&histories, &weights).unwrap();

        assert_eq!(index.len(), 2);
        assert_relative_eq!(index.values()[0], 1.0);
        assert_relative_eq!(index.values()[1], 0.75 * 0.55 + 0.25 * 1.2);
        assert_eq!(index.points()[0].date, day(2));
    }

    #[test]
    fn test_missing_history() {
        let holdings = vec![Holding::new("A", dec!(1), dec!(1)).unwrap()];
        let weights = transaction_value_weights(&holdings).unwrap();
        let err = realized_portfolio_index(&BTreeMap::new(), &weights).unwrap_err();
        assert!(matches!(err, FolioError::DataUnavailable { ticker, .. } if ticker == "A"));
    }

    #[test]
    fn test_disjoint_histories() {
        let holdings = vec![
            Holding::new("A", dec!(1), dec!(1)).unwrap(),
            Holding::new("B", dec!(1), dec!(1)).unwrap(),
        ];
        let weights = transaction_value_weights(&holdings).unwrap();
        let mut histories = BTreeMap::new();
        histories.insert("A".to_string(), series("A", &[(1, 1.0)]));
        histories.insert("B".to_string(), series("B", &[(2, 1.0)]));

        let err = realized_portfolio_index(&histories, &weights).unwrap_err();
        assert!(matches!(
            err,
            FolioError::InsufficientData { required: 2, actual: 0, .. }
        ));
    }

    #[test]
    fn test_returns_need_two_points() {
        let index = PortfolioIndex::from_points(vec![PricePoint::new(day(2), 1.0)]);
        assert!(matches!(
            index.returns().unwrap_err(),
            FolioError::InsufficientData { required: 2, actual: 1, .. }
        ));
    }
}
