//! Daily close-price history for one ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendars::{Calendar, WeekendCalendar};
use crate::error::{FolioError, FolioResult};
use crate::types::holding::normalize_ticker;

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a price point.
    #[must_use]
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronologically ordered closes for one ticker, without duplicate dates.
///
/// A series may be empty: gateways are allowed to return one, and
/// consumers must treat it as missing data rather than as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a validated series.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if dates are not strictly increasing or a
    /// close is not a finite positive number.
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> FolioResult<Self> {
        let ticker = normalize_ticker(&ticker.into())?;

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(FolioError::invalid_parameter(
                    "price_series",
                    format!(
                        "{ticker}: dates must be strictly increasing ({} follows {})",
                        pair[1].date, pair[0].date
                    ),
                ));
            }
        }

        if let Some(bad) = points.iter().find(|p| !p.close.is_finite() || p.close <= 0.0) {
            return Err(FolioError::invalid_parameter(
                "price_series",
                format!("{ticker}: close on {} must be positive, got {}", bad.date, bad.close),
            ));
        }

        Ok(Self { ticker, points })
    }

    /// Creates an empty series.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a blank ticker.
    pub fn empty(ticker: impl Into<String>) -> FolioResult<Self> {
        Self::new(ticker, Vec::new())
    }

    /// Creates a series from closes on consecutive business days from `start`.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`].
    pub fn from_closes(
        ticker: impl Into<String>,
        start: NaiveDate,
        closes: &[f64],
    ) -> FolioResult<Self> {
        let dates = WeekendCalendar.business_days(start, closes.len());
        let points = dates
            .into_iter()
            .zip(closes)
            .map(|(date, &close)| PricePoint::new(date, close))
            .collect();
        Self::new(ticker, points)
    }

    /// Ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// All points, oldest first.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates, oldest first.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Oldest observation.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Close at a given date.
    #[must_use]
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].close)
    }

    /// Observations within `[start, end]`.
    #[must_use]
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect(),
        }
    }

    /// The series scaled so that its first close equals `base`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` on an empty series and
    /// `InvalidParameter` for a non-positive base.
    pub fn rebased(&self, base: f64) -> FolioResult<Self> {
        let first = self
            .first()
            .ok_or_else(|| FolioError::insufficient_data(&self.ticker, 1, 0))?;
        if !base.is_finite() || base <= 0.0 {
            return Err(FolioError::invalid_parameter(
                "base",
                format!("must be positive, got {base}"),
            ));
        }
        let scale = base / first.close;
        Ok(Self {
            ticker: self.ticker.clone(),
            points: self
                .points
                .iter()
                .map(|p| PricePoint::new(p.date, p.close * scale))
                .collect(),
        })
    }
}
