//! Error types for the Folio library.
//!
//! Every engine operation returns [`FolioResult`]. Errors are never masked
//! or replaced by a default value: a missing price or an empty history is
//! reported to the caller with the offending ticker or reason.

use folio_math::MathError;
use thiserror::Error;

/// A specialized Result type for Folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

/// The main error type for Folio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FolioError {
    /// Not enough price history to estimate parameters or align series.
    #[error("Insufficient data for {subject}: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Ticker or series the data belongs to.
        subject: String,
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations available.
        actual: usize,
    },

    /// Non-positive price, non-positive horizon, invalid simulation count, ...
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// No holdings to weight.
    #[error("Portfolio is empty: {reason}")]
    EmptyPortfolio {
        /// What made the portfolio unusable.
        reason: String,
    },

    /// The market data gateway returned no data or failed.
    #[error("Market data unavailable for {ticker}: {reason}")]
    DataUnavailable {
        /// Ticker whose data could not be obtained.
        ticker: String,
        /// Underlying failure.
        reason: String,
    },

    /// A ratio metric has a zero denominator.
    #[error("{metric} is undefined: {reason}")]
    UndefinedMetric {
        /// Name of the metric.
        metric: String,
        /// Why it cannot be computed.
        reason: String,
    },
}

impl FolioError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(subject: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            subject: subject.into(),
            required,
            actual,
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an empty portfolio error.
    #[must_use]
    pub fn empty_portfolio(reason: impl Into<String>) -> Self {
        Self::EmptyPortfolio {
            reason: reason.into(),
        }
    }

    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    /// Creates an undefined metric error.
    #[must_use]
    pub fn undefined_metric(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UndefinedMetric {
            metric: metric.into(),
            reason: reason.into(),
        }
    }

    /// Converts a math error, attaching the subject it was computed for.
    #[must_use]
    pub fn from_math(subject: impl Into<String>, err: MathError) -> Self {
        let subject = subject.into();
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::insufficient_data(subject, required, actual)
            }
            MathError::InvalidInput { reason } => Self::invalid_parameter(subject, reason),
            MathError::DivisionByZero { context } => Self::undefined_metric(subject, context),
        }
    }
}

impl From<MathError> for FolioError {
    fn from(err: MathError) -> Self {
        Self::from_math("sample", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::insufficient_data("AAPL", 2, 1);
        assert!(err.to_string().contains("AAPL"));
        assert!(err.to_string().contains("at least 2"));

        let err = FolioError::data_unavailable("MSFT", "no history");
        assert!(err.to_string().contains("MSFT"));
        assert!(err.to_string().contains("no history"));

        let err = FolioError::invalid_parameter("trading_days", "must be positive");
        assert!(err.to_string().contains("trading_days"));
    }

    #[test]
    fn test_from_math_keeps_subject() {
        let err = FolioError::from_math("SPY", MathError::insufficient_data(2, 0));
        assert_eq!(err, FolioError::insufficient_data("SPY", 2, 0));

        let err = FolioError::from_math("sharpe ratio", MathError::division_by_zero("volatility"));
        assert!(matches!(err, FolioError::UndefinedMetric { .. }));
    }

    #[test]
    fn test_error_clone() {
        let err = FolioError::empty_portfolio("no holdings");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
