//! # Folio Math
//!
//! Mathematical utilities for the Folio portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: mean, sample variance / standard deviation, linear
//!   percentiles and period-over-period returns
//! - **Random streams**: seedable, order-independent generators for
//!   Monte Carlo ensembles
//!
//! ## Design Philosophy
//!
//! - **Explicit failure**: empty samples and zero denominators are errors,
//!   never `NaN`
//! - **Reproducibility**: every random stream is addressable by `(run, ticker)`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod random;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::random::{ticker_key, RandomSource, SeededSource};
    pub use crate::statistics::{
        describe, mean, pct_change, percentile, percentile_sorted, sample_variance, std_dev,
        Descriptive,
    };
}

pub use error::{MathError, MathResult};
pub use random::{ticker_key, RandomSource, SeededSource};
