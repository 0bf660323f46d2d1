//! # Folio Core
//!
//! Core types and abstractions for the Folio portfolio analytics library.
//!
//! This crate provides the foundational building blocks used throughout Folio:
//!
//! - **Types**: `Holding`, `PriceSeries`, `Period`
//! - **Errors**: the `FolioError` kinds every engine operation reports
//! - **Business Day Calendars**: dating of projected trading days
//!
//! ## Design Philosophy
//!
//! - **Validated construction**: holdings and price series cannot be built
//!   in an invalid state
//! - **Explicit inputs**: no global portfolio; every call receives its holdings
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let holding = Holding::builder()
//!     .ticker("AAPL")
//!     .sector("Technology")
//!     .asset_class("Equity")
//!     .quantity(dec!(10))
//!     .purchase_price(dec!(150))
//!     .build()
//!     .unwrap();
//! assert_eq!(holding.transaction_value(), dec!(1500));
//!
//! let period: Period = "6mo".parse().unwrap();
//! assert_eq!(period.to_string(), "6mo");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, WeekendCalendar, TRADING_DAYS_PER_YEAR};
    pub use crate::error::{FolioError, FolioResult};
    pub use crate::types::{
        Holding, HoldingBuilder, Period, PeriodUnit, PricePoint, PriceSeries, UNCLASSIFIED,
    };
}

// Re-export commonly used types at crate root
pub use calendars::TRADING_DAYS_PER_YEAR;
pub use error::{FolioError, FolioResult};
pub use types::{Holding, HoldingBuilder, Period, PricePoint, PriceSeries};
