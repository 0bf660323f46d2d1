//! Domain types for the Folio library.

mod holding;
mod period;
mod price_series;

pub use holding::{normalize_ticker, Holding, HoldingBuilder, UNCLASSIFIED};
pub use period::{Period, PeriodUnit};
pub use price_series::{PricePoint, PriceSeries};
