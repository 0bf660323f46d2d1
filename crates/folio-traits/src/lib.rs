//! # Folio Traits
//!
//! Trait definitions for the collaborators of the Folio engine.
//!
//! This crate contains trait definitions plus one generic decorator.
//! Implementations live in extension crates (`folio-ext-file`).
//!
//! ## Module Structure
//!
//! - [`market_data`]: historical and latest close prices
//! - [`storage`]: persistence of holdings
//! - [`retry`]: retry policy for flaky gateways
//!
//! ## Dependency Injection
//!
//! Engine entry points take collaborators as arguments:
//!
//! ```ignore
//! let gateway = RetryingGateway::new(CsvMarketData::new("prices")?, RetryConfig::default());
//! let summary = simulate_portfolio(&holdings, &gateway, &SimulationConfig::default(), today)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;
pub mod retry;
pub mod storage;

// Re-export commonly used types
pub use error::TraitError;
pub use market_data::{MarketDataGateway, SourceType};
pub use retry::{RetryConfig, RetryingGateway};
pub use storage::HoldingsStore;
