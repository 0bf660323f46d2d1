//! # Folio Simulation
//!
//! Monte Carlo projection of portfolio value.
//!
//! Each asset follows a discretized geometric Brownian motion with daily
//! drift and volatility estimated from its own close history. Assets are
//! independent. Paths are combined by current-value weight into
//! portfolio-value paths, and the ensemble is reduced to mean, 10th and
//! 90th percentile per business day.
//!
//! ## Pipeline
//!
//! ```text
//! holdings + gateway ──► estimator ──► simulator ──► aggregator ──► summarizer
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio_simulation::prelude::*;
//!
//! let config = SimulationConfig::default().with_years(1).with_seed(42);
//! let summary = simulate_portfolio(&holdings, &gateway, &config, today)?;
//! for outcome in summary.outcomes() {
//!     println!("{}: {:.0}", outcome.label, outcome.final_value);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): run ensemble members on the rayon pool. Results
//!   are identical to sequential runs under the same seed.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod config;
pub mod engine;
pub mod estimator;
pub mod parallel;
pub mod simulator;
pub mod summarizer;

pub use aggregator::{build_ensemble, AssetAllocation, SimulationEnsemble};
pub use config::SimulationConfig;
pub use engine::{gather_inputs, simulate_portfolio, simulate_portfolio_with, ProjectionInputs};
pub use estimator::{daily_returns, estimate_parameters, ReturnParameters};
pub use simulator::{simulate_path, RelativePath, SimulationPath};
pub use summarizer::{summarize, ProjectedOutcome, SimulationSummary, SummaryRow};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregator::{build_ensemble, AssetAllocation, SimulationEnsemble};
    pub use crate::config::SimulationConfig;
    pub use crate::engine::{simulate_portfolio, simulate_portfolio_with};
    pub use crate::estimator::{estimate_parameters, ReturnParameters};
    pub use crate::simulator::{simulate_path, SimulationPath};
    pub use crate::summarizer::{summarize, ProjectedOutcome, SimulationSummary, SummaryRow};
    pub use folio_math::{RandomSource, SeededSource};
}
