//! Holdings storage trait.

use crate::error::TraitError;
use folio_core::Holding;

/// Flat record store of holdings keyed by ticker.
pub trait HoldingsStore: Send + Sync {
    /// Loads every holding. A store that does not exist yet is empty.
    fn load(&self) -> Result<Vec<Holding>, TraitError>;

    /// Appends a holding. Existing lots of the same ticker are kept.
    fn add(&self, holding: Holding) -> Result<(), TraitError>;

    /// Removes every holding of `ticker` (case-insensitive) and returns how
    /// many were removed.
    fn delete_ticker(&self, ticker: &str) -> Result<usize, TraitError>;

    /// Removes all holdings.
    fn clear(&self) -> Result<(), TraitError>;
}
