//! JSON-file and in-memory holdings stores.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_core::types::normalize_ticker;
use folio_core::Holding;
use folio_traits::error::TraitError;
use folio_traits::storage::HoldingsStore;

/// Default location of the holdings file.
pub const DEFAULT_HOLDINGS_PATH: &str = "data/portfolio.json";

/// On-disk record of one holding.
///
/// `transaction_value` is written for readability and recomputed on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HoldingRecord {
    ticker: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    asset_class: Option<String>,
    quantity: Decimal,
    purchase_price: Decimal,
    #[serde(default, skip_deserializing)]
    transaction_value: Decimal,
}

impl From<&Holding> for HoldingRecord {
    fn from(h: &Holding) -> Self {
        Self {
            ticker: h.ticker().to_string(),
            sector: Some(h.sector().to_string()),
            asset_class: Some(h.asset_class().to_string()),
            quantity: h.quantity(),
            purchase_price: h.purchase_price(),
            transaction_value: h.transaction_value(),
        }
    }
}

impl TryFrom<HoldingRecord> for Holding {
    type Error = TraitError;

    fn try_from(record: HoldingRecord) -> Result<Self, Self::Error> {
        let mut builder = Holding::builder()
            .ticker(record.ticker)
            .quantity(record.quantity)
            .purchase_price(record.purchase_price);
        if let Some(sector) = record.sector {
            builder = builder.sector(sector);
        }
        if let Some(asset_class) = record.asset_class {
            builder = builder.asset_class(asset_class);
        }
        builder
            .build()
            .map_err(|e| TraitError::ParseError(e.to_string()))
    }
}

// =============================================================================
// JSON HOLDINGS STORE
// =============================================================================

/// Flat JSON array of holdings at a file path.
///
/// A missing file is an empty portfolio. Parent directories are created on
/// the first write. Read-modify-write operations are serialized per store.
pub struct JsonHoldingsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonHoldingsStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// File the store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Holding>, TraitError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<HoldingRecord> = serde_json::from_str(&content).map_err(|e| {
            TraitError::ParseError(format!("{}: {e}", self.path.display()))
        })?;
        records.into_iter().map(Holding::try_from).collect()
    }

    fn write(&self, holdings: &[Holding]) -> Result<(), TraitError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let records: Vec<HoldingRecord> = holdings.iter().map(HoldingRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| TraitError::SerializationError(e.to_string()))?;
        fs::write(&self.path, json)?;
        tracing::debug!(
            path = %self.path.display(),
            holdings = holdings.len(),
            "Saved holdings"
        );
        Ok(())
    }
}

impl Default for JsonHoldingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_HOLDINGS_PATH)
    }
}

impl HoldingsStore for JsonHoldingsStore {
    fn load(&self) -> Result<Vec<Holding>, TraitError> {
        let _guard = self.lock.lock();
        self.read()
    }

    fn add(&self, holding: Holding) -> Result<(), TraitError> {
        let _guard = self.lock.lock();
        let mut holdings = self.read()?;
        holdings.push(holding);
        self.write(&holdings)
    }

    fn delete_ticker(&self, ticker: &str) -> Result<usize, TraitError> {
        let ticker = normalize_ticker(ticker).map_err(|e| TraitError::InvalidInput(e.to_string()))?;
        let _guard = self.lock.lock();
        let mut holdings = self.read()?;
        let before = holdings.len();
        holdings.retain(|h| h.ticker() != ticker);
        let removed = before - holdings.len();
        if removed > 0 {
            self.write(&holdings)?;
        }
        Ok(removed)
    }

    fn clear(&self) -> Result<(), TraitError> {
        let _guard = self.lock.lock();
        self.write(&[])
    }
}

// =============================================================================
// IN-MEMORY HOLDINGS STORE
// =============================================================================

/// In-memory holdings store for tests.
#[derive(Default)]
pub struct InMemoryHoldingsStore {
    holdings: RwLock<Vec<Holding>>,
}

impl InMemoryHoldingsStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `holdings`.
    pub fn with_holdings(holdings: Vec<Holding>) -> Self {
        Self {
            holdings: RwLock::new(holdings),
        }
    }
}

impl HoldingsStore for InMemoryHoldingsStore {
    fn load(&self) -> Result<Vec<Holding>, TraitError> {
        Ok(self.holdings.read().clone())
    }

    fn add(&self, holding: Holding) -> Result<(), TraitError> {
        self.holdings.write().push(holding);
        Ok(())
    }

    fn delete_ticker(&self, ticker: &str) -> Result<usize, TraitError> {
        let ticker = normalize_ticker(ticker).map_err(|e| TraitError::InvalidInput(e.to_string()))?;
        let mut holdings = self.holdings.write();
        let before = holdings.len();
        holdings.retain(|h| h.ticker() != ticker);
        Ok(before - holdings.len())
    }

    fn clear(&self) -> Result<(), TraitError> {
        self.holdings.write().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn aapl() -> Holding {
        Holding::builder()
            .ticker("AAPL")
            .sector("Technology")
            .asset_class("Equity")
            .quantity(dec!(10))
            .purchase_price(dec!(150))
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHoldingsStore::new(dir.path().join("portfolio.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_add_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("portfolio.json");
        let store = JsonHoldingsStore::new(&path);

        store.add(aapl()).unwrap();
        store.add(aapl()).unwrap();

        assert!(path.exists());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], aapl());
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        let store = JsonHoldingsStore::new(&path);
        store.add(aapl()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let record = &value[0];
        assert_eq!(record["ticker"], "AAPL");
        assert_eq!(record["sector"], "Technology");
        assert_eq!(record["asset_class"], "Equity");
        assert_eq!(record["transaction_value"].as_f64(), Some(1500.0));
    }

    #[test]
    fn test_reads_hand_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(
            &path,
            r#"[{"ticker": "msft", "quantity": 5, "purchase_price": 300.5, "transaction_value": 1}]"#,
        )
        .unwrap();

        let loaded = JsonHoldingsStore::new(&path).load().unwrap();
        assert_eq!(loaded[0].ticker(), "MSFT");
        assert_eq!(loaded[0].sector(), folio_core::types::UNCLASSIFIED);
        assert_eq!(loaded[0].transaction_value(), dec!(1502.5));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(&path, r#"[{"ticker": "AAPL", "quantity": -1, "purchase_price": 1}]"#).unwrap();
        assert!(matches!(
            JsonHoldingsStore::new(&path).load(),
            Err(TraitError::ParseError(_))
        ));
    }

    #[test]
    fn test_delete_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHoldingsStore::new(dir.path().join("portfolio.json"));
        store.add(aapl()).unwrap();
        store.add(aapl()).unwrap();
        store
            .add(Holding::new("MSFT", dec!(1), dec!(300)).unwrap())
            .unwrap();

        assert_eq!(store.delete_ticker("aapl").unwrap(), 2);
        assert_eq!(store.delete_ticker("AAPL").unwrap(), 0);
        assert_eq!(store.load().unwrap().len(), 1);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryHoldingsStore::with_holdings(vec![aapl()]);
        store
            .add(Holding::new("MSFT", dec!(1), dec!(300)).unwrap())
            .unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
        assert_eq!(store.delete_ticker("msft").unwrap(), 1);
        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
