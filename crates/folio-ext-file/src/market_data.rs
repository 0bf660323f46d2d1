//! File-based and in-memory market data gateways.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Deserialize;

use folio_core::types::normalize_ticker;
use folio_core::{Period, PricePoint, PriceSeries};
use folio_traits::error::TraitError;
use folio_traits::market_data::{MarketDataGateway, SourceType};

// =============================================================================
// CSV MARKET DATA
// =============================================================================

/// CSV record for one daily close.
///
/// Extra columns are ignored, so spreadsheet exports with
/// `Date,Open,High,Low,Close,...` headers load as-is.
#[derive(Debug, Deserialize)]
struct CloseRecord {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Close")]
    close: f64,
}

/// Directory of `<TICKER>.csv` close histories.
///
/// Each file is read at most once per gateway instance; later calls work
/// on the same snapshot.
pub struct CsvMarketData {
    directory: PathBuf,
    series: DashMap<String, PriceSeries>,
}

impl CsvMarketData {
    /// Creates a gateway over `directory`.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, TraitError> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.is_dir() {
            return Err(TraitError::InvalidInput(format!(
                "price directory not found: {}",
                directory.display()
            )));
        }
        Ok(Self {
            directory,
            series: DashMap::new(),
        })
    }

    /// Directory the gateway reads from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the CSV file for `ticker`.
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.directory.join(format!("{ticker}.csv"))
    }

    /// Full history of `ticker`, loading it on first use.
    pub fn load(&self, ticker: &str) -> Result<PriceSeries, TraitError> {
        let ticker = ticker_key(ticker)?;
        if let Some(series) = self.series.get(&ticker) {
            return Ok(series.clone());
        }

        let series = self.read_file(&ticker)?;
        tracing::debug!(
            ticker = %ticker,
            observations = series.len(),
            "Loaded price file"
        );
        self.series.insert(ticker, series.clone());
        Ok(series)
    }

    fn read_file(&self, ticker: &str) -> Result<PriceSeries, TraitError> {
        let path = self.path_for(ticker);
        if !path.exists() {
            return Err(TraitError::NotFound(format!(
                "{ticker}: no price file at {}",
                path.display()
            )));
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut points = Vec::new();
        for result in reader.deserialize() {
            let record: CloseRecord = result
                .map_err(|e| TraitError::ParseError(format!("{}: {e}", path.display())))?;
            points.push(PricePoint::new(record.date, record.close));
        }
        points.sort_by_key(|p| p.date);

        PriceSeries::new(ticker, points)
            .map_err(|e| TraitError::ParseError(format!("{}: {e}", path.display())))
    }
}

impl MarketDataGateway for CsvMarketData {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError> {
        let series = self.load(ticker)?;
        Ok(trailing(&series, period))
    }

    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
        let series = self.load(ticker)?;
        series
            .last()
            .map(|p| p.close)
            .ok_or_else(|| {
                TraitError::NotFound(format!("{}: price file is empty", series.ticker()))
            })
    }
}

fn ticker_key(ticker: &str) -> Result<String, TraitError> {
    normalize_ticker(ticker).map_err(|e| TraitError::InvalidInput(e.to_string()))
}

/// The part of `series` covered by `period`, counted back from its last date.
fn trailing(series: &PriceSeries, period: Period) -> PriceSeries {
    match series.last() {
        Some(last) => series.between(period.start_from(last.date), last.date),
        None => series.clone(),
    }
}

// =============================================================================
// IN-MEMORY MARKET DATA
// =============================================================================

/// In-memory gateway for tests and fixtures.
///
/// The latest price defaults to the last close of the stored series and can
/// be overridden per ticker.
#[derive(Default)]
pub struct InMemoryMarketData {
    series: DashMap<String, PriceSeries>,
    latest: DashMap<String, f64>,
}

impl InMemoryMarketData {
    /// Create a new empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series (builder style).
    #[must_use]
    pub fn with_series(self, series: PriceSeries) -> Self {
        self.insert_series(series);
        self
    }

    /// Adds a series built from closes on consecutive business days.
    pub fn with_closes(
        self,
        ticker: &str,
        start: NaiveDate,
        closes: &[f64],
    ) -> Result<Self, TraitError> {
        let series = PriceSeries::from_closes(ticker, start, closes)
            .map_err(|e| TraitError::InvalidInput(e.to_string()))?;
        Ok(self.with_series(series))
    }

    /// Overrides the latest price (builder style).
    #[must_use]
    pub fn with_latest_price(self, ticker: &str, price: f64) -> Self {
        self.set_latest_price(ticker, price);
        self
    }

    /// Inserts or replaces a series.
    pub fn insert_series(&self, series: PriceSeries) {
        self.series.insert(series.ticker().to_string(), series);
    }

    /// Overrides the latest price of `ticker`.
    pub fn set_latest_price(&self, ticker: &str, price: f64) {
        self.latest.insert(ticker.trim().to_uppercase(), price);
    }
}

impl MarketDataGateway for InMemoryMarketData {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError> {
        let key = ticker_key(ticker)?;
        self.series
            .get(&key)
            .map(|s| trailing(&s, period))
            .ok_or(TraitError::NotFound(key))
    }

    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
        let key = ticker_key(ticker)?;
        if let Some(price) = self.latest.get(&key) {
            return Ok(*price);
        }
        self.series
            .get(&key)
            .and_then(|s| s.last().map(|p| p.close))
            .ok_or(TraitError::NotFound(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_csv_history_and_latest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("AAPL.csv"),
            "date,close\n2024-01-02,150.0\n2024-01-03,153.0\n2024-01-04,151.5\n",
        )
        .unwrap();

        let gateway = CsvMarketData::new(dir.path()).unwrap();
        let series = gateway.get_history("aapl", Period::one_year()).unwrap();
        assert_eq!(series.ticker(), "AAPL");
        assert_eq!(series.closes(), vec![150.0, 153.0, 151.5]);
        assert_eq!(gateway.get_latest_price("AAPL").unwrap(), 151.5);
    }

    #[test]
    fn test_csv_period_filter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("SPY.csv"),
            "date,close\n2023-01-03,380.0\n2023-12-29,470.0\n2024-07-01,545.0\n2024-12-31,586.0\n",
        )
        .unwrap();

        let gateway = CsvMarketData::new(dir.path()).unwrap();
        let series = gateway.get_history("SPY", "6mo".parse().unwrap()).unwrap();
        assert_eq!(series.dates(), vec![date(2024, 7, 1), date(2024, 12, 31)]);

        let series = gateway.get_history("SPY", "5y".parse().unwrap()).unwrap();
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_csv_spreadsheet_export_headers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("MSFT.csv"),
            "Date,Open,High,Low,Close,Volume\n2024-01-03,1,1,1,370.6,100\n2024-01-02,1,1,1,372.5,100\n",
        )
        .unwrap();

        let gateway = CsvMarketData::new(dir.path()).unwrap();
        let series = gateway.load("MSFT").unwrap();
        assert_eq!(series.closes(), vec![372.5, 370.6]);
    }

    #[test]
    fn test_csv_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("BAD.csv"), "date,close\n2024-01-02,abc\n").unwrap();
        fs::write(dir.path().join("NEG.csv"), "date,close\n2024-01-02,-1.0\n").unwrap();

        let gateway = CsvMarketData::new(dir.path()).unwrap();
        assert!(matches!(
            gateway.get_latest_price("ZZZZ"),
            Err(TraitError::NotFound(_))
        ));
        assert!(matches!(gateway.load("BAD"), Err(TraitError::ParseError(_))));
        assert!(matches!(gateway.load("NEG"), Err(TraitError::ParseError(_))));

        assert!(matches!(
            CsvMarketData::new(dir.path().join("missing")),
            Err(TraitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_in_memory() {
        let gateway = InMemoryMarketData::new()
            .with_closes("AAPL", date(2024, 1, 2), &[150.0, 153.0, 151.5])
            .unwrap();
        assert_eq!(gateway.get_latest_price("AAPL").unwrap(), 151.5);

        gateway.set_latest_price("aapl", 150.0);
        assert_eq!(gateway.get_latest_price("AAPL").unwrap(), 150.0);
        assert_eq!(
            gateway.get_history("AAPL", Period::one_year()).unwrap().len(),
            3
        );
        assert!(matches!(
            gateway.get_history("MSFT", Period::one_year()),
            Err(TraitError::NotFound(_))
        ));
    }
}
