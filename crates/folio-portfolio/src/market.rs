//! One-shot market data snapshots for a set of holdings.
//!
//! Every ticker is fetched exactly once per call. Gateway failures and
//! empty histories become `DataUnavailable` naming the ticker.

use std::collections::{BTreeMap, BTreeSet};

use folio_core::{FolioError, FolioResult, Holding, Period, PriceSeries};
use folio_traits::{MarketDataGateway, TraitError};

/// Distinct tickers of `holdings`, in ticker order.
#[must_use]
pub fn distinct_tickers(holdings: &[Holding]) -> Vec<String> {
    holdings
        .iter()
        .map(|h| h.ticker().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Latest close of every distinct ticker in `holdings`.
///
/// # Errors
///
/// Returns `DataUnavailable` if the gateway fails for any ticker.
pub fn fetch_latest_prices<G>(holdings: &[Holding], gateway: &G) -> FolioResult<BTreeMap<String, f64>>
where
    G: MarketDataGateway + ?Sized,
{
    let mut prices = BTreeMap::new();
    for ticker in distinct_tickers(holdings) {
        let price = gateway
            .get_latest_price(&ticker)
            .map_err(|e| unavailable(&ticker, &e))?;
        tracing::debug!(ticker = %ticker, price, "Fetched latest price");
        prices.insert(ticker, price);
    }
    Ok(prices)
}

/// Close history of every ticker in `tickers` over `period`.
///
/// # Errors
///
/// Returns `DataUnavailable` if the gateway fails or returns an empty
/// series for any ticker.
pub fn fetch_histories<G, I, S>(
    tickers: I,
    gateway: &G,
    period: Period,
) -> FolioResult<BTreeMap<String, PriceSeries>>
where
    G: MarketDataGateway + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut histories = BTreeMap::new();
    for ticker in tickers {
        let ticker = ticker.as_ref();
        if histories.contains_key(ticker) {
            continue;
        }
        let series = fetch_history(ticker, gateway, period)?;
        histories.insert(ticker.to_string(), series);
    }
    Ok(histories)
}

/// Close history of a single ticker over `period`.
///
/// # Errors
///
/// Returns `DataUnavailable` on gateway failure or an empty series.
pub fn fetch_history<G>(ticker: &str, gateway: &G, period: Period) -> FolioResult<PriceSeries>
where
    G: MarketDataGateway + ?Sized,
{
    let series = gateway
        .get_history(ticker, period)
        .map_err(|e| unavailable(ticker, &e))?;
    if series.is_empty() {
        return Err(FolioError::data_unavailable(
            ticker,
            format!("empty price history for period {period}"),
        ));
    }
    tracing::debug!(ticker, observations = series.len(), %period, "Fetched price history");
    Ok(series)
}

/// Maps a gateway error onto the engine's error kind.
#[must_use]
pub fn unavailable(ticker: &str, err: &TraitError) -> FolioError {
    FolioError::data_unavailable(ticker, err.to_string())
}
