//! Realized portfolio performance against a benchmark ticker.

use chrono::NaiveDate;
use folio_core::types::normalize_ticker;
use folio_core::{FolioError, FolioResult, Holding, Period};
use folio_portfolio::{fetch_histories, transaction_value_weights};
use folio_traits::MarketDataGateway;
use serde::{Deserialize, Serialize};

use crate::index::realized_portfolio_index;

/// Benchmark used when none is given.
pub const DEFAULT_BENCHMARK: &str = "SPY";

/// Both series on one common date, rebased to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Trading date.
    pub date: NaiveDate,
    /// Portfolio index value.
    pub portfolio: f64,
    /// Benchmark value.
    pub benchmark: f64,
}

/// Portfolio versus benchmark over a look-back period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Benchmark ticker.
    pub benchmark: String,
    /// Rows on dates both series share.
    pub rows: Vec<ComparisonRow>,
    /// Cumulative portfolio return over the rows.
    pub portfolio_return: f64,
    /// Cumulative benchmark return over the rows.
    pub benchmark_return: f64,
    /// `portfolio_return − benchmark_return`.
    pub excess_return: f64,
}

/// Compares the realized index of `holdings` with `benchmark`.
///
/// Both series are rebased to 1.0 at their first common date.
///
/// # Errors
///
/// - `EmptyPortfolio` for empty holdings
/// - `DataUnavailable` when a history is missing or empty
/// - `InsufficientData` with fewer than 2 common dates
pub fn compare_with_benchmark<G>(
    holdings: &[Holding],
    gateway: &G,
    benchmark: &str,
    period: Period,
) -> FolioResult<BenchmarkComparison>
where
    G: MarketDataGateway + ?Sized,
{
    if holdings.is_empty() {
        return Err(FolioError::empty_portfolio("no holdings to compare"));
    }
    let benchmark = normalize_ticker(benchmark)?;
    let weights = transaction_value_weights(holdings)?;

    // A held benchmark is fetched once with the holdings.
    let histories = fetch_histories(
        weights.tickers().chain(std::iter::once(benchmark.as_str())),
        gateway,
        period,
    )?;
    let index = realized_portfolio_index(&histories, &weights)?;
    let bench = histories
        .get(&benchmark)
        .ok_or_else(|| FolioError::data_unavailable(&benchmark, "no price history"))?;

    let aligned: Vec<(NaiveDate, f64, f64)> = index
        .points()
        .iter()
        .filter_map(|p| bench.close_on(p.date).map(|b| (p.date, p.close, b)))
        .collect();
    if aligned.len() < 2 {
        return Err(FolioError::insufficient_data(
            format!("portfolio vs {benchmark}"),
            2,
            aligned.len(),
        ));
    }

    let (_, p0, b0) = aligned[0];
    let rows: Vec<ComparisonRow> = aligned
        .into_iter()
        .map(|(date, p, b)| ComparisonRow {
            date,
            portfolio: p / p0,
            benchmark: b / b0,
        })
        .collect();

    let (portfolio_return, benchmark_return) = rows
        .last()
        .map(|r| (r.portfolio - 1.0, r.benchmark - 1.0))
        .unwrap_or_default();

    tracing::info!(
        benchmark = %benchmark,
        observations = rows.len(),
        portfolio_return,
        benchmark_return,
        "Compared portfolio with benchmark"
    );

    Ok(BenchmarkComparison {
        benchmark,
        rows,
        portfolio_return,
        benchmark_return,
        excess_return: portfolio_return - benchmark_return,
    })
}
