//! Property-based tests for portfolio invariants.
//!
//! - Weights sum to 1 regardless of duplicates and price levels
//! - Valuation weights sum to 100%
//! - Breakdown buckets cover every position

use std::collections::BTreeMap;

use folio_core::Holding;
use folio_portfolio::prelude::*;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const TICKERS: [&str; 5] = ["AAPL", "MSFT", "TLT", "GLD", "VNQ"];
const SECTORS: [&str; 3] = ["Technology", "Government", "Real Estate"];

fn lot() -> impl Strategy<Value = (usize, u32, u32, usize)> {
    (0..TICKERS.len(), 1u32..10_000, 1u32..100_000, 0..SECTORS.len())
}

fn build(lots: &[(usize, u32, u32, usize)]) -> Vec<Holding> {
    lots.iter()
        .map(|&(t, qty, cents, s)| {
            Holding::builder()
                .ticker(TICKERS[t])
                .sector(SECTORS[s])
                .asset_class("Equity")
                .quantity(Decimal::from(qty))
                .purchase_price(Decimal::new(i64::from(cents), 2))
                .build()
                .unwrap()
        })
        .collect()
}

fn price_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..10_000.0, TICKERS.len())
}

fn price_map(prices: &[f64]) -> BTreeMap<String, f64> {
    TICKERS
        .iter()
        .zip(prices)
        .map(|(t, p)| ((*t).to_string(), *p))
        .collect()
}

proptest! {
    #[test]
    fn current_value_weights_sum_to_one(
        lots in prop::collection::vec(lot(), 1..30),
        prices in price_strategy(),
    ) {
        let holdings = build(&lots);
        let weights = current_value_weights(&holdings, &price_map(&prices)).unwrap();
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(weights.iter().all(|(_, w)| w > 0.0 && w <= 1.0));
    }

    #[test]
    fn transaction_value_weights_sum_to_one(lots in prop::collection::vec(lot(), 1..30)) {
        let holdings = build(&lots);
        let weights = transaction_value_weights(&holdings).unwrap();
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn valuation_weights_sum_to_hundred(
        lots in prop::collection::vec(lot(), 1..30),
        prices in price_strategy(),
    ) {
        let holdings = build(&lots);
        let valuation = value_portfolio(&holdings, &price_map(&prices)).unwrap();
        let total: f64 = valuation.positions.iter().map(|p| p.weight_pct).sum();
        prop_assert!((total - 100.0).abs() < 1e-6);
    }

    #[test]
    fn breakdown_covers_all_positions(
        lots in prop::collection::vec(lot(), 1..30),
        prices in price_strategy(),
    ) {
        let holdings = build(&lots);
        let valuation = value_portfolio(&holdings, &price_map(&prices)).unwrap();
        let buckets = breakdown(&valuation, BreakdownKey::Sector);

        let count: usize = buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(count, holdings.len());

        let value: f64 = buckets.iter().map(|b| b.current_value.to_f64().unwrap()).sum();
        let total = valuation.total_value.to_f64().unwrap();
        prop_assert!((value - total).abs() <= total * 1e-9);
    }
}
