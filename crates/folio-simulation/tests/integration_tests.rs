//! End-to-end projection tests against an in-memory gateway.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use folio_core::{FolioError, Holding};
use folio_ext_file::InMemoryMarketData;
use folio_simulation::prelude::*;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn aapl_gateway() -> InMemoryMarketData {
    InMemoryMarketData::new()
        .with_closes("AAPL", start(), &[150.0, 153.0, 151.5])
        .unwrap()
        .with_latest_price("AAPL", 150.0)
}

fn aapl_holdings() -> Vec<Holding> {
    vec![Holding::builder()
        .ticker("AAPL")
        .sector("Technology")
        .asset_class("Equity")
        .quantity(dec!(10))
        .purchase_price(dec!(150))
        .build()
        .unwrap()]
}

#[test]
fn single_asset_one_year_projection() {
    let config = SimulationConfig::default()
        .with_years(1)
        .with_simulations(1000)
        .with_seed(42);

    let summary = simulate_portfolio(&aapl_holdings(), &aapl_gateway(), &config, today()).unwrap();

    assert_eq!(summary.rows.len(), 252);
    assert_eq!(summary.n_simulations, 1000);
    assert!((summary.rows[0].mean - 1500.0).abs() <= 0.01);
    assert_eq!(summary.rows[0].date, today());
    assert_eq!(summary.initial_value, 1500.0);
}

#[test]
fn same_seed_same_summary() {
    let config = SimulationConfig::default()
        .with_years(1)
        .with_simulations(200)
        .with_seed(7);
    let gateway = aapl_gateway();

    let a = simulate_portfolio(&aapl_holdings(), &gateway, &config, today()).unwrap();
    let b = simulate_portfolio(&aapl_holdings(), &gateway, &config, today()).unwrap();
    assert_eq!(a, b);

    let c = simulate_portfolio(&aapl_holdings(), &gateway, &config.with_seed(8), today()).unwrap();
    assert_ne!(a.rows, c.rows);
}

#[test]
fn parallel_and_sequential_agree() {
    let gateway = InMemoryMarketData::new()
        .with_closes("AAPL", start(), &[150.0, 153.0, 151.5, 155.0, 154.2])
        .unwrap()
        .with_closes("TLT", start(), &[92.0, 91.5, 92.3, 92.1, 92.8])
        .unwrap();
    let holdings = vec![
        Holding::new("AAPL", dec!(10), dec!(150)).unwrap(),
        Holding::new("TLT", dec!(20), dec!(95)).unwrap(),
    ];
    let source = SeededSource::new(99);

    let sequential = SimulationConfig::sequential().with_years(1).with_simulations(300);
    let parallel = SimulationConfig::default()
        .with_years(1)
        .with_simulations(300)
        .with_threshold(1);

    let a = simulate_portfolio_with(&holdings, &gateway, &sequential, today(), &source).unwrap();
    let b = simulate_portfolio_with(&holdings, &gateway, &parallel, today(), &source).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_simulation_bands_collapse() {
    let config = SimulationConfig::default()
        .with_years(1)
        .with_simulations(1)
        .with_seed(3);
    let summary = simulate_portfolio(&aapl_holdings(), &aapl_gateway(), &config, today()).unwrap();

    for row in &summary.rows {
        assert_eq!(row.mean, row.percentile_10);
        assert_eq!(row.mean, row.percentile_90);
    }
}

#[test]
fn constant_growth_history_projects_deterministically() {
    let growth: f64 = 1.001;
    let closes: Vec<f64> = (0..60).map(|i| 100.0 * growth.powi(i)).collect();
    let gateway = InMemoryMarketData::new()
        .with_closes("BND", start(), &closes)
        .unwrap()
        .with_latest_price("BND", 100.0);
    let holdings = vec![Holding::new("BND", dec!(10), dec!(100)).unwrap()];
    let config = SimulationConfig::default()
        .with_years(1)
        .with_simulations(20)
        .with_seed(5);

    let summary = simulate_portfolio(&holdings, &gateway, &config, today()).unwrap();

    let drift = growth - 1.0;
    for (t, row) in summary.rows.iter().enumerate() {
        let expected = 1000.0 * (drift * t as f64).exp();
        assert_relative_eq!(row.mean, expected, max_relative = 1e-6);
        assert_relative_eq!(row.percentile_10, expected, max_relative = 1e-6);
        assert_relative_eq!(row.percentile_90, expected, max_relative = 1e-6);
    }
}

#[test]
fn duplicate_lots_are_combined() {
    let gateway = aapl_gateway();
    let holdings = vec![
        Holding::new("AAPL", dec!(4), dec!(140)).unwrap(),
        Holding::new("aapl", dec!(6), dec!(155)).unwrap(),
    ];
    let config = SimulationConfig::sequential()
        .with_years(1)
        .with_simulations(10)
        .with_seed(1);

    let combined = simulate_portfolio(&holdings, &gateway, &config, today()).unwrap();
    let single = simulate_portfolio(&aapl_holdings(), &gateway, &config, today()).unwrap();
    for (a, b) in combined.rows.iter().zip(&single.rows) {
        assert_relative_eq!(a.mean, b.mean, max_relative = 1e-12);
    }
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = SimulationConfig::default().with_simulations(0);
    let err = simulate_portfolio(&aapl_holdings(), &aapl_gateway(), &config, today()).unwrap_err();
    assert!(matches!(err, FolioError::InvalidParameter { .. }));

    let err = simulate_portfolio(&[], &aapl_gateway(), &SimulationConfig::default(), today())
        .unwrap_err();
    assert!(matches!(err, FolioError::EmptyPortfolio { .. }));
}
