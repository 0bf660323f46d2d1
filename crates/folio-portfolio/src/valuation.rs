//! Mark-to-market valuation and profit and loss.

use std::collections::BTreeMap;

use folio_core::{FolioError, FolioResult, Holding};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::weights::price_for;

/// Valuation of one holding at its current price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionValuation {
    /// Ticker symbol.
    pub ticker: String,
    /// Sector label.
    pub sector: String,
    /// Asset class label.
    pub asset_class: String,
    /// Units held.
    pub quantity: Decimal,
    /// Price paid per unit.
    pub purchase_price: Decimal,
    /// Cost basis.
    pub transaction_value: Decimal,
    /// Latest close.
    pub current_price: Decimal,
    /// Quantity × current price.
    pub current_value: Decimal,
    /// Current value − cost basis.
    pub gain: Decimal,
    /// Gain as a percentage of cost basis.
    pub gain_pct: f64,
    /// Share of total current value, in percent (0-100).
    pub weight_pct: f64,
}

/// Valuation of a whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioValuation {
    /// One entry per holding, in input order.
    pub positions: Vec<PositionValuation>,
    /// Σ current value.
    pub total_value: Decimal,
    /// Σ cost basis.
    pub total_cost: Decimal,
    /// Total value − total cost.
    pub total_pnl: Decimal,
    /// PnL as a percentage of total cost.
    pub total_pnl_pct: f64,
}

/// Values every holding at its current price.
///
/// # Errors
///
/// - `EmptyPortfolio` if `holdings` is empty
/// - `DataUnavailable` if a held ticker has no entry in `prices`
/// - `InvalidParameter` if a price is not a finite positive number
pub fn value_portfolio(
    holdings: &[Holding],
    prices: &BTreeMap<String, f64>,
) -> FolioResult<PortfolioValuation> {
    if holdings.is_empty() {
        return Err(FolioError::empty_portfolio("no holdings"));
    }

    let mut positions = Vec::with_capacity(holdings.len());
    for holding in holdings {
        let price = price_for(holding.ticker(), prices)?;
        let current_price = Decimal::from_f64(price).ok_or_else(|| {
            FolioError::invalid_parameter(
                "current_price",
                format!("{}: {price} is not representable", holding.ticker()),
            )
        })?;
        let current_value = current_price * holding.quantity();
        let transaction_value = holding.transaction_value();
        let gain = current_value - transaction_value;

        positions.push(PositionValuation {
            ticker: holding.ticker().to_string(),
            sector: holding.sector().to_string(),
            asset_class: holding.asset_class().to_string(),
            quantity: holding.quantity(),
            purchase_price: holding.purchase_price(),
            transaction_value,
            current_price,
            current_value,
            gain,
            gain_pct: percent(gain, transaction_value),
            weight_pct: 0.0,
        });
    }

    let total_value: Decimal = positions.iter().map(|p| p.current_value).sum();
    let total_cost: Decimal = positions.iter().map(|p| p.transaction_value).sum();
    for position in &mut positions {
        position.weight_pct = percent(position.current_value, total_value);
    }

    let total_pnl = total_value - total_cost;
    Ok(PortfolioValuation {
        positions,
        total_value,
        total_cost,
        total_pnl,
        total_pnl_pct: percent(total_pnl, total_cost),
    })
}

/// `part / whole × 100`, or 0 for a zero denominator.
pub(crate) fn percent(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn sample() -> (Vec<Holding>, BTreeMap<String, f64>) {
        let holdings = vec![
            Holding::builder()
                .ticker("AAPL")
                .sector("Technology")
                .asset_class("Equity")
                .quantity(dec!(10))
                .purchase_price(dec!(150))
                .build()
                .unwrap(),
            Holding::builder()
                .ticker("TLT")
                .sector("Government")
                .asset_class("Bond")
                .quantity(dec!(20))
                .purchase_price(dec!(100))
                .build()
                .unwrap(),
        ];
        let prices = [("AAPL".to_string(), 180.0), ("TLT".to_string(), 90.0)]
            .into_iter()
            .collect();
        (holdings, prices)
    }

    #[test]
    fn test_value_portfolio() {
        let (holdings, prices) = sample();
        let valuation = value_portfolio(&holdings, &prices).unwrap();

        assert_eq!(valuation.total_value, dec!(3600));
        assert_eq!(valuation.total_cost, dec!(3500));
        assert_eq!(valuation.total_pnl, dec!(100));
        assert_relative_eq!(valuation.total_pnl_pct, 100.0 / 35.0, epsilon = 1e-9);

        let aapl = &valuation.positions[0];
        assert_eq!(aapl.current_value, dec!(1800));
        assert_eq!(aapl.gain, dec!(300));
        assert_relative_eq!(aapl.gain_pct, 20.0, epsilon = 1e-9);
        assert_relative_eq!(aapl.weight_pct, 50.0, epsilon = 1e-9);

        let tlt = &valuation.positions[1];
        assert_eq!(tlt.gain, dec!(-200));
        assert_relative_eq!(tlt.gain_pct, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weights_sum_to_hundred() {
        let (holdings, prices) = sample();
        let valuation = value_portfolio(&holdings, &prices).unwrap();
        let total: f64 = valuation.positions.iter().map(|p| p.weight_pct).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_price() {
        let (holdings, mut prices) = sample();
        prices.remove("TLT");
        let err = value_portfolio(&holdings, &prices).unwrap_err();
        assert!(matches!(err, FolioError::DataUnavailable { ticker, .. } if ticker == "TLT"));
    }

    #[test]
    fn test_empty() {
        let err = value_portfolio(&[], &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, FolioError::EmptyPortfolio { .. }));
    }

    #[test]
    fn test_serializes_totals() {
        let (holdings, prices) = sample();
        let valuation = value_portfolio(&holdings, &prices).unwrap();
        let json = serde_json::to_value(&valuation).unwrap();
        assert_eq!(json["positions"].as_array().unwrap().len(), 2);
        assert!(json.get("total_pnl_pct").is_some());
    }
}
