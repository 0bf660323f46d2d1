//! Classification breakdown of a valued portfolio.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use folio_core::FolioError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::valuation::{percent, PortfolioValuation, PositionValuation};

/// Label used to group positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakdownKey {
    /// Group by sector.
    Sector,
    /// Group by asset class.
    AssetClass,
}

impl BreakdownKey {
    /// Column heading for this key.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Sector => "Sector",
            Self::AssetClass => "Asset Class",
        }
    }

    fn label<'a>(&self, position: &'a PositionValuation) -> &'a str {
        match self {
            Self::Sector => &position.sector,
            Self::AssetClass => &position.asset_class,
        }
    }
}

impl fmt::Display for BreakdownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sector => write!(f, "sector"),
            Self::AssetClass => write!(f, "asset-class"),
        }
    }
}

impl FromStr for BreakdownKey {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sector" => Ok(Self::Sector),
            "asset-class" | "asset_class" | "class" => Ok(Self::AssetClass),
            other => Err(FolioError::invalid_parameter(
                "breakdown",
                format!("unknown key '{other}', expected sector or asset-class"),
            )),
        }
    }
}

/// Aggregated value of one classification bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    /// Sector or asset class label.
    pub key: String,
    /// Number of positions in the bucket.
    pub count: usize,
    /// Total current value.
    pub current_value: Decimal,
    /// Share of portfolio value, in percent (0-100).
    pub weight_pct: f64,
}

/// Groups the positions of `valuation` by `key`, sorted by label.
#[must_use]
pub fn breakdown(valuation: &PortfolioValuation, key: BreakdownKey) -> Vec<BucketSummary> {
    let mut buckets: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for position in &valuation.positions {
        let entry = buckets.entry(key.label(position)).or_default();
        entry.0 += 1;
        entry.1 += position.current_value;
    }

    buckets
        .into_iter()
        .map(|(label, (count, current_value))| BucketSummary {
            key: label.to_string(),
            count,
            current_value,
            weight_pct: percent(current_value, valuation.total_value),
        })
        .collect()
}
