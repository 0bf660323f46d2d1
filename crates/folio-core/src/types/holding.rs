//! Portfolio holding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};

/// Label used when a holding has no sector or asset class.
pub const UNCLASSIFIED: &str = "Unclassified";

/// A single purchase lot in a portfolio.
///
/// Holdings are validated on construction and immutable afterwards.
/// Several holdings may share a ticker; analytics combine them by ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHolding")]
pub struct Holding {
    ticker: String,
    sector: String,
    asset_class: String,
    quantity: Decimal,
    purchase_price: Decimal,
}

/// Unvalidated wire form of a [`Holding`].
#[derive(Deserialize)]
struct RawHolding {
    ticker: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    asset_class: Option<String>,
    quantity: Decimal,
    purchase_price: Decimal,
}

impl TryFrom<RawHolding> for Holding {
    type Error = FolioError;

    fn try_from(raw: RawHolding) -> FolioResult<Self> {
        let mut builder = HoldingBuilder::new()
            .ticker(raw.ticker)
            .quantity(raw.quantity)
            .purchase_price(raw.purchase_price);
        if let Some(sector) = raw.sector {
            builder = builder.sector(sector);
        }
        if let Some(asset_class) = raw.asset_class {
            builder = builder.asset_class(asset_class);
        }
        builder.build()
    }
}

impl Holding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Creates an unclassified holding.
    pub fn new(
        ticker: impl Into<String>,
        quantity: Decimal,
        purchase_price: Decimal,
    ) -> FolioResult<Self> {
        HoldingBuilder::new()
            .ticker(ticker)
            .quantity(quantity)
            .purchase_price(purchase_price)
            .build()
    }

    /// Upper-case ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Sector label.
    #[must_use]
    pub fn sector(&self) -> &str {
        &self.sector
    }

    /// Asset class label (e.g. Equity, Bond).
    #[must_use]
    pub fn asset_class(&self) -> &str {
        &self.asset_class
    }

    /// Number of units held.
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Price paid per unit.
    #[must_use]
    pub fn purchase_price(&self) -> Decimal {
        self.purchase_price
    }

    /// Cost basis: quantity × purchase price.
    #[must_use]
    pub fn transaction_value(&self) -> Decimal {
        self.quantity * self.purchase_price
    }

    /// Quantity as `f64` for statistical work.
    #[must_use]
    pub fn quantity_f64(&self) -> f64 {
        self.quantity.to_f64().unwrap_or_default()
    }

    /// Cost basis as `f64` for statistical work.
    #[must_use]
    pub fn transaction_value_f64(&self) -> f64 {
        self.transaction_value().to_f64().unwrap_or_default()
    }
}

/// Builder for constructing a [`Holding`].
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    ticker: Option<String>,
    sector: Option<String>,
    asset_class: Option<String>,
    quantity: Option<Decimal>,
    purchase_price: Option<Decimal>,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ticker symbol. Stored trimmed and upper-cased.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Sets the sector label.
    #[must_use]
    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the asset class label.
    #[must_use]
    pub fn asset_class(mut self, asset_class: impl Into<String>) -> Self {
        self.asset_class = Some(asset_class.into());
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the purchase price per unit.
    #[must_use]
    pub fn purchase_price(mut self, price: Decimal) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// Builds the holding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a field is missing, the ticker is
    /// blank, quantity / purchase price are not positive, or their product
    /// does not fit in a `Decimal`.
    pub fn build(self) -> FolioResult<Holding> {
        let ticker = normalize_ticker(
            &self
                .ticker
                .ok_or_else(|| FolioError::invalid_parameter("ticker", "missing"))?,
        )?;

        let quantity = self
            .quantity
            .ok_or_else(|| FolioError::invalid_parameter("quantity", "missing"))?;
        if quantity <= Decimal::ZERO {
            return Err(FolioError::invalid_parameter(
                "quantity",
                format!("{ticker}: quantity must be positive, got {quantity}"),
            ));
        }

        let purchase_price = self
            .purchase_price
            .ok_or_else(|| FolioError::invalid_parameter("purchase_price", "missing"))?;
        if purchase_price <= Decimal::ZERO {
            return Err(FolioError::invalid_parameter(
                "purchase_price",
                format!("{ticker}: purchase price must be positive, got {purchase_price}"),
            ));
        }

        if quantity.checked_mul(purchase_price).is_none() {
            return Err(FolioError::invalid_parameter(
                "transaction_value",
                format!("{ticker}: {quantity} x {purchase_price} is out of range"),
            ));
        }

        Ok(Holding {
            ticker,
            sector: label_or_default(self.sector),
            asset_class: label_or_default(self.asset_class),
            quantity,
            purchase_price,
        })
    }
}

fn label_or_default(label: Option<String>) -> String {
    match label {
        Some(l) if !l.trim().is_empty() => l.trim().to_string(),
        _ => UNCLASSIFIED.to_string(),
    }
}

/// Trims and upper-cases a ticker symbol.
///
/// # Errors
///
/// Returns `InvalidParameter` for a blank ticker.
pub fn normalize_ticker(ticker: &str) -> FolioResult<String> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(FolioError::invalid_parameter("ticker", "must not be blank"));
    }
    Ok(ticker.to_uppercase())
}
