//! View command implementation.
//!
//! Values every holding at its latest close.

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tabled::Tabled;

use folio_portfolio::{PortfolioValuation, PositionValuation};

use crate::cli::OutputFormat;
use crate::commands::{cents, Context};
use crate::output::{format_money, print_header, print_output, print_single, print_warning};

/// One row of the holdings table.
#[derive(Debug, Serialize, Tabled)]
pub struct PositionRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Sector")]
    pub sector: String,
    #[tabled(rename = "Class")]
    pub asset_class: String,
    #[tabled(rename = "Quantity")]
    pub quantity: String,
    #[tabled(rename = "Purchase")]
    pub purchase_price: String,
    #[tabled(rename = "Cost")]
    pub transaction_value: String,
    #[tabled(rename = "Price")]
    pub current_price: String,
    #[tabled(rename = "Value")]
    pub current_value: String,
    #[tabled(rename = "Gain")]
    pub gain: String,
    #[tabled(rename = "Gain %")]
    pub gain_pct: String,
    #[tabled(rename = "Weight %")]
    pub weight_pct: String,
}

impl From<&PositionValuation> for PositionRow {
    fn from(p: &PositionValuation) -> Self {
        Self {
            ticker: p.ticker.clone(),
            sector: p.sector.clone(),
            asset_class: p.asset_class.clone(),
            quantity: p.quantity.normalize().to_string(),
            purchase_price: cents(p.purchase_price),
            transaction_value: cents(p.transaction_value),
            current_price: cents(p.current_price),
            current_value: cents(p.current_value),
            gain: cents(p.gain),
            gain_pct: format!("{:.2}", p.gain_pct),
            weight_pct: format!("{:.2}", p.weight_pct),
        }
    }
}

/// Execute the view command.
pub fn execute(ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings()?;
    if holdings.is_empty() {
        print_warning("Portfolio is empty");
        return Ok(());
    }
    let valuation = ctx.valuation(&holdings)?;

    match ctx.format {
        OutputFormat::Json => print_single(&valuation, ctx.format),
        OutputFormat::Csv => {
            let rows: Vec<PositionRow> = valuation.positions.iter().map(PositionRow::from).collect();
            print_output(&rows, ctx.format)
        }
        OutputFormat::Table => {
            print_header("Portfolio");
            let rows: Vec<PositionRow> = valuation.positions.iter().map(PositionRow::from).collect();
            print_output(&rows, ctx.format)?;
            print_totals(&valuation);
            Ok(())
        }
    }
}

fn print_totals(valuation: &PortfolioValuation) {
    let total = valuation.total_value.to_f64().unwrap_or_default();
    let pnl = valuation.total_pnl.to_f64().unwrap_or_default();
    println!();
    println!("Total portfolio value: {}", format_money(total, 2));
    println!(
        "Total PnL: {} ({:.2}%)",
        format_money(pnl, 2),
        valuation.total_pnl_pct
    );
}
