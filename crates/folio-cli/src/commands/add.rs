//! Add command implementation.

use anyhow::Result;
use clap::Args;
use folio_core::Holding;
use folio_traits::HoldingsStore;
use rust_decimal::Decimal;

use crate::commands::{cents, Context};
use crate::output::print_success;

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Ticker symbol (stored upper-case)
    #[arg(short, long)]
    pub ticker: String,

    /// Sector label, e.g. Technology
    #[arg(short, long)]
    pub sector: Option<String>,

    /// Asset class, e.g. Equity or Bond
    #[arg(short = 'c', long = "class", alias = "asset-class")]
    pub asset_class: Option<String>,

    /// Number of units bought
    #[arg(short, long)]
    pub quantity: Decimal,

    /// Price paid per unit
    #[arg(short, long)]
    pub price: Decimal,
}

/// Execute the add command.
pub fn execute(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut builder = Holding::builder()
        .ticker(args.ticker)
        .quantity(args.quantity)
        .purchase_price(args.price);
    if let Some(sector) = args.sector {
        builder = builder.sector(sector);
    }
    if let Some(class) = args.asset_class {
        builder = builder.asset_class(class);
    }
    let holding = builder.build()?;

    let message = format!(
        "Added {} {} @ {} (transaction value {})",
        holding.quantity(),
        holding.ticker(),
        holding.purchase_price(),
        cents(holding.transaction_value())
    );
    ctx.store().add(holding)?;
    print_success(&message);
    Ok(())
}
