//! Summary command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use folio_portfolio::{breakdown, BreakdownKey};

use crate::cli::OutputFormat;
use crate::commands::{cents, Context};
use crate::output::{print_header, print_output, print_warning};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Classification to group by: sector or asset-class
    #[arg(short, long, default_value = "sector")]
    pub by: BreakdownKey,
}

/// One bucket of the breakdown.
#[derive(Debug, Serialize, Tabled)]
pub struct BucketRow {
    #[tabled(rename = "Bucket")]
    pub key: String,
    #[tabled(rename = "Holdings")]
    pub count: usize,
    #[tabled(rename = "Value")]
    pub current_value: String,
    #[tabled(rename = "Weight %")]
    pub weight_pct: String,
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings()?;
    if holdings.is_empty() {
        print_warning("Portfolio is empty");
        return Ok(());
    }
    let valuation = ctx.valuation(&holdings)?;
    let rows: Vec<BucketRow> = breakdown(&valuation, args.by)
        .into_iter()
        .map(|b| BucketRow {
            key: b.key,
            count: b.count,
            current_value: cents(b.current_value),
            weight_pct: format!("{:.2}", b.weight_pct),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header(&format!("Portfolio breakdown by {}", args.by.heading().to_lowercase()));
    }
    print_output(&rows, ctx.format)
}
