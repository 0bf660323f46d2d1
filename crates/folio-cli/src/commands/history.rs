//! History command implementation.
//!
//! Prints the close history of one or more tickers, optionally rebased so
//! every series starts at 100.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use folio_core::Period;
use folio_portfolio::fetch_history;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output};

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Ticker symbols
    #[arg(required = true)]
    pub tickers: Vec<String>,

    /// Look-back period, e.g. 5d, 1mo, 6mo, 1y
    #[arg(short, long, default_value = "1mo")]
    pub period: Period,

    /// Rebase each series to 100 at its first close
    #[arg(short, long)]
    pub normalize: bool,
}

/// One close of one ticker.
#[derive(Debug, Serialize, Tabled)]
pub struct CloseRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Close", display_with = "two_decimals")]
    pub close: f64,
}

fn two_decimals(value: &f64) -> String {
    format!("{value:.2}")
}

/// Execute the history command.
pub fn execute(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let gateway = ctx.gateway()?;
    let mut rows = Vec::new();

    for ticker in &args.tickers {
        let mut series = fetch_history(ticker, &gateway, args.period)?;
        if args.normalize {
            series = series.rebased(100.0)?;
        }
        let ticker = series.ticker().to_string();
        let start = rows.len();
        rows.extend(series.points().iter().map(|p| CloseRow {
            ticker: ticker.clone(),
            date: p.date.to_string(),
            close: p.close,
        }));

        if ctx.format == OutputFormat::Table {
            let title = if args.normalize {
                format!("{ticker} normalized to 100 ({})", args.period)
            } else {
                format!("Historical prices for {ticker} ({})", args.period)
            };
            print_header(&title);
            print_output(&rows[start..], ctx.format)?;
        }
    }

    if ctx.format == OutputFormat::Table {
        return Ok(());
    }
    print_output(&rows, ctx.format)
}

