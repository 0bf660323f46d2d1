//! Compare command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use folio_core::Period;
use folio_risk::{compare_with_benchmark, BenchmarkComparison, DEFAULT_BENCHMARK};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output, print_single, print_warning, KeyValue};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Benchmark ticker
    #[arg(short, long, default_value = DEFAULT_BENCHMARK)]
    pub benchmark: String,

    /// Period to compare, e.g. 6mo, 1y, 2y
    #[arg(short, long, default_value = "1y")]
    pub period: Period,

    /// Also print both rebased series
    #[arg(long)]
    pub daily: bool,
}

/// Both series on one date.
#[derive(Debug, Serialize, Tabled)]
pub struct ComparisonLine {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Portfolio", display_with = "four_decimals")]
    pub portfolio: f64,
    #[tabled(rename = "Benchmark", display_with = "four_decimals")]
    pub benchmark: f64,
}

fn four_decimals(value: &f64) -> String {
    format!("{value:.4}")
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings()?;
    if holdings.is_empty() {
        print_warning("Portfolio is empty");
        return Ok(());
    }

    let gateway = ctx.gateway()?;
    let comparison = compare_with_benchmark(&holdings, &gateway, &args.benchmark, args.period)?;

    match ctx.format {
        OutputFormat::Json => print_single(&comparison, ctx.format),
        OutputFormat::Csv => print_output(&lines(&comparison), ctx.format),
        OutputFormat::Table => {
            print_header(&format!(
                "Portfolio vs {} ({})",
                comparison.benchmark, args.period
            ));
            let overview = vec![
                KeyValue::from_percent("Portfolio return", comparison.portfolio_return),
                KeyValue::from_percent(
                    format!("{} return", comparison.benchmark),
                    comparison.benchmark_return,
                ),
                KeyValue::from_percent("Excess return", comparison.excess_return),
                KeyValue::new("Common dates", comparison.rows.len().to_string()),
            ];
            print_output(&overview, ctx.format)?;
            if args.daily {
                print_header("Rebased Series");
                print_output(&lines(&comparison), ctx.format)?;
            }
            Ok(())
        }
    }
}

fn lines(comparison: &BenchmarkComparison) -> Vec<ComparisonLine> {
    comparison
        .rows
        .iter()
        .map(|r| ComparisonLine {
            date: r.date.to_string(),
            portfolio: r.portfolio,
            benchmark: r.benchmark,
        })
        .collect()
}
