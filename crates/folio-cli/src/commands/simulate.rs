//! Simulate command implementation.
//!
//! Runs a Monte Carlo projection of portfolio value and reports the final
//! mean, 10th and 90th percentile with their total and annualized returns.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use folio_core::{Period, TRADING_DAYS_PER_YEAR};
use folio_simulation::{simulate_portfolio, SimulationSummary, SummaryRow};

use crate::cli::OutputFormat;
use crate::commands::{today, Context};
use crate::output::{
    format_money, format_percent, print_header, print_info, print_output, print_single,
    print_warning, KeyValue,
};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Years to simulate (252 trading days each)
    #[arg(short, long)]
    pub years: Option<u32>,

    /// Number of simulated paths
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Seed for a reproducible projection
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// History used to estimate drift and volatility, e.g. 1y, 5y
    #[arg(long)]
    pub history: Option<Period>,

    /// Run all paths on the current thread
    #[arg(long)]
    pub sequential: bool,

    /// Print every projected day instead of yearly checkpoints
    #[arg(long)]
    pub daily: bool,
}

/// One projected day.
#[derive(Debug, Serialize, Tabled)]
pub struct ProjectionRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Mean", display_with = "whole")]
    pub mean: f64,
    #[tabled(rename = "P10", display_with = "whole")]
    pub percentile_10: f64,
    #[tabled(rename = "P90", display_with = "whole")]
    pub percentile_90: f64,
}

fn whole(value: &f64) -> String {
    format_money(*value, 0)
}

impl From<&SummaryRow> for ProjectionRow {
    fn from(row: &SummaryRow) -> Self {
        Self {
            date: row.date.to_string(),
            mean: row.mean,
            percentile_10: row.percentile_10,
            percentile_90: row.percentile_90,
        }
    }
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings()?;
    if holdings.is_empty() {
        print_warning("Portfolio is empty");
        return Ok(());
    }

    let mut config = ctx.config.simulation.clone();
    if let Some(years) = args.years {
        config = config.with_years(years);
    }
    if let Some(runs) = args.runs {
        config = config.with_simulations(runs);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(period) = args.history {
        config = config.with_history_period(period);
    }
    if args.sequential {
        config = config.with_parallel(false);
    }

    let gateway = ctx.gateway()?;
    let summary = simulate_portfolio(&holdings, &gateway, &config, today())?;

    match ctx.format {
        OutputFormat::Json => print_single(&summary, ctx.format),
        OutputFormat::Csv => print_output(&projection_rows(&summary, true), ctx.format),
        OutputFormat::Table => {
            print_table(&summary, args.daily)?;
            if args.seed.is_none() && ctx.config.simulation.seed.is_none() {
                if let Some(seed) = summary.seed {
                    print_info(&format!("Reproduce with --seed {seed}"));
                }
            }
            Ok(())
        }
    }
}

fn print_table(summary: &SimulationSummary, daily: bool) -> Result<()> {
    print_header("Monte Carlo Projection");
    let overview = vec![
        KeyValue::from_money("Current value", summary.initial_value),
        KeyValue::new(
            "Horizon",
            format!("{} trading days ({:.1}y)", summary.trading_days, summary.years()),
        ),
        KeyValue::new("Simulations", summary.n_simulations.to_string()),
    ];
    print_output(&overview, OutputFormat::Table)?;

    print_header(if daily { "Daily Bands" } else { "Yearly Checkpoints" });
    print_output(&projection_rows(summary, daily), OutputFormat::Table)?;

    print_header("Final Portfolio Value Estimates");
    let outcomes: Vec<KeyValue> = summary
        .outcomes()
        .into_iter()
        .flat_map(|o| {
            [
                KeyValue::new(o.label, format_money(o.final_value, 0)),
                KeyValue::new(
                    format!("{} return", o.label),
                    format!(
                        "{} total, {} annualized",
                        format_percent(o.total_return),
                        format_percent(o.annualized_return)
                    ),
                ),
            ]
        })
        .collect();
    print_output(&outcomes, OutputFormat::Table)
}

/// Every row, or day 0 plus one row per projected year and the last day.
fn projection_rows(summary: &SimulationSummary, daily: bool) -> Vec<ProjectionRow> {
    let last = summary.rows.len().saturating_sub(1);
    summary
        .rows
        .iter()
        .enumerate()
        .filter(|(i, _)| daily || i % TRADING_DAYS_PER_YEAR == 0 || *i == last)
        .map(|(_, row)| ProjectionRow::from(row))
        .collect()
}
