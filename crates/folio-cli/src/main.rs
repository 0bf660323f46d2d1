//! Folio CLI - portfolio tracking, projection and risk analytics.
//!
//! # Usage
//!
//! ```bash
//! # Record a purchase
//! folio add --ticker AAPL --sector Technology --class Equity --quantity 10 --price 150
//!
//! # Current value, PnL and weights
//! folio view
//! folio summary --by asset-class
//!
//! # Five-year Monte Carlo projection
//! folio simulate --years 5 --runs 500 --seed 42
//!
//! # Historical risk and benchmark comparison
//! folio risk --period 1y --risk-free-rate 0.02
//! folio compare --benchmark SPY --period 1y
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::CliConfig;
use output::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so table, JSON and CSV output stay clean.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info,folio_cli=debug,folio_portfolio=debug,folio_simulation=debug,folio_risk=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.holdings {
        config.holdings_path = path;
    }
    if let Some(dir) = cli.prices {
        config.prices_dir = dir;
    }
    tracing::debug!(
        holdings = %config.holdings_path.display(),
        prices = %config.prices_dir.display(),
        "Resolved paths"
    );

    let ctx = Context {
        config,
        format: cli.format,
    };

    // Execute command
    match cli.command {
        Commands::Add(args) => commands::add::execute(args, &ctx),
        Commands::View => commands::view::execute(&ctx),
        Commands::Delete(args) => commands::delete::execute(args, &ctx),
        Commands::Clear(args) => commands::clear::execute(args, &ctx),
        Commands::Summary(args) => commands::summary::execute(args, &ctx),
        Commands::History(args) => commands::history::execute(args, &ctx),
        Commands::Simulate(args) => commands::simulate::execute(args, &ctx),
        Commands::Risk(args) => commands::risk::execute(args, &ctx),
        Commands::Compare(args) => commands::compare::execute(args, &ctx),
    }
}
