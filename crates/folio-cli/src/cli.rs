//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{
    AddArgs, ClearArgs, CompareArgs, DeleteArgs, HistoryArgs, RiskArgs, SimulateArgs,
    SummaryArgs,
};

/// Folio - Portfolio tracking, Monte Carlo projection and risk analytics
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Holdings file (overrides the config file)
    #[arg(long, env = "FOLIO_HOLDINGS", global = true)]
    pub holdings: Option<PathBuf>,

    /// Directory of `<TICKER>.csv` close histories (overrides the config file)
    #[arg(long, env = "FOLIO_PRICES", global = true)]
    pub prices: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, env = "FOLIO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Add a holding to the portfolio
    Add(AddArgs),

    /// Show every holding with current value and PnL
    View,

    /// Delete all holdings of a ticker
    Delete(DeleteArgs),

    /// Delete the entire portfolio
    Clear(ClearArgs),

    /// Show total value and weights by sector or asset class
    Summary(SummaryArgs),

    /// Show historical closing prices
    History(HistoryArgs),

    /// Run a Monte Carlo projection of portfolio value
    Simulate(SimulateArgs),

    /// Show risk metrics: volatility, Sharpe ratio, VaR
    Risk(RiskArgs),

    /// Compare the portfolio with a benchmark ticker
    Compare(CompareArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
