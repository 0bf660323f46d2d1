//! Risk command implementation.

use anyhow::Result;
use clap::Args;
use rust_decimal::prelude::ToPrimitive;

use folio_core::Period;
use folio_risk::{calculate_risk_metrics, RiskReport};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{
    format_money, format_percent, print_header, print_output, print_single, print_warning,
    KeyValue,
};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Look-back period, e.g. 6mo, 1y
    #[arg(short, long)]
    pub period: Option<Period>,

    /// Annual risk-free rate for the Sharpe ratio, e.g. 0.02
    #[arg(short, long)]
    pub risk_free_rate: Option<f64>,
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings()?;
    if holdings.is_empty() {
        print_warning("Portfolio is empty");
        return Ok(());
    }

    let mut config = ctx.config.risk.clone();
    if let Some(period) = args.period {
        config = config.with_period(period);
    }
    if let Some(rate) = args.risk_free_rate {
        config = config.with_risk_free_rate(rate);
    }

    let gateway = ctx.gateway()?;
    let report = calculate_risk_metrics(&holdings, &gateway, &config)?;

    match ctx.format {
        OutputFormat::Json | OutputFormat::Csv => print_single(&report, ctx.format),
        OutputFormat::Table => {
            let cost: f64 = holdings
                .iter()
                .map(|h| h.transaction_value().to_f64().unwrap_or_default())
                .sum();
            print_header(&format!("Risk Metrics ({})", config.period));
            print_output(&metric_rows(&report, cost), ctx.format)
        }
    }
}

/// Table rows; the VaR amount scales the index by the cost basis.
fn metric_rows(report: &RiskReport, cost_basis: f64) -> Vec<KeyValue> {
    vec![
        KeyValue::from_percent("Annualized Volatility", report.annualized_volatility),
        KeyValue::from_percent("Annualized Return", report.annualized_return),
        KeyValue::new("Sharpe Ratio", format!("{:.2}", report.sharpe_ratio)),
        KeyValue::from_percent("Value-at-Risk (95%, 1d)", report.value_at_risk_95),
        KeyValue::new(
            "Value-at-Risk amount",
            format_money(report.value_at_risk_95 * cost_basis, 0),
        ),
        KeyValue::from_percent("Risk-free Rate", report.risk_free_rate),
        KeyValue::new("Observations", report.observations.to_string()),
    ]
}
