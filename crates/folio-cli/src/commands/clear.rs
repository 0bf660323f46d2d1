//! Clear command implementation.

use anyhow::Result;
use clap::Args;
use folio_traits::HoldingsStore;

use crate::commands::Context;
use crate::error::CliError;
use crate::output::print_success;

/// Arguments for the clear command.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm deleting every holding
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the clear command.
pub fn execute(args: ClearArgs, ctx: &Context) -> Result<()> {
    if !args.yes {
        return Err(CliError::NotConfirmed("clear the portfolio").into());
    }
    ctx.store().clear()?;
    print_success("Portfolio cleared");
    Ok(())
}
