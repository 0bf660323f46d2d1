//! Delete command implementation.

use anyhow::Result;
use clap::Args;
use folio_traits::HoldingsStore;

use crate::commands::Context;
use crate::output::{print_success, print_warning};

/// Arguments for the delete command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Ticker whose holdings are removed (case-insensitive)
    pub ticker: String,
}

/// Execute the delete command.
pub fn execute(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let removed = ctx.store().delete_ticker(&args.ticker)?;
    let ticker = args.ticker.trim().to_uppercase();
    if removed == 0 {
        print_warning(&format!("No holdings with ticker '{ticker}'"));
    } else {
        print_success(&format!("Deleted {removed} holding(s) with ticker '{ticker}'"));
    }
    Ok(())
}
