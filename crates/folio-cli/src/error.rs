//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A destructive command ran without confirmation.
    #[error("Refusing to {0} without --yes")]
    NotConfirmed(&'static str),

    /// Configuration error.
    #[error("Configuration error in {}: {reason}", path.display())]
    Config {
        /// Offending file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
