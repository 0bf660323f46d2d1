//! CLI configuration file.
//!
//! Looked up in order: `--config` / `$FOLIO_CONFIG`, then
//! `<config dir>/folio/config.toml`. A missing default file means
//! defaults; a missing explicit file is an error.
//!
//! ```toml
//! holdings_path = "data/portfolio.json"
//! prices_dir = "data/prices"
//! retry_attempts = 3
//!
//! [simulation]
//! years = 5
//! n_simulations = 500
//! history_period = "5y"
//!
//! [risk]
//! risk_free_rate = 0.02
//! period = "1y"
//! ```

use std::path::{Path, PathBuf};

use folio_ext_file::DEFAULT_HOLDINGS_PATH;
use folio_risk::RiskConfig;
use folio_simulation::SimulationConfig;
use folio_traits::RetryConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Default directory of price files.
pub const DEFAULT_PRICES_DIR: &str = "data/prices";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON holdings file.
    pub holdings_path: PathBuf,
    /// Directory of `<TICKER>.csv` close histories.
    pub prices_dir: PathBuf,
    /// Attempts per market data read, including the first.
    pub retry_attempts: u32,
    /// Projection defaults.
    pub simulation: SimulationConfig,
    /// Risk metric defaults.
    pub risk: RiskConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            holdings_path: PathBuf::from(DEFAULT_HOLDINGS_PATH),
            prices_dir: PathBuf::from(DEFAULT_PRICES_DIR),
            retry_attempts: RetryConfig::default().max_attempts,
            simulation: SimulationConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration, preferring `explicit` over the default path.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Retry policy for market data reads.
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry_attempts.max(1),
            ..RetryConfig::default()
        }
    }
}

/// `<config dir>/folio/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("folio").join("config.toml"))
}
