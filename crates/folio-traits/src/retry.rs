//! Retrying decorator for market data gateways.
//!
//! Network failures are retried at the gateway layer, never inside the
//! engine. A call either eventually returns fresh data or fails with the
//! last error; stale data is never substituted.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use crate::market_data::{MarketDataGateway, SourceType};
use folio_core::{Period, PriceSeries};

/// Configuration for retry logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first call.
    pub max_attempts: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Add random jitter to delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A config that performs a single attempt.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Calculates the delay before retry number `attempt` (0-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = base_delay.min(self.max_delay.as_millis() as f64);

        let final_delay_ms = if self.jitter {
            // Add up to 25% jitter
            delay_ms * (1.0 + rand::random::<f64>() * 0.25)
        } else {
            delay_ms
        };

        Duration::from_millis(final_delay_ms as u64)
    }

    /// Runs `f` until it succeeds, fails with a non-transient error, or the
    /// attempt budget is spent.
    pub fn execute<T, F>(&self, what: &str, mut f: F) -> Result<T, TraitError>
    where
        F: FnMut() -> Result<T, TraitError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match f() {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if !e.is_transient() || attempt >= max_attempts {
                        if e.is_transient() {
                            tracing::warn!(
                                what,
                                attempt,
                                max_attempts,
                                error = %e,
                                "All retry attempts exhausted"
                            );
                        }
                        return Err(e);
                    }

                    let delay = self.delay_for_attempt(attempt - 1);
                    tracing::debug!(
                        what,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying after delay"
                    );
                    std::thread::sleep(delay);
                }
            }
        }
    }
}

/// Gateway wrapper that retries transient failures of the inner gateway.
#[derive(Debug, Clone)]
pub struct RetryingGateway<G> {
    inner: G,
    config: RetryConfig,
}

impl<G: MarketDataGateway> RetryingGateway<G> {
    /// Wraps `inner` with the given retry policy.
    pub fn new(inner: G, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// The wrapped gateway.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: MarketDataGateway> MarketDataGateway for RetryingGateway<G> {
    fn source_type(&self) -> SourceType {
        self.inner.source_type()
    }

    fn get_history(&self, ticker: &str, period: Period) -> Result<PriceSeries, TraitError> {
        self.config
            .execute(&format!("history {ticker} {period}"), || {
                self.inner.get_history(ticker, period)
            })
    }

    fn get_latest_price(&self, ticker: &str) -> Result<f64, TraitError> {
        self.config
            .execute(&format!("latest price {ticker}"), || {
                self.inner.get_latest_price(ticker)
            })
    }
}
