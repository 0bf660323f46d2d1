//! Injectable random streams for Monte Carlo work.
//!
//! A [`RandomSource`] hands out an independent generator for every
//! `(run, asset)` pair. Because each stream is derived only from the base
//! seed and the pair itself, results do not depend on evaluation order, so
//! sequential and parallel ensembles are identical under the same seed.
//!
//! Assets are addressed by [`ticker_key`], so a ticker's draws stay the same
//! when other tickers are added to or removed from the portfolio.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of per-`(run, asset)` random streams.
pub trait RandomSource: Send + Sync {
    /// Generator type handed out for each stream.
    type Rng: RngCore;

    /// Returns the generator for one asset within one ensemble member.
    ///
    /// `asset` is a stable key for the asset, normally [`ticker_key`].
    fn stream(&self, run: u64, asset: u64) -> Self::Rng;
}

/// ChaCha8-backed source derived from a single base seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededSource {
    seed: u64,
}

impl SeededSource {
    /// Creates a reproducible source.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Creates a source with a fresh base seed from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Base seed of this source.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    type Rng = ChaCha8Rng;

    fn stream(&self, run: u64, asset: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(stream_seed(self.seed, run, asset))
    }
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Mixes a base seed with a `(run, asset)` pair into a stream seed.
#[must_use]
pub fn stream_seed(seed: u64, run: u64, asset: u64) -> u64 {
    let per_run = splitmix64(seed ^ splitmix64(run));
    splitmix64(per_run ^ asset.wrapping_mul(GOLDEN_GAMMA))
}

const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Stable 64-bit key for a ticker symbol (FNV-1a over its bytes).
///
/// Independent of process, platform and portfolio composition.
#[must_use]
pub fn ticker_key(ticker: &str) -> u64 {
    ticker.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}
