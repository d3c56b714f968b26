//! Deterministic random number generation for battles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical spins and intents
//! - **Context streams**: Reel spins and enemy intent rolls draw from
//!   independent sequences, so spinning more often never changes which
//!   intents the enemies pick
//!
//! ```
//! use reel_battle::core::BattleRng;
//!
//! let rng = BattleRng::new(42);
//! let mut spins = rng.for_context("reels");
//! let mut intents = rng.for_context("intents");
//!
//! let stop = spins.gen_range_usize(0..8);
//! assert!(stop < 8);
//! assert_eq!(intents.choose_weighted(&[0.0, 1.0]), Some(1));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backing reel spins and intent rolls.
#[derive(Clone, Debug)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BattleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    ///
    /// The range must not be empty.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random index with weighted probability.
    ///
    /// Weights do not need to sum to 1.0. Negative weights count as zero.
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;

        for (i, &weight) in weights.iter().enumerate() {
            let weight = weight.max(0.0);
            if weight == 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - return last non-zero weight
        weights.iter().rposition(|w| *w > 0.0)
    }
}
