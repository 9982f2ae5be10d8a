use crate::utils::error::{DistributeError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic, seed-reproducible permutation of a roster.
///
/// The same seed applied to the same input order always yields the same
/// output order. Randomness quality is not a goal here, reproducibility is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededShuffler {
    seed: u64,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the wall clock at one-second resolution.
    ///
    /// Two runs started within the same second over the same roster order
    /// produce the same shuffle. Pass an explicit seed with [`SeededShuffler::new`]
    /// when that matters.
    pub fn from_wall_clock() -> Self {
        Self::new(chrono::Utc::now().timestamp().unsigned_abs())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a shuffled copy; the input slice is left untouched.
    pub fn shuffle<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut shuffled = items.to_vec();
        shuffled.shuffle(&mut rng);
        shuffled
    }
}

/// Shuffle entry point for callers holding optional inputs.
pub fn shuffle<T: Clone>(items: Option<&[T]>, seed: Option<u64>) -> Result<Vec<T>> {
    let items =
        items.ok_or_else(|| DistributeError::invalid_argument("people", "People list is required"))?;
    let seed = seed.ok_or_else(|| DistributeError::invalid_argument("seed", "Seed is required"))?;
    Ok(SeededShuffler::new(seed).shuffle(items))
}
