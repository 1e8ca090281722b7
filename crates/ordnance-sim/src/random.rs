//! World-scoped deterministic random source.
//!
//! Every effect draws from the one stream owned by the engine, so two runs
//! with the same seed and the same inputs make the same draws in the same
//! order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ordnance_core::types::WVec;

pub struct SharedRandom {
    rng: ChaCha8Rng,
    draws: u64,
}

impl SharedRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Uniform integer in `0..max`. A non-positive `max` yields 0 without drawing.
    pub fn next(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.draws += 1;
        self.rng.gen_range(0..max)
    }

    /// Uniform integer in `low..high`. An empty range yields `low` without drawing.
    pub fn next_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.draws += 1;
        self.rng.gen_range(low..high)
    }

    /// Horizontal offset with each axis the mean of `samples` draws in `-1024..1024`.
    ///
    /// More samples concentrate the distribution toward the center.
    pub fn pdf_offset(&mut self, samples: i32) -> WVec {
        let samples = samples.max(1);
        let mut axis = || (0..samples).map(|_| self.next_range(-1024, 1024)).sum::<i32>() / samples;
        let x = axis();
        let y = axis();
        WVec::new(x, y, 0)
    }

    /// Total draws taken from the stream so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
