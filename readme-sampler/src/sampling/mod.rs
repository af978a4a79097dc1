//! Seeded cursor sampling over the repository listing.
//!
//! `GET /repositories?since=N` returns repositories whose ids follow `N`.
//! Drawing `N` from a seeded pseudo-random sequence gives a reproducible
//! spread of listing pages across runs. This is a heuristic: ids are not
//! dense and pages vary in size, so the sample is not uniform over all
//! repositories.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator of `since` cursors for the repository listing.
#[derive(Debug, Clone)]
pub struct CursorSampler {
    rng: StdRng,
    upper_bound: u64,
}

impl CursorSampler {
    /// Creates a sampler drawing from `0..upper_bound` with a fixed seed.
    ///
    /// An `upper_bound` of zero is treated as one, so the only cursor is zero.
    #[must_use]
    pub fn new(seed: u64, upper_bound: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            upper_bound: upper_bound.max(1),
        }
    }

    /// Draws the next cursor.
    pub fn next_since(&mut self) -> u64 {
        self.rng.gen_range(0..self.upper_bound)
    }
}

impl Iterator for CursorSampler {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_since())
    }
}
