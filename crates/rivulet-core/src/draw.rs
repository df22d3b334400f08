//! `rand`-backed draw sources.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::traits::DrawSource;

/// Adapts any [`RngCore`] generator into a [`DrawSource`].
#[derive(Debug, Clone)]
pub struct RngDraws<R> {
    rng: R,
}

impl<R: RngCore> RngDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngDraws<StdRng> {
    /// Reproducible draws: the same seed always yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Draws seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> DrawSource for RngDraws<R> {
    fn draw_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
