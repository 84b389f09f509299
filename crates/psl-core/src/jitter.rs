//! Injectable randomness for the detection-quality criterion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of jitter samples in `[0, 1)`.
pub trait JitterSource {
    fn sample(&mut self) -> f32;
}

/// Always returns 0; makes the whole pipeline deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self) -> f32 {
        0.0
    }
}

/// Jitter drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomJitter<R> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn sample(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}
