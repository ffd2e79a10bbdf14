//! Variability sources injected into the stochastic generation models.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform random draws in `[0, 1)`.
///
/// Generation models and the synthetic compute-time figures draw all of their
/// randomness through this trait so tests can pin it.
pub trait Variability {
    /// Returns the next uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Seeded pseudo-random variability backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededVariability {
    rng: StdRng,
}

impl SeededVariability {
    /// Creates a source seeded from `seed`; equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Variability for SeededVariability {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Variability that always returns the same sample.
///
/// `FixedVariability(0.0)` yields the lower edge of every random band,
/// `FixedVariability(1.0)` the (exclusive) upper edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVariability(pub f64);

impl Variability for FixedVariability {
    fn unit(&mut self) -> f64 {
        self.0
    }
}

impl<V: Variability + ?Sized> Variability for &mut V {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}
