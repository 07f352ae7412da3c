//! Injectable randomness
//!
//! Every simulated quantity (confidence values, weather perturbations,
//! price offsets) is drawn through [`RandomSource`], so a caller decides
//! whether a request is reproducible.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform draws
pub trait RandomSource {
    /// Draw a value from the half-open range `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Adapter turning any `rand` generator into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Deterministic source for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low < high {
            self.0.gen_range(low..high)
        } else {
            low
        }
    }
}

/// Replays a fixed script of unit fractions
///
/// Each fraction `f` in `[0, 1]` maps to `low + f * (high - low)`. Once the
/// script runs out every draw returns the midpoint of its range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    fractions: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(fractions: impl IntoIterator<Item = f64>) -> Self {
        Self {
            fractions: fractions.into_iter().collect(),
        }
    }

    /// Number of scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.fractions.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let fraction = self.fractions.pop_front().unwrap_or(0.5);
        low + fraction * (high - low)
    }
}
