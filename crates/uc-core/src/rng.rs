//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from its [`ModelId`].  The run
//! loop passes it by `&mut` into every event it executes, so the sequence of
//! draws is fixed by the order in which events are *processed* (not the
//! order in which they were scheduled).  Nothing in the simulation may reach
//! for a thread-local or OS-seeded generator.
//!
//! [`ModelId`]: crate::ModelId

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The single random stream of one simulation run.
///
/// Not `Clone`: duplicating the stream would let two call sites draw the
/// same numbers.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// A uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }

    /// Bernoulli draw: `true` when `uniform() < p`.
    ///
    /// `p <= 0` never succeeds and `p >= 1` always does.
    #[inline]
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}
