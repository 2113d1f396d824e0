//! Random-in-range source for respawn positions
//!
//! The simulation only ever asks for `uniform(lo, hi)`. Hosts pick the
//! source: seeded PCG for reproducible runs, anything scripted for tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform float in `[lo, hi)`
pub trait Uniform {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;
}

/// Seeded PCG source
#[derive(Debug, Clone)]
pub struct PcgUniform {
    seed: u64,
    rng: Pcg32,
}

impl PcgUniform {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Uniform for PcgUniform {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        let t: f32 = self.rng.random();
        lo + t * (hi - lo)
    }
}
