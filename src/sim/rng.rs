//! Random source used by block generation and effects
//!
//! The simulation only ever asks for uniform ranges and unit-sphere points,
//! so anything implementing [`RandomSource`] can drive it (tests use scripted
//! sources to force exact layouts).

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform-range random numbers
pub trait RandomSource {
    /// Float in `[min, max]`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Integer in `[min, max_exclusive)`. Returns `min` when the range is empty.
    fn uniform_int(&mut self, min: i32, max_exclusive: i32) -> i32;

    /// Uniformly distributed point on the unit sphere
    fn on_unit_sphere(&mut self) -> Vec3 {
        let z = self.uniform(-1.0, 1.0);
        let theta = self.uniform(0.0, std::f32::consts::TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * theta.cos(), r * theta.sin(), z)
    }
}

/// Seed a PCG stream for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

impl RandomSource for Pcg32 {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) {
            return min;
        }
        self.random_range(min..=max)
    }

    fn uniform_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.random_range(min..max_exclusive)
    }
}

/// Deterministic source for tests: every float lands at `t` through its range
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct FixedRng {
    pub t: f32,
    pub int: i32,
}

#[cfg(test)]
impl RandomSource for FixedRng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) {
            return min;
        }
        min + (max - min) * self.t
    }

    fn uniform_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        self.int.clamp(min, (max_exclusive - 1).max(min))
    }
}
