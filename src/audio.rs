//! Sound effect kinds and clip pools
//!
//! The simulation only says which kind of sound happened; the host owns a
//! [`SoundBank`] and plays a random clip from the matching pool.

use serde::{Deserialize, Serialize};

use crate::sim::RandomSource;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Avatar jumped
    Jump,
    /// Avatar touched a roof
    Hit,
    /// Run failed
    Fail,
}

/// Named clips per effect kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundBank {
    pub jump: Vec<String>,
    pub hit: Vec<String>,
    pub fail: Vec<String>,
}

impl SoundBank {
    pub fn pool(&self, effect: SoundEffect) -> &[String] {
        match effect {
            SoundEffect::Jump => &self.jump,
            SoundEffect::Hit => &self.hit,
            SoundEffect::Fail => &self.fail,
        }
    }

    /// Pick a clip uniformly from the effect's pool
    pub fn pick<R: RandomSource + ?Sized>(&self, effect: SoundEffect, rng: &mut R) -> Option<&str> {
        let pool = self.pool(effect);
        if pool.is_empty() {
            return None;
        }
        let idx = rng.uniform_int(0, pool.len() as i32) as usize;
        pool.get(idx).map(String::as_str)
    }
}
