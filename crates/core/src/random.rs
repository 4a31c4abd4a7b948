//! Deterministic seeded random number generator.
//!
//! Uses xorshift32. Enemy placement and fire jitter draw from it, so the same
//! seed and the same inputs replay the same game.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Deterministic seeded random number generator using xorshift32 algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Creates a new RNG with the given seed.
    /// Seed of 0 is treated as 1 to avoid degenerate sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Returns the raw u32 value from the RNG.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a random integer in `min..=max`. Swapped bounds are reordered.
    pub fn next_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi as i64 - lo as i64 + 1) as u64;
        let offset = (self.next_u32() as u64 * span) >> 32;
        (lo as i64 + offset as i64) as i32
    }

    /// Returns a value in `[-amplitude, amplitude]` in steps of 0.01.
    pub fn jitter(&mut self, amplitude: f32) -> f32 {
        let steps = (amplitude.abs() * 100.0).round() as i32;
        self.next_inclusive(-steps, steps) as f32 / 100.0
    }

    /// Returns the current internal state (for serialization/debugging).
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}
