//! Injectable randomness for shuffle picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform picks.
pub trait RandomSource {
    /// An index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible generator from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of picks, cycling, each taken modulo `len`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    picks: Vec<usize>,
    pos: usize,
}

impl ScriptedRandom {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, pos: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let v = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        v % len
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}
