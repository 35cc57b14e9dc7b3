//! The injectable Random Source.
//!
//! Every probabilistic rule in the action and tick processors reads its
//! draws from a [`RandomSource`]. Production code uses [`ThreadRandom`];
//! reproducible runs use [`SeededRandom`]; branch-exact tests use
//! [`ScriptedRandom`], which replays an explicit queue of draws.

use std::collections::VecDeque;

use rand::rngs::{SmallRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Return the next draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Return `true` with probability `p`.
    ///
    /// Probabilities at or below zero never fire and never consume a draw.
    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        self.next_f64() < p
    }

    /// Pick an index in `0..len` from one draw. Returns `None` for `len == 0`.
    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = (self.next_f64() * len as f64) as usize;
        Some(idx.min(len.saturating_sub(1)))
    }
}

/// System-provided generator backed by the thread-local RNG.
#[derive(Debug, Clone)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    /// Create a generator bound to the current thread's RNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Deterministic generator seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    /// Create a generator from a seed. The same seed replays the same draws.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed queue of draws, then returns `fallback` forever.
///
/// With a high fallback (e.g. `0.99`) every low-probability roll misses,
/// which keeps tick tests free of spontaneous events.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

impl ScriptedRandom {
    /// Create a source that yields `draws` in order, then `fallback`.
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
            consumed: 0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }

    /// Number of draws taken so far, scripted or fallback.
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of scripted draws not yet taken.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.consumed = self.consumed.saturating_add(1);
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
