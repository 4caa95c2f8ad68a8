//! Deterministic random sources.
//!
//! Decision code never touches a global generator; it takes a
//! `&mut dyn RandomSource`.  Two implementations ship here:
//!
//! - [`AgentRng`]: per-agent `SmallRng` seeded by
//!   `global_seed XOR (agent_id * MIXING_CONSTANT)`.
//! - [`ScriptedRng`]: replays queued values, for tests that must force a
//!   particular coin flip.
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space, so
//! agents never share RNG state and adding agents at the end of the list
//! does not disturb the seeds of existing ones.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// Uniform random draws used by schedule selection, tasks, and attacks.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]` (inclusive).
    fn random_int(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform float in `[lo, hi)`.
    fn random_float(&mut self, lo: f32, hi: f32) -> f32;
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per agent at simulation init; store it in the parallel
/// `AgentRngs` array alongside the other SoA arrays.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl RandomSource for AgentRng {
    #[inline]
    fn random_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    #[inline]
    fn random_float(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..hi)
    }
}

// ── ScriptedRng ───────────────────────────────────────────────────────────────

/// A [`RandomSource`] that replays pre-queued values.
///
/// Queued integers are clamped into the requested range.  Once a queue runs
/// dry the source returns `lo`.  Every draw is counted so tests can assert
/// how many times a decision consumed entropy.
#[derive(Default, Debug)]
pub struct ScriptedRng {
    ints:   VecDeque<i32>,
    floats: VecDeque<f32>,
    draws:  usize,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue integer results, consumed in order.
    pub fn with_ints(mut self, ints: impl IntoIterator<Item = i32>) -> Self {
        self.ints.extend(ints);
        self
    }

    /// Queue float results, consumed in order.
    pub fn with_floats(mut self, floats: impl IntoIterator<Item = f32>) -> Self {
        self.floats.extend(floats);
        self
    }

    /// Total draws (integer and float) made so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRng {
    fn random_int(&mut self, lo: i32, hi: i32) -> i32 {
        self.draws += 1;
        self.ints.pop_front().map_or(lo, |v| v.clamp(lo, hi.max(lo)))
    }

    fn random_float(&mut self, lo: f32, hi: f32) -> f32 {
        self.draws += 1;
        self.floats.pop_front().map_or(lo, |v| v.clamp(lo, hi.max(lo)))
    }
}
