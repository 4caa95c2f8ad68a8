//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ph_agent::AgentStoreBuilder;
//!
//! let (store, rngs) = AgentStoreBuilder::new(3, /*seed=*/ 42)
//!     .spawn_health(200.0)
//!     .build();
//!
//! assert_eq!(store.count, 3);
//! assert_eq!(rngs.len(), 3);
//! assert_eq!(store.health[0], 200.0);
//! ```

use ph_core::{AgentId, RandomSource};

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Every creature spawns awake with eyes blinking, `spawn_health` hit points,
/// the hound interpenetration collision group, and a strafe direction drawn
/// from its own RNG.
pub struct AgentStoreBuilder {
    count:  usize,
    seed:   u64,
    health: f32,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, health: 200.0 }
    }

    /// Starting health for every agent.
    pub fn spawn_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let mut store = AgentStore::new(self.count);
        let mut rngs = AgentRngs::new(self.count, self.seed);

        for i in 0..self.count {
            store.health[i] = self.health;
            store.loop_clockwise[i] = rngs.get_mut(AgentId(i as u32)).random_int(0, 1) == 1;
        }

        (store, rngs)
    }
}
