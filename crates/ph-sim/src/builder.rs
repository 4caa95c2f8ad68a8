//! Fluent builder for constructing a [`Sim`].

use ph_agent::{AgentRngs, AgentStore, SquadRegistry};
use ph_behavior::{HoundConfig, Npc};
use ph_combat::{EffectSink, NullSink};
use ph_core::{EntityId, SimConfig};
use ph_schedule::ScheduleLibrary;
use ph_spatial::{EntityIndex, Navigator, RingLosFinder, Tactical, WorldQuery};

use crate::anim::Playback;
use crate::sim::EntityMap;
use crate::sink::Pending;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<N, V>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick interval, total ticks, seed, gravity
/// - [`AgentStore`] + [`AgentRngs`] from [`ph_agent::AgentStoreBuilder`]
/// - `N: Npc`, the creature policy (e.g. [`ph_behavior::AlphaHound`])
/// - `V: Navigator` for path planning (e.g. [`ph_spatial::StraightLineNavigator`])
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                          |
/// |----------------------|----------------------------------|
/// | `.world(w)`          | `EntityIndex::empty()`           |
/// | `.squads(s)`         | No squads                        |
/// | `.library(l)`        | `ScheduleLibrary::hound_alpha()` |
/// | `.tactical(t)`       | `RingLosFinder::default()`       |
/// | `.sink(s)`           | `NullSink`                       |
/// | `.heavy_damage(d)`   | `HoundConfig::default()`         |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(3, seed).build();
/// let mut sim = SimBuilder::new(config, store, rngs, AlphaHound::default(), StraightLineNavigator)
///     .world(world)
///     .squads(squads)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<N: Npc, V: Navigator> {
    config:       SimConfig,
    agents:       AgentStore,
    rngs:         AgentRngs,
    npc:          N,
    nav:          V,
    world:        Option<EntityIndex>,
    squads:       Option<SquadRegistry>,
    library:      Option<ScheduleLibrary>,
    tactical:     Option<Box<dyn Tactical>>,
    sink:         Option<Box<dyn EffectSink>>,
    heavy_damage: Option<f32>,
}

impl<N: Npc, V: Navigator> SimBuilder<N, V> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs, npc: N, nav: V) -> Self {
        Self {
            config,
            agents,
            rngs,
            npc,
            nav,
            world:        None,
            squads:       None,
            library:      None,
            tactical:     None,
            sink:         None,
            heavy_damage: None,
        }
    }

    /// Supply the world.  Every agent linked to an entity must find it here.
    pub fn world(mut self, world: EntityIndex) -> Self {
        self.world = Some(world);
        self
    }

    /// Supply the squad registry the agents were joined through.
    pub fn squads(mut self, squads: SquadRegistry) -> Self {
        self.squads = Some(squads);
        self
    }

    pub fn library(mut self, library: ScheduleLibrary) -> Self {
        self.library = Some(library);
        self
    }

    pub fn tactical(mut self, tactical: impl Tactical + 'static) -> Self {
        self.tactical = Some(Box::new(tactical));
        self
    }

    /// Host effect sink.  Damage and knockback are applied by the sim itself
    /// as well as forwarded here.
    pub fn sink(mut self, sink: impl EffectSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Single-hit damage at or above which `HeavyDamage` is raised.
    pub fn heavy_damage(mut self, amount: f32) -> Self {
        self.heavy_damage = Some(amount);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<N, V>> {
        let agent_count = self.agents.count;

        // ── Validate ──────────────────────────────────────────────────────
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        let dt = self.config.tick_interval_secs;
        if dt.is_nan() || dt <= 0.0 {
            return Err(SimError::Config(format!("tick interval must be positive, got {dt}")));
        }

        let world = self.world.unwrap_or_else(EntityIndex::empty);

        // ── Link agents to their bodies ───────────────────────────────────
        let mut entity_agent = EntityMap::default();
        for agent in self.agents.agent_ids() {
            let e = self.agents.entity[agent.index()];
            if e == EntityId::INVALID {
                continue;
            }
            if world.entity(e).is_none() {
                return Err(SimError::Config(format!("{agent} is linked to missing entity {e}")));
            }
            if let Some(other) = entity_agent.insert(e, agent) {
                return Err(SimError::Config(format!("entity {e} is linked to both {other} and {agent}")));
            }
        }

        let heavy_damage = self
            .heavy_damage
            .unwrap_or_else(|| HoundConfig::default().heavy_damage);

        Ok(Sim {
            clock:        self.config.make_clock(),
            config:       self.config,
            agents:       self.agents,
            rngs:         self.rngs,
            squads:       self.squads.unwrap_or_default(),
            world,
            library:      self.library.unwrap_or_else(ScheduleLibrary::hound_alpha),
            npc:          self.npc,
            nav:          self.nav,
            tactical:     self.tactical.unwrap_or_else(|| Box::new(RingLosFinder::default())),
            sink:         self.sink.unwrap_or_else(|| Box::new(NullSink)),
            heavy_damage,
            entity_agent,
            playback:     vec![Playback::default(); agent_count],
            hurt:         vec![Default::default(); agent_count],
            reselect:     vec![false; agent_count],
            pending:      Pending::default(),
            next_effect:  0,
        })
    }
}
