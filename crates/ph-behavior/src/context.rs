//! Per-call views of the simulation handed to policy hooks.

use ph_agent::{AgentStore, SquadRegistry};
use ph_combat::{EffectSink, SonicReport};
use ph_core::{AgentId, RandomSource, SimTime, SquadHandle, Vec3};
use ph_spatial::{Navigator, Tactical, WorldEntity, WorldQuery};

/// Live squad of `agent`, if it has one.
pub fn live_squad(agents: &AgentStore, squads: &SquadRegistry, agent: AgentId) -> Option<SquadHandle> {
    agents.squad[agent.index()].filter(|&h| squads.get(h).is_some())
}

// ── SelectContext ─────────────────────────────────────────────────────────────

/// Read-only snapshot for perception and schedule selection.
///
/// Built once per tick and shared by every agent, possibly across Rayon
/// workers.
pub struct SelectContext<'a> {
    pub now:    SimTime,
    pub agents: &'a AgentStore,
    pub squads: &'a SquadRegistry,
    pub world:  &'a dyn WorldQuery,
}

impl<'a> SelectContext<'a> {
    #[inline]
    pub fn new(
        now:    SimTime,
        agents: &'a AgentStore,
        squads: &'a SquadRegistry,
        world:  &'a dyn WorldQuery,
    ) -> Self {
        Self { now, agents, squads, world }
    }

    #[inline]
    pub fn squad(&self, agent: AgentId) -> Option<SquadHandle> {
        live_squad(self.agents, self.squads, agent)
    }

    /// The agent's own world entity.
    pub fn body(&self, agent: AgentId) -> Option<&'a WorldEntity> {
        let world = self.world;
        world.entity(self.agents.entity[agent.index()])
    }

    pub fn enemy(&self, agent: AgentId) -> Option<&'a WorldEntity> {
        let world = self.world;
        self.agents.enemy[agent.index()].and_then(|e| world.entity(e))
    }
}

// ── ActionContext ─────────────────────────────────────────────────────────────

/// Mutable context for tasks, animation events, and think hooks.
///
/// These run sequentially, one agent at a time, so they may write any
/// agent's state.  Blast reports produced during the call collect in
/// `blasts` for the driver to drain.
pub struct ActionContext<'a> {
    pub now:      SimTime,
    /// World gravity in units/s².
    pub gravity:  f32,
    pub agents:   &'a mut AgentStore,
    pub squads:   &'a SquadRegistry,
    pub world:    &'a dyn WorldQuery,
    pub nav:      &'a dyn Navigator,
    pub tactical: &'a dyn Tactical,
    pub rng:      &'a mut dyn RandomSource,
    pub sink:     &'a mut dyn EffectSink,
    pub blasts:   Vec<SonicReport>,
}

impl<'a> ActionContext<'a> {
    #[inline]
    pub fn squad(&self, agent: AgentId) -> Option<SquadHandle> {
        live_squad(self.agents, self.squads, agent)
    }

    /// Member count of the agent's live squad.
    pub fn squad_size(&self, agent: AgentId) -> Option<usize> {
        self.squad(agent).and_then(|h| self.squads.num_members(h))
    }

    pub fn body(&self, agent: AgentId) -> Option<&'a WorldEntity> {
        let world = self.world;
        world.entity(self.agents.entity[agent.index()])
    }

    pub fn enemy(&self, agent: AgentId) -> Option<&'a WorldEntity> {
        let world = self.world;
        self.agents.enemy[agent.index()].and_then(|e| world.entity(e))
    }

    /// Turn the agent to look at `point` (yaw only).
    pub fn face(&mut self, agent: AgentId, point: Vec3) {
        let i = agent.index();
        let d = point - self.agents.position[i];
        if d.x != 0.0 || d.y != 0.0 {
            self.agents.angles[i].yaw = d.y.atan2(d.x).to_degrees();
        }
    }
}
