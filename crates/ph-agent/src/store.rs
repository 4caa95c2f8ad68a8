//! Core creature storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The parallel selection phase needs `&mut AgentRngs` (exclusive mutable
//! access to each agent's RNG) and `&AgentStore` (shared read access to every
//! agent's state) simultaneously.  Keeping RNGs in a separate struct lets both
//! borrows coexist:
//!
//! ```ignore
//! // ph-sim selection phase (simplified):
//! let store: &AgentStore = &sim.store;
//! let decisions = sim.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| npc.select_schedule(AgentId(i as u32), &ctx, rng))
//!     .collect::<Vec<_>>();
//! ```

use std::collections::VecDeque;

use ph_core::{
    AgentId, AgentRng, Angles, ConditionSet, EffectHandle, EntityId, SimTime, SquadHandle, Vec3,
};
use ph_schedule::{Activity, ScheduleId};

use crate::{AgentError, AgentResult, CollisionGroup, NpcState, SquadRegistry};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all creature state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them.  Writes happen only in the sim's sequential phases
/// (think, apply, tasks, animation events).
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Body ──────────────────────────────────────────────────────────────
    /// World entity mirroring this creature.  `EntityId::INVALID` until linked.
    pub entity:   Vec<EntityId>,
    pub position: Vec<Vec3>,
    pub angles:   Vec<Angles>,
    pub velocity: Vec<Vec3>,
    pub health:   Vec<f32>,
    pub collision: Vec<CollisionGroup>,

    // ── Mind ──────────────────────────────────────────────────────────────
    pub state:      Vec<NpcState>,
    /// Rebuilt by perception each tick; squad signals persist until consumed.
    pub conditions: Vec<ConditionSet>,
    pub enemy:      Vec<Option<EntityId>>,
    /// Movement target (e.g. the squad-mate that called a rally).
    pub target:     Vec<Option<EntityId>>,
    pub squad:      Vec<Option<SquadHandle>>,
    /// Strafe direction around the enemy.
    pub loop_clockwise: Vec<bool>,
    pub asleep:         Vec<bool>,
    pub dont_blink:     Vec<bool>,

    // ── Timers (absolute deadlines) ───────────────────────────────────────
    /// Earliest time the next sonic attack may start.
    pub next_attack:      Vec<SimTime>,
    /// Sentences are suppressed until this time.
    pub sound_wait_until: Vec<SimTime>,

    // ── Schedule execution ────────────────────────────────────────────────
    /// Schedule currently running (already translated).
    pub current_schedule: Vec<Option<ScheduleId>>,
    /// Index into the current schedule's task list.
    pub task_index:       Vec<usize>,
    /// `Some` while the current task is waiting on a timer.
    pub task_wait_until:  Vec<Option<SimTime>>,
    /// `true` once the current task has been started.
    pub task_started:     Vec<bool>,
    /// Fail schedule recorded by `SetFailSchedule`.
    pub fail_schedule:    Vec<Option<ScheduleId>>,
    /// Arrival tolerance recorded by `SetToleranceDistance`.
    pub tolerance:        Vec<f32>,
    /// Remaining waypoints of the active path.
    pub path:             Vec<VecDeque<Vec3>>,
    pub activity:         Vec<Activity>,
    /// `true` once a one-shot `activity` has played to the end.
    pub activity_finished: Vec<bool>,

    // ── Effects ───────────────────────────────────────────────────────────
    pub energy_wave:         Vec<Option<EffectHandle>>,
    pub energy_wave_expires: Vec<SimTime>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Agent whose world mirror is `entity`, if any.
    pub fn agent_for_entity(&self, entity: EntityId) -> Option<AgentId> {
        self.entity
            .iter()
            .position(|&e| e == entity)
            .map(|i| AgentId(i as u32))
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.state[agent.index()] != NpcState::Dead
    }

    /// `true` while the agent's current schedule is `id`.
    #[inline]
    pub fn is_running(&self, agent: AgentId, id: ScheduleId) -> bool {
        self.current_schedule[agent.index()] == Some(id)
    }

    /// Switch `agent` to `schedule`, resetting task execution.
    pub fn begin_schedule(&mut self, agent: AgentId, schedule: ScheduleId) {
        let i = agent.index();
        self.current_schedule[i] = Some(schedule);
        self.task_index[i] = 0;
        self.task_started[i] = false;
        self.task_wait_until[i] = None;
        self.fail_schedule[i] = None;
    }

    /// Drop the current schedule so the agent reselects next tick.
    pub fn clear_schedule(&mut self, agent: AgentId) {
        let i = agent.index();
        self.current_schedule[i] = None;
        self.task_index[i] = 0;
        self.task_started[i] = false;
        self.task_wait_until[i] = None;
        self.fail_schedule[i] = None;
        self.path[i].clear();
    }

    /// Request a new activity.  One-shot activities start unfinished.
    pub fn set_activity(&mut self, agent: AgentId, activity: Activity) {
        let i = agent.index();
        self.activity[i] = activity;
        self.activity_finished[i] = false;
    }

    // ── Squad membership ──────────────────────────────────────────────────

    /// Add `agent` to `squad`, recording the handle on the agent.
    pub fn join_squad(
        &mut self,
        squads: &mut SquadRegistry,
        agent: AgentId,
        squad: SquadHandle,
    ) -> AgentResult<()> {
        if !self.contains(agent) {
            return Err(AgentError::AgentNotFound(agent));
        }
        if let Some(current) = self.squad[agent.index()] {
            if squads.get(current).is_some() {
                return Err(AgentError::AlreadyInSquad { agent, squad: current });
            }
        }
        squads.add_member(squad, agent)?;
        self.squad[agent.index()] = Some(squad);
        Ok(())
    }

    /// Remove `agent` from its squad, if it has a live one.
    pub fn leave_squad(&mut self, squads: &mut SquadRegistry, agent: AgentId) {
        if let Some(handle) = self.squad[agent.index()].take() {
            squads.remove_member(handle, agent);
        }
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,

            entity:    vec![EntityId::INVALID; count],
            position:  vec![Vec3::ZERO; count],
            angles:    vec![Angles::default(); count],
            velocity:  vec![Vec3::ZERO; count],
            health:    vec![0.0; count],
            collision: vec![CollisionGroup::HoundInterpenetrate; count],

            state:          vec![NpcState::None; count],
            conditions:     vec![ConditionSet::EMPTY; count],
            enemy:          vec![None; count],
            target:         vec![None; count],
            squad:          vec![None; count],
            loop_clockwise: vec![false; count],
            asleep:         vec![false; count],
            dont_blink:     vec![false; count],

            next_attack:      vec![SimTime::ZERO; count],
            sound_wait_until: vec![SimTime::ZERO; count],

            current_schedule:  vec![None; count],
            task_index:        vec![0; count],
            task_wait_until:   vec![None; count],
            task_started:      vec![false; count],
            fail_schedule:     vec![None; count],
            tolerance:         vec![0.0; count],
            path:              vec![VecDeque::new(); count],
            activity:          vec![Activity::Idle; count],
            activity_finished: vec![false; count],

            energy_wave:         vec![None; count],
            energy_wave_expires: vec![SimTime::ZERO; count],
        }
    }
}
