//! The `Sim` struct and its tick loop.

use ph_agent::{AgentError, AgentRngs, AgentStore, NpcState, SquadRegistry};
use ph_behavior::{
    live_squad, ActionContext, AnimEvent, Decision, Intent, Interaction, InteractionKind, Npc,
    Percept, SelectContext, TaskOutcome,
};
use ph_combat::EffectSink;
use ph_core::{
    AgentId, Condition, ConditionSet, EffectHandle, EntityId, SimClock, SimConfig, SimTime, Tick, Vec3,
};
use ph_schedule::{Activity, Schedule, ScheduleId, ScheduleLibrary, Task};
use ph_spatial::{EntityIndex, Navigator, Tactical};
use tracing::{debug, warn};

use crate::anim::Playback;
use crate::sink::{Pending, TickSink};
use crate::tasks::{run_generic, start_generic};
use crate::{ScheduleChange, SimObserver, SimResult, TickSummary};

#[cfg(feature = "fx-hash")]
pub(crate) type EntityMap = rustc_hash::FxHashMap<EntityId, AgentId>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type EntityMap = std::collections::HashMap<EntityId, AgentId>;

/// Upper bound on instantly-completing tasks stepped per agent per tick.
const MAX_TASK_STEPS: usize = 8;

/// Movement speeds in units/s.
const RUN_SPEED: f32 = 300.0;
const WALK_SPEED: f32 = 100.0;

/// Lifetime of the energy wave spawned when an attack winds up.
const ENERGY_WAVE_SECS: f64 = 1.0;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<N, V>` holds all simulation state and drives the tick loop:
///
/// 1. **Sync**: copy agent positions, velocities, and health into the world.
/// 2. **Think**: per-agent think hook (energy wave, collision group).
/// 3. **Perceive**: rebuild conditions.  Squad signals persist while the
///    agent stays in combat; damage taken since the last selection is
///    merged in.
/// 4. **Select** (optionally parallel with the `parallel` feature): agents
///    with no schedule, an interrupted one, or a changed state pick anew.
/// 5. **Apply** (sequential, ascending `AgentId`): translate, start the
///    schedule, apply intents, deliver squad broadcasts.
/// 6. **Tasks**: step the current schedule.
/// 7. **Animate**: advance one-shot clips and fire their events.
/// 8. **Move**: follow paths, integrate jumps.  The ground is the plane
///    `z = 0`.
/// 9. **Settle**: apply damage and knockback collected during the tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<N: Npc, V: Navigator> {
    /// Global configuration (tick interval, total ticks, seed, …).
    pub config: SimConfig,

    /// Tracks the current tick and maps it to sim time.
    pub clock: SimClock,

    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub squads: SquadRegistry,

    /// World mirror of every entity, hounds included.
    pub world: EntityIndex,

    pub library: ScheduleLibrary,

    /// The creature policy shared by every agent.
    pub npc: N,

    pub nav: V,

    pub tactical: Box<dyn Tactical>,

    /// Host effect sink.  Every effect a hook produces is forwarded here.
    pub sink: Box<dyn EffectSink>,

    /// A single hit at least this large raises `HeavyDamage`.
    pub heavy_damage: f32,

    pub(crate) entity_agent: EntityMap,
    pub(crate) playback:     Vec<Playback>,
    /// Damage conditions awaiting the next selection.
    pub(crate) hurt:         Vec<ConditionSet>,
    /// Agents whose combat state changed this tick.
    pub(crate) reselect:     Vec<bool>,
    pub(crate) pending:      Pending,
    pub(crate) next_effect:  u32,
}

impl<N: Npc, V: Navigator> Sim<N, V> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process the current tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);
        let summary = self.process_tick(tick, observer)?;
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && tick.0 % self.config.output_interval_ticks == 0
        {
            observer.on_snapshot(tick, &self.agents);
        }
        self.clock.advance();
        Ok(summary)
    }

    /// Current simulated time.
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Agent mirrored by a world entity.
    pub fn agent_for(&self, entity: EntityId) -> Option<AgentId> {
        self.entity_agent.get(&entity).copied()
    }

    /// Deal `amount` damage to `agent` at the current time.
    ///
    /// The hound hears about it through its pain/death hooks immediately and
    /// sees `LightDamage` or `HeavyDamage` at its next selection.
    pub fn damage_agent(&mut self, agent: AgentId, amount: f32) -> SimResult<()> {
        if !self.agents.contains(agent) {
            return Err(AgentError::AgentNotFound(agent).into());
        }
        let now = self.clock.now();
        self.hurt_agent(agent, amount, now);
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.time_at(tick);
        self.pending = Pending::default();

        // ── Phase 1: mirror agents into the world ─────────────────────────
        self.sync_world()?;

        // ── Phase 2: think ────────────────────────────────────────────────
        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            if self.agents.is_alive(agent) {
                self.act(agent, now, |npc, ctx| npc.think(agent, ctx));
            }
        }

        // ── Phase 3: perceive ─────────────────────────────────────────────
        self.perceive(now);

        // ── Phase 4: select (read-only, possibly parallel) ────────────────
        let decisions = self.select(now);
        let selections = decisions.len();

        // ── Phase 5: apply, ascending AgentId ─────────────────────────────
        for (agent, decision) in decisions {
            self.apply_decision(tick, now, agent, decision, observer);
        }
        self.hurt.fill(ConditionSet::EMPTY);

        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            if self.agents.is_alive(agent) {
                self.act(agent, now, |npc, ctx| npc.prescheduled_think(agent, ctx));
            }
        }

        // ── Phase 6: tasks ────────────────────────────────────────────────
        for i in 0..self.agents.count {
            self.run_tasks(tick, now, AgentId(i as u32), observer);
        }

        // ── Phase 7: animation ────────────────────────────────────────────
        for i in 0..self.agents.count {
            self.animate(now, AgentId(i as u32));
        }

        // ── Phase 8: movement ─────────────────────────────────────────────
        self.integrate();

        // ── Phase 9: settle damage and knockback ──────────────────────────
        let (blasts, hits) = self.settle(tick, now, observer);

        Ok(TickSummary {
            tick,
            time: now,
            alive: (0..self.agents.count)
                .filter(|&i| self.agents.is_alive(AgentId(i as u32)))
                .count(),
            selections,
            blasts,
            hits,
            sounds: self.pending.sounds,
        })
    }

    /// Run `f` with a mutable context for `agent`.  Blast reports the hook
    /// produces are queued for the settle phase.
    fn act<R>(
        &mut self,
        agent: AgentId,
        now:   SimTime,
        f:     impl FnOnce(&N, &mut ActionContext<'_>) -> R,
    ) -> R {
        let mut sink = TickSink { inner: self.sink.as_mut(), pending: &mut self.pending };
        let mut ctx = ActionContext {
            now,
            gravity:  self.config.gravity,
            agents:   &mut self.agents,
            squads:   &self.squads,
            world:    &self.world,
            nav:      &self.nav,
            tactical: self.tactical.as_ref(),
            rng:      self.rngs.get_mut(agent),
            sink:     &mut sink,
            blasts:   Vec::new(),
        };
        let out = f(&self.npc, &mut ctx);
        let blasts = std::mem::take(&mut ctx.blasts);
        drop(ctx);
        drop(sink);
        self.pending.blasts.extend(blasts.into_iter().map(|r| (agent, r)));
        out
    }

    fn sync_world(&mut self) -> SimResult<()> {
        for i in 0..self.agents.count {
            let e = self.agents.entity[i];
            if e == EntityId::INVALID {
                continue;
            }
            let pos = self.agents.position[i];
            let moved = self.world.entity_mut(e).is_some_and(|w| w.origin != pos);
            if moved {
                self.world.set_origin(e, pos)?;
            }
            if let Some(w) = self.world.entity_mut(e) {
                w.velocity = self.agents.velocity[i];
                w.health = self.agents.health[i];
            }
        }
        Ok(())
    }

    fn perceive(&mut self, now: SimTime) {
        let percepts: Vec<Percept> = {
            let ctx = SelectContext::new(now, &self.agents, &self.squads, &self.world);
            (0..self.agents.count)
                .map(|i| self.npc.perceive(AgentId(i as u32), &ctx))
                .collect()
        };

        for (i, p) in percepts.into_iter().enumerate() {
            let agent = AgentId(i as u32);
            let before = self.agents.state[i];

            let mut signals = self.agents.conditions[i];
            signals.retain(Condition::is_squad_signal);
            let mut conditions = p.conditions.union(self.hurt[i]);
            if p.state == NpcState::Combat {
                conditions = conditions.union(signals);
            }

            self.agents.conditions[i] = conditions;
            self.agents.state[i] = p.state;
            self.agents.enemy[i] = p.enemy;
            self.reselect[i] = before != p.state;

            if p.state == NpcState::Combat && before != NpcState::Combat {
                debug!(%agent, enemy = ?p.enemy, "entering combat");
                self.act(agent, now, |npc, ctx| npc.alert_sound(agent, ctx));
            }
        }
    }

    fn needs_schedule(&self, i: usize) -> bool {
        let a = &self.agents;
        if a.state[i] == NpcState::Dead && a.activity[i] == Activity::Die {
            return false;
        }
        if self.reselect[i] {
            return true;
        }
        match a.current_schedule[i] {
            None => true,
            Some(id) => self
                .library
                .get(id)
                .is_none_or(|s| s.is_interrupted_by(a.conditions[i])),
        }
    }

    /// Selection phase.  Reads only the snapshot; each agent draws from its
    /// own RNG.
    fn select(&mut self, now: SimTime) -> Vec<(AgentId, Decision)> {
        let needs: Vec<bool> = (0..self.agents.count).map(|i| self.needs_schedule(i)).collect();
        let ctx = SelectContext::new(now, &self.agents, &self.squads, &self.world);
        let npc = &self.npc;

        #[cfg(not(feature = "parallel"))]
        {
            self.rngs
                .inner
                .iter_mut()
                .enumerate()
                .filter(|(i, _)| needs[*i])
                .map(|(i, rng)| {
                    let agent = AgentId(i as u32);
                    (agent, npc.select_schedule(agent, &ctx, rng))
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.rngs
                .inner
                .par_iter_mut()
                .enumerate()
                .filter(|(i, _)| needs[*i])
                .map(|(i, rng)| {
                    let agent = AgentId(i as u32);
                    (agent, npc.select_schedule(agent, &ctx, rng))
                })
                .collect()
        }
    }

    fn start_schedule<O: SimObserver>(
        &mut self,
        tick:      Tick,
        agent:     AgentId,
        requested: ScheduleId,
        observer:  &mut O,
    ) -> ScheduleId {
        let running = self.npc.translate_schedule(requested);
        if self.library.contains(running) {
            self.agents.begin_schedule(agent, running);
        } else {
            warn!(%agent, schedule = %running, "schedule missing from library");
            self.agents.clear_schedule(agent);
        }
        observer.on_schedule(tick, &ScheduleChange { agent, requested, running });
        running
    }

    fn apply_decision<O: SimObserver>(
        &mut self,
        tick:     Tick,
        now:      SimTime,
        agent:    AgentId,
        decision: Decision,
        observer: &mut O,
    ) {
        let i = agent.index();
        match decision.schedule {
            ScheduleId::GroupAttack => self.agents.conditions[i].remove(Condition::GroupAttack),
            ScheduleId::GroupRally  => self.agents.conditions[i].remove(Condition::GroupRally),
            _ => {}
        }
        let running = self.start_schedule(tick, agent, decision.schedule, observer);
        self.reselect[i] = false;

        for intent in decision.intents {
            match intent {
                Intent::EmitSound(cue) => {
                    let source = self.agents.entity[i];
                    TickSink { inner: self.sink.as_mut(), pending: &mut self.pending }
                        .emit_sound(source, cue);
                }
                Intent::SetSoundWait(t)      => self.agents.sound_wait_until[i] = t,
                Intent::SetNextAttack(t)     => self.agents.next_attack[i] = t,
                Intent::SetCollisionGroup(g) => self.agents.collision[i] = g,
                Intent::Broadcast(kind)      => self.broadcast(agent, kind),
            }
        }

        if running == ScheduleId::IdleStand {
            self.act(agent, now, |npc, ctx| npc.idle_sound(agent, ctx));
        }
    }

    /// Deliver `kind` to every other live member of the sender's squad.
    pub(crate) fn broadcast(&mut self, sender: AgentId, kind: InteractionKind) {
        let Some(squad) = live_squad(&self.agents, &self.squads, sender) else {
            return;
        };
        let msg = Interaction { kind, source: self.agents.entity[sender.index()] };
        let members = self.squads.members(squad).to_vec();
        for m in members {
            if m == sender || !self.agents.contains(m) {
                continue;
            }
            if !self.npc.handle_interaction(m, &msg, &mut self.agents) {
                debug!(agent = %m, kind = kind.as_str(), "interaction ignored");
            }
        }
    }

    fn run_tasks<O: SimObserver>(&mut self, tick: Tick, now: SimTime, agent: AgentId, observer: &mut O) {
        let i = agent.index();
        let dt = self.config.tick_interval_secs;

        for _ in 0..MAX_TASK_STEPS {
            let Some(id) = self.agents.current_schedule[i] else {
                return;
            };
            let task = self
                .library
                .get(id)
                .and_then(|s| s.task(self.agents.task_index[i]))
                .copied();
            let Some(task) = task else {
                // Ran off the end: the schedule is done.
                self.agents.clear_schedule(agent);
                return;
            };

            if let Task::SetSchedule(next) = task {
                self.start_schedule(tick, agent, next, observer);
                continue;
            }

            let starting = !self.agents.task_started[i];
            self.agents.task_started[i] = true;
            let outcome = self.act(agent, now, |npc, ctx| {
                let claimed = if starting {
                    npc.start_task(agent, &task, ctx)
                } else {
                    npc.run_task(agent, &task, ctx)
                };
                match claimed {
                    TaskOutcome::NotHandled if starting => start_generic(npc, agent, &task, ctx, dt),
                    TaskOutcome::NotHandled => run_generic(agent, &task, ctx, dt),
                    other => other,
                }
            });

            match outcome {
                TaskOutcome::Complete => {
                    self.agents.task_index[i] += 1;
                    self.agents.task_started[i] = false;
                    self.agents.task_wait_until[i] = None;
                }
                TaskOutcome::Running | TaskOutcome::NotHandled => return,
                TaskOutcome::Failed(failure) => {
                    debug!(%agent, schedule = %id, task = %task, failure = failure.as_str(), "task failed");
                    observer.on_task_failed(tick, agent, &task, failure);
                    let fallback = self.agents.fail_schedule[i]
                        .or_else(|| self.library.get(id).and_then(Schedule::fail_schedule));
                    match fallback {
                        Some(f) => {
                            self.start_schedule(tick, agent, f, observer);
                        }
                        None => self.agents.clear_schedule(agent),
                    }
                    return;
                }
            }
        }
    }

    fn animate(&mut self, now: SimTime, agent: AgentId) {
        let i = agent.index();
        let restarted = !self.agents.activity_finished[i];
        let dt = self.config.tick_interval_secs as f32;
        let (events, finished) = self.playback[i].step(self.agents.activity[i], restarted, dt);

        for event in events {
            if event == AnimEvent::StartAttack {
                self.spawn_energy_wave(agent, now);
            }
            let handled = self.act(agent, now, |npc, ctx| npc.handle_anim_event(agent, event, ctx));
            if !handled {
                debug!(%agent, code = event.code(), "unhandled animation event");
            }
        }
        if finished {
            self.agents.activity_finished[i] = true;
        }
    }

    fn spawn_energy_wave(&mut self, agent: AgentId, now: SimTime) {
        let i = agent.index();
        if let Some(old) = self.agents.energy_wave[i].take() {
            self.sink.remove_effect(old);
        }
        self.next_effect += 1;
        self.agents.energy_wave[i] = Some(EffectHandle::new(self.next_effect, 0));
        self.agents.energy_wave_expires[i] = now + ENERGY_WAVE_SECS;
    }

    pub(crate) fn integrate(&mut self) {
        let dt = self.config.tick_interval_secs as f32;
        let gravity = self.config.gravity;
        let a = &mut self.agents;

        for i in 0..a.count {
            if a.state[i] == NpcState::Dead {
                a.velocity[i] = Vec3::ZERO;
                continue;
            }
            let speed = match a.activity[i] {
                Activity::Run  => RUN_SPEED,
                Activity::Walk => WALK_SPEED,
                _              => 0.0,
            };

            if let Some(next) = a.path[i].front().copied().filter(|_| speed > 0.0) {
                let to = next - a.position[i];
                let dist = to.length();
                let step = speed * dt;
                if dist > 0.0 {
                    a.angles[i].yaw = to.y.atan2(to.x).to_degrees();
                }
                if dist <= step {
                    a.position[i] = next;
                    a.path[i].pop_front();
                } else {
                    a.position[i] += to * (step / dist);
                }
                a.velocity[i] = if a.path[i].is_empty() { Vec3::ZERO } else { to.normalized() * speed };
            } else if a.velocity[i] != Vec3::ZERO || a.position[i].z > 0.0 {
                let v = a.velocity[i];
                a.position[i] += v * dt;
                a.velocity[i].z -= gravity * dt;
                if a.position[i].z <= 0.0 && a.velocity[i].z <= 0.0 {
                    a.position[i].z = 0.0;
                    a.velocity[i] = Vec3::ZERO;
                }
            }
        }
    }

    /// Apply effects gathered this tick.  Returns `(blasts, hits)`.
    fn settle<O: SimObserver>(&mut self, tick: Tick, now: SimTime, observer: &mut O) -> (usize, usize) {
        let blasts = std::mem::take(&mut self.pending.blasts);
        for (agent, report) in &blasts {
            observer.on_sonic_attack(tick, *agent, report);
        }

        for (target, v) in std::mem::take(&mut self.pending.velocity) {
            match self.agent_for(target) {
                Some(agent) => self.agents.velocity[agent.index()] = v,
                None => {
                    if let Some(e) = self.world.entity_mut(target) {
                        e.velocity = v;
                    }
                }
            }
        }

        let damage = std::mem::take(&mut self.pending.damage);
        let hits = damage.len();
        for (target, info) in damage {
            match self.agent_for(target) {
                Some(agent) => self.hurt_agent(agent, info.amount, now),
                None => {
                    if let Some(e) = self.world.entity_mut(target) {
                        e.health -= info.amount;
                    }
                }
            }
        }
        (blasts.len(), hits)
    }

    fn hurt_agent(&mut self, agent: AgentId, amount: f32, now: SimTime) {
        let i = agent.index();
        if !self.agents.is_alive(agent) || amount <= 0.0 {
            return;
        }
        self.agents.health[i] -= amount;
        let c = if amount >= self.heavy_damage { Condition::HeavyDamage } else { Condition::LightDamage };
        self.hurt[i].insert(c);

        if self.agents.health[i] > 0.0 {
            self.act(agent, now, |npc, ctx| {
                npc.on_damaged(agent, ctx);
                npc.pain_sound(agent, ctx);
            });
            return;
        }

        self.agents.health[i] = 0.0;
        self.agents.state[i] = NpcState::Dead;
        self.act(agent, now, |npc, ctx| {
            npc.on_killed(agent, ctx);
            npc.death_sound(agent, ctx);
        });
        self.agents.clear_schedule(agent);
        self.agents.leave_squad(&mut self.squads, agent);
        self.reselect[i] = true;
        debug!(%agent, "killed");
    }
}
