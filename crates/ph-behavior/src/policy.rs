//! Extension points a host drives once per tick.
//!
//! A creature is anything implementing the full set of hooks; the blanket
//! [`Npc`] impl bundles them so the sim can hold one `Arc<dyn Npc>`.
//!
//! | Hook                  | Phase                      | Access          |
//! |-----------------------|----------------------------|-----------------|
//! | [`Perception`]        | sense                      | read-only       |
//! | [`ScheduleSelector`]  | select (maybe parallel)    | read-only       |
//! | [`InteractionHandler`]| apply, per broadcast       | one agent, mut  |
//! | [`ThinkHandler`]      | think / pre-schedule think | `ActionContext` |
//! | [`TaskHandler`]       | task runner                | `ActionContext` |
//! | [`AnimEventHandler`]  | animation events           | `ActionContext` |
//! | [`VoiceHandler`]      | damage, death, idle chatter| `ActionContext` |

use ph_agent::{AgentStore, NpcState};
use ph_core::{AgentId, Condition, ConditionSet, EntityId};
use ph_schedule::{ScheduleId, Task};

use crate::{ActionContext, AnimEvent, Decision, Interaction, SelectContext, TaskOutcome};

/// What perception concluded about one agent this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Percept {
    pub state:      NpcState,
    pub enemy:      Option<EntityId>,
    /// Freshly sensed conditions.  Squad signals and damage conditions are
    /// carried over by the driver, not re-derived here.
    pub conditions: ConditionSet,
}

pub trait Perception: Send + Sync {
    fn perceive(&self, agent: AgentId, ctx: &SelectContext<'_>) -> Percept;
}

/// Chooses the next schedule.
///
/// Called only for agents whose current schedule ended or was interrupted.
/// Implementations must not draw from `rng` outside the branches that need a
/// coin flip.
pub trait ScheduleSelector: Send + Sync {
    fn select_schedule(
        &self,
        agent: AgentId,
        ctx:   &SelectContext<'_>,
        rng:   &mut dyn ph_core::RandomSource,
    ) -> Decision;

    /// Map a requested schedule onto the one this creature actually runs.
    fn translate_schedule(&self, requested: ScheduleId) -> ScheduleId {
        requested
    }
}

pub trait InteractionHandler: Send + Sync {
    /// React to a squad message.  `false` means "not mine, let the host
    /// handle it".
    fn handle_interaction(&self, agent: AgentId, interaction: &Interaction, agents: &mut AgentStore) -> bool;
}

pub trait TaskHandler: Send + Sync {
    /// First tick of a task.  Return [`TaskOutcome::NotHandled`] to defer to
    /// the host's generic task runner.
    fn start_task(&self, agent: AgentId, task: &Task, ctx: &mut ActionContext<'_>) -> TaskOutcome;

    /// Every later tick while the task is running.
    fn run_task(&self, agent: AgentId, task: &Task, ctx: &mut ActionContext<'_>) -> TaskOutcome;
}

pub trait AnimEventHandler: Send + Sync {
    /// `false` for events this creature does not know.
    fn handle_anim_event(&self, agent: AgentId, event: AnimEvent, ctx: &mut ActionContext<'_>) -> bool;
}

pub trait ThinkHandler: Send + Sync {
    /// Start of every tick, before selection.
    fn think(&self, agent: AgentId, ctx: &mut ActionContext<'_>);

    /// After selection, before tasks run.
    fn prescheduled_think(&self, _agent: AgentId, _ctx: &mut ActionContext<'_>) {}
}

pub trait VoiceHandler: Send + Sync {
    fn idle_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>);
    fn alert_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>);
    fn pain_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>);
    fn death_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>);
    /// Throttled chatter.  Returns `true` if a line was spoken.
    fn speak_sentence(&self, agent: AgentId, ctx: &mut ActionContext<'_>) -> bool;

    /// A hit landed while alive.
    fn on_damaged(&self, _agent: AgentId, _ctx: &mut ActionContext<'_>) {}
    /// The killing blow landed.
    fn on_killed(&self, _agent: AgentId, _ctx: &mut ActionContext<'_>) {}
}

/// Every hook the sim needs from a creature.
pub trait Npc:
    Perception
    + ScheduleSelector
    + InteractionHandler
    + TaskHandler
    + AnimEventHandler
    + ThinkHandler
    + VoiceHandler
{
}

impl<T> Npc for T where
    T: Perception
        + ScheduleSelector
        + InteractionHandler
        + TaskHandler
        + AnimEventHandler
        + ThinkHandler
        + VoiceHandler
{
}

// ── Base policy ───────────────────────────────────────────────────────────────

/// Fallback selection for every case a creature does not customise.
///
/// Deterministic: never draws randomness.
pub trait BasePolicy: Send + Sync {
    fn select_base(&self, agent: AgentId, ctx: &SelectContext<'_>) -> ScheduleId;
}

/// Generic creature behavior: stand idle, face threats, shoot when able.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultPolicy;

impl BasePolicy for DefaultPolicy {
    fn select_base(&self, agent: AgentId, ctx: &SelectContext<'_>) -> ScheduleId {
        let i = agent.index();
        let c = ctx.agents.conditions[i];
        let damaged = c.contains(Condition::LightDamage) || c.contains(Condition::HeavyDamage);
        match ctx.agents.state[i] {
            NpcState::Dead => ScheduleId::Die,
            NpcState::None | NpcState::Idle => {
                if damaged {
                    ScheduleId::TakeCoverFromOrigin
                } else {
                    ScheduleId::IdleStand
                }
            }
            NpcState::Alert => {
                if damaged {
                    ScheduleId::TakeCoverFromOrigin
                } else if ctx.agents.enemy[i].is_some() {
                    ScheduleId::AlertFace
                } else {
                    ScheduleId::AlertStand
                }
            }
            NpcState::Combat => {
                if c.contains(Condition::EnemyDead) {
                    ScheduleId::AlertStand
                } else if c.contains(Condition::CanRangeAttack1) {
                    ScheduleId::RangeAttack1
                } else if c.contains(Condition::SeeEnemy) {
                    ScheduleId::CombatFace
                } else {
                    ScheduleId::ChaseEnemyFailed
                }
            }
        }
    }
}
