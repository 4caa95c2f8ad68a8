//! The alpha hound: pack leader variant with a frontal sonic blast.
//!
//! # Selection (combat)
//!
//! ```text
//! EnemyDead         → base policy
//! GroupAttack       → GroupAttack, unless standing inside a pack-mate:
//!                     then reset the attack cooldown and keep evaluating
//! GroupRally        → GroupRally
//! CanRangeAttack1   → squad and draw [0,4] == 0 and nobody attacking:
//!                         call GroupAttack, broadcast, → GroupAttack
//!                     else go solid, → RangeAttack1
//! otherwise         → squad and draw [0,5] == 0 and nobody attacking:
//!                         call GroupFollow, broadcast rally
//!                     → AttackStrafe
//! ```
//!
//! The GroupAttack condition is left set on the overlap path, so the request
//! is re-examined on the next selection.

use ph_agent::{AgentStore, CollisionGroup, NpcState};
use ph_combat::SoundCue;
use ph_core::{AgentId, Condition, EntityClass, EntityId, RandomSource};
use ph_schedule::{HoundTranslation, ScheduleId, ScheduleTranslator};
use ph_spatial::WorldQuery;

use crate::{
    BasePolicy, BehaviorResult, Decision, DefaultPolicy, HoundConfig, Intent, Interaction,
    InteractionHandler, InteractionKind, ScheduleSelector, SelectContext,
};

/// Alpha hound policy.  Stateless: all per-creature state lives in
/// [`AgentStore`].
pub struct AlphaHound<B: BasePolicy = DefaultPolicy> {
    pub config: HoundConfig,
    base:       B,
    translator: Box<dyn ScheduleTranslator>,
}

impl AlphaHound<DefaultPolicy> {
    /// Validated policy over the default base behavior.
    pub fn new(config: HoundConfig) -> BehaviorResult<Self> {
        Self::with_base(config, DefaultPolicy)
    }
}

impl Default for AlphaHound<DefaultPolicy> {
    fn default() -> Self {
        Self {
            config:     HoundConfig::default(),
            base:       DefaultPolicy,
            translator: Box::new(HoundTranslation),
        }
    }
}

impl<B: BasePolicy> AlphaHound<B> {
    pub fn with_base(config: HoundConfig, base: B) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self { config, base, translator: Box::new(HoundTranslation) })
    }

    /// Replace the schedule translator, e.g. with
    /// `HoundTranslation.then(custom)`.
    pub fn with_translator(mut self, translator: impl ScheduleTranslator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    #[inline]
    pub fn classify(&self) -> EntityClass {
        EntityClass::AlphaHound
    }

    /// A pack-mate whose hull overlaps this agent's, if any.
    pub fn overlapping_kin(
        &self,
        agent:  AgentId,
        agents: &AgentStore,
        world:  &dyn WorldQuery,
    ) -> Option<EntityId> {
        let me = agents.entity[agent.index()];
        let body = world.entity(me)?;
        world.overlaps_class(body.abs_bounds(), self.classify(), me)
    }

    /// `true` if any live squad member, this agent included, is running the
    /// hound range attack.
    pub fn is_anyone_in_squad_attacking(&self, agent: AgentId, ctx: &SelectContext<'_>) -> bool {
        let Some(squad) = ctx.squad(agent) else {
            return false;
        };
        ctx.squads
            .members(squad)
            .iter()
            .any(|&m| ctx.agents.contains(m) && ctx.agents.is_running(m, ScheduleId::HoundRangeAttack1))
    }

    fn combat_schedule(
        &self,
        agent: AgentId,
        ctx:   &SelectContext<'_>,
        rng:   &mut dyn RandomSource,
    ) -> Decision {
        let i = agent.index();
        let conditions = ctx.agents.conditions[i];
        let mut intents = Vec::new();

        if conditions.contains(Condition::EnemyDead) {
            return Decision::new(self.base.select_base(agent, ctx));
        }

        if conditions.contains(Condition::GroupAttack) {
            if self.overlapping_kin(agent, ctx.agents, ctx.world).is_none() {
                return Decision::new(ScheduleId::GroupAttack);
            }
            intents.push(Intent::SetNextAttack(ctx.now));
        }

        if conditions.contains(Condition::GroupRally) {
            return Decision::with_intents(ScheduleId::GroupRally, intents);
        }

        let in_squad = ctx.squad(agent).is_some();
        let sound_wait = ctx.now + self.config.sound_wait;

        if conditions.contains(Condition::CanRangeAttack1) {
            if in_squad
                && rng.random_int(0, self.config.group_attack_odds) == 0
                && !self.is_anyone_in_squad_attacking(agent, ctx)
            {
                intents.extend([
                    Intent::EmitSound(SoundCue::GroupAttack),
                    Intent::SetSoundWait(sound_wait),
                    Intent::Broadcast(InteractionKind::GroupAttack),
                ]);
                return Decision::with_intents(ScheduleId::GroupAttack, intents);
            }
            intents.push(Intent::SetCollisionGroup(CollisionGroup::Solid));
            return Decision::with_intents(ScheduleId::RangeAttack1, intents);
        }

        if in_squad
            && rng.random_int(0, self.config.group_rally_odds) == 0
            && !self.is_anyone_in_squad_attacking(agent, ctx)
        {
            intents.extend([
                Intent::EmitSound(SoundCue::GroupFollow),
                Intent::SetSoundWait(sound_wait),
                Intent::Broadcast(InteractionKind::GroupRally),
            ]);
        }
        Decision::with_intents(ScheduleId::AttackStrafe, intents)
    }
}

impl<B: BasePolicy> ScheduleSelector for AlphaHound<B> {
    fn select_schedule(
        &self,
        agent: AgentId,
        ctx:   &SelectContext<'_>,
        rng:   &mut dyn RandomSource,
    ) -> Decision {
        let i = agent.index();
        let conditions = ctx.agents.conditions[i];
        match ctx.agents.state[i] {
            NpcState::Idle | NpcState::Alert
                if conditions.contains(Condition::LightDamage)
                    || conditions.contains(Condition::HeavyDamage) =>
            {
                Decision::new(ScheduleId::TakeCoverFromOrigin)
            }
            NpcState::Combat => self.combat_schedule(agent, ctx, rng),
            _ => Decision::new(self.base.select_base(agent, ctx)),
        }
    }

    fn translate_schedule(&self, requested: ScheduleId) -> ScheduleId {
        self.translator.resolve(requested)
    }
}

impl<B: BasePolicy> InteractionHandler for AlphaHound<B> {
    fn handle_interaction(&self, agent: AgentId, interaction: &Interaction, agents: &mut AgentStore) -> bool {
        let i = agent.index();
        match interaction.kind {
            InteractionKind::GroupAttack => {
                agents.conditions[i].insert(Condition::GroupAttack);
                true
            }
            InteractionKind::GroupRally => {
                agents.conditions[i].insert(Condition::GroupRally);
                agents.target[i] = Some(interaction.source);
                agents.loop_clockwise[i] = false;
                true
            }
            InteractionKind::Foreign(_) => false,
        }
    }
}
