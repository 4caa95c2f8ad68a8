//! Per-tick hooks, range-attack gating, and small activity rules.

use ph_agent::{CollisionGroup, NpcState};
use ph_combat::SoundCue;
use ph_core::{AgentId, Condition, SimTime};
use ph_schedule::Activity;

use crate::{ActionContext, AlphaHound, BasePolicy, HoundConfig, ThinkHandler};

/// Range attack gate.
///
/// Standing inside a pack-mate blocks the attack outright.  Very close and
/// facing, the hound may attack even while cooling down.  Otherwise the
/// cooldown must have elapsed and the enemy must be within half the blast
/// radius and in front.
pub fn range_attack_condition(
    cfg:         &HoundConfig,
    dot:         f32,
    dist:        f32,
    now:         SimTime,
    next_attack: SimTime,
    inside_kin:  bool,
) -> Option<Condition> {
    if inside_kin {
        return None;
    }
    if dist < cfg.min_attack_radius && dot >= cfg.attack_facing_dot {
        return Some(Condition::CanRangeAttack1);
    }
    if !now.reached(next_attack) {
        return None;
    }
    if dist > cfg.max_attack_radius() * cfg.attack_range_scale {
        return Some(Condition::TooFarToAttack);
    }
    if dot < cfg.attack_facing_dot {
        return Some(Condition::NotFacingAttack);
    }
    Some(Condition::CanRangeAttack1)
}

/// Turn rate in degrees per second for the current activity.
pub fn max_yaw_speed(activity: Activity) -> f32 {
    match activity {
        Activity::CrouchIdle => 0.0,
        Activity::Idle       => 60.0,
        _                    => 90.0,
    }
}

/// Activity the hound actually plays for a requested one.
pub fn translate_activity(requested: Activity, state: NpcState) -> Activity {
    match (requested, state) {
        (Activity::Idle, NpcState::Combat) => Activity::IdleAngry,
        (a, _)                             => a,
    }
}

impl<B: BasePolicy> ThinkHandler for AlphaHound<B> {
    fn think(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        let i = agent.index();

        if let Some(wave) = ctx.agents.energy_wave[i] {
            if ctx.now > ctx.agents.energy_wave_expires[i] {
                ctx.sink.remove_effect(wave);
                ctx.agents.energy_wave[i] = None;
            }
        }

        // Running hounds may pass through each other; a resting hound goes
        // solid unless it is still inside a pack-mate.
        let moving = ctx.agents.velocity[i].length() > self.config.interpenetrate_speed;
        let group = if moving || self.overlapping_kin(agent, ctx.agents, ctx.world).is_some() {
            CollisionGroup::HoundInterpenetrate
        } else {
            CollisionGroup::Solid
        };
        ctx.agents.collision[i] = group;
    }

    fn prescheduled_think(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        let i = agent.index();
        if ctx.agents.state[i] == NpcState::Combat
            && ctx.agents.activity[i] == Activity::Run
            && ctx.rng.random_float(0.0, 1.0) < self.config.warn_chance
        {
            ctx.sink.emit_sound(ctx.agents.entity[i], SoundCue::Warn);
        }
    }
}
