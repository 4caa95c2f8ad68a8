//! Animation event dispatch.
//!
//! Event codes are fixed by the creature's animation data:
//!
//! | Code | Event         | Effect                                      |
//! |------|---------------|---------------------------------------------|
//! | 1    | `Warn`        | warn cue                                    |
//! | 2    | `StartAttack` | warm-up cue                                 |
//! | 3    | `Thump`       | sonic blast; cooldown `U[5, 8)` s           |
//! | 4, 5 | `Anger1/2`    | anger cues                                  |
//! | 6    | `HopBack`     | backwards hop                               |
//! | 7    | `CloseEye`    | no-op unless blinking is allowed            |
//! | 8    | `LeapHit`     | ballistic leap at the enemy; cooldown 2 s   |

use ph_combat::{hop_back_velocity, leap_velocity, Attacker, SoundCue, LEAP_LIFT};
use ph_core::{AgentId, Vec3};

use crate::{ActionContext, AlphaHound, AnimEventHandler, BasePolicy};

const DEFAULT_EYE_HEIGHT: f32 = 48.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimEvent {
    Warn,
    StartAttack,
    Thump,
    Anger1,
    Anger2,
    HopBack,
    CloseEye,
    LeapHit,
    /// Any code this creature does not define.
    Other(u32),
}

impl AnimEvent {
    pub fn from_code(code: u32) -> AnimEvent {
        match code {
            1 => AnimEvent::Warn,
            2 => AnimEvent::StartAttack,
            3 => AnimEvent::Thump,
            4 => AnimEvent::Anger1,
            5 => AnimEvent::Anger2,
            6 => AnimEvent::HopBack,
            7 => AnimEvent::CloseEye,
            8 => AnimEvent::LeapHit,
            n => AnimEvent::Other(n),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            AnimEvent::Warn        => 1,
            AnimEvent::StartAttack => 2,
            AnimEvent::Thump       => 3,
            AnimEvent::Anger1      => 4,
            AnimEvent::Anger2      => 5,
            AnimEvent::HopBack     => 6,
            AnimEvent::CloseEye    => 7,
            AnimEvent::LeapHit     => 8,
            AnimEvent::Other(n)    => n,
        }
    }
}

impl<B: BasePolicy> AlphaHound<B> {
    /// Fire the blast from the agent's current pose.
    ///
    /// Sink order: attack sound, removal of any lingering energy wave,
    /// shockwave particles, then per-target effects.
    pub fn sonic_attack(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        let i = agent.index();
        let origin = ctx.agents.position[i];
        let eye_height = ctx.body(agent).map_or(DEFAULT_EYE_HEIGHT, |b| b.eye_height);
        let attacker = Attacker {
            entity: ctx.agents.entity[i],
            origin,
            angles: ctx.agents.angles[i],
            eye: origin + Vec3::new(0.0, 0.0, eye_height),
            squad_size: ctx.squad_size(agent),
        };
        let sonic = &self.config.sonic;
        sonic.announce(&attacker, &mut *ctx.sink);
        if let Some(wave) = ctx.agents.energy_wave[i].take() {
            ctx.sink.remove_effect(wave);
        }
        let report = sonic.blast(&attacker, ctx.world, &mut *ctx.rng, &mut *ctx.sink);
        ctx.blasts.push(report);
    }
}

impl<B: BasePolicy> AnimEventHandler for AlphaHound<B> {
    fn handle_anim_event(&self, agent: AgentId, event: AnimEvent, ctx: &mut ActionContext<'_>) -> bool {
        let i = agent.index();
        let entity = ctx.agents.entity[i];
        match event {
            AnimEvent::Warn        => ctx.sink.emit_sound(entity, SoundCue::Warn),
            AnimEvent::StartAttack => ctx.sink.emit_sound(entity, SoundCue::WarmUp),
            AnimEvent::Anger1      => ctx.sink.emit_sound(entity, SoundCue::Anger1),
            AnimEvent::Anger2      => ctx.sink.emit_sound(entity, SoundCue::Anger2),
            AnimEvent::HopBack => {
                ctx.agents.velocity[i] = hop_back_velocity(ctx.agents.angles[i], ctx.gravity);
            }
            AnimEvent::Thump => {
                self.sonic_attack(agent, ctx);
                let cooldown = ctx
                    .rng
                    .random_float(self.config.attack_cooldown_min, self.config.attack_cooldown_max);
                ctx.agents.next_attack[i] = ctx.now + f64::from(cooldown);
            }
            // Eyelid frames are cosmetic; nothing to drive here.
            AnimEvent::CloseEye => {}
            AnimEvent::LeapHit => {
                ctx.agents.position[i].z += LEAP_LIFT;
                let enemy_eye = ctx.enemy(agent).map(|e| e.eye_position());
                ctx.agents.velocity[i] = leap_velocity(
                    ctx.agents.position[i],
                    ctx.agents.angles[i],
                    enemy_eye,
                    ctx.gravity,
                );
                ctx.agents.next_attack[i] = ctx.now + self.config.leap_cooldown;
            }
            AnimEvent::Other(_) => return false,
        }
        true
    }
}
