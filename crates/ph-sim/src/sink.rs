//! Effect plumbing between policy hooks and the host sink.
//!
//! Hooks write to a [`TickSink`], which forwards every call to the host's
//! [`EffectSink`] and keeps the damage and velocity writes the sim itself
//! must apply once the hook returns.

use ph_combat::{DamageInfo, EffectSink, ParticleEffect, SonicReport, SoundCue};
use ph_core::{AgentId, Angles, EffectHandle, EntityId, Vec3};

/// Effects gathered during one tick, drained by the sim.
#[derive(Default)]
pub(crate) struct Pending {
    pub damage:   Vec<(EntityId, DamageInfo)>,
    pub velocity: Vec<(EntityId, Vec3)>,
    pub blasts:   Vec<(AgentId, SonicReport)>,
    pub sounds:   usize,
}

pub(crate) struct TickSink<'a> {
    pub inner:   &'a mut dyn EffectSink,
    pub pending: &'a mut Pending,
}

impl EffectSink for TickSink<'_> {
    fn apply_damage(&mut self, target: EntityId, info: DamageInfo) {
        self.pending.damage.push((target, info));
        self.inner.apply_damage(target, info);
    }

    fn set_velocity(&mut self, target: EntityId, velocity: Vec3) {
        self.pending.velocity.push((target, velocity));
        self.inner.set_velocity(target, velocity);
    }

    fn view_punch(&mut self, target: EntityId, punch: Angles) {
        self.inner.view_punch(target, punch);
    }

    fn apply_force(&mut self, target: EntityId, force: Vec3) {
        self.inner.apply_force(target, force);
    }

    fn apply_torque(&mut self, target: EntityId, torque: Vec3) {
        self.inner.apply_torque(target, torque);
    }

    fn emit_sound(&mut self, source: EntityId, cue: SoundCue) {
        self.pending.sounds += 1;
        self.inner.emit_sound(source, cue);
    }

    fn dispatch_particles(&mut self, effect: ParticleEffect, origin: Vec3, scale: f32) {
        self.inner.dispatch_particles(effect, origin, scale);
    }

    fn remove_effect(&mut self, handle: EffectHandle) {
        self.inner.remove_effect(handle);
    }
}
