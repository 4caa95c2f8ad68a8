//! Fire-and-forget effect output.
//!
//! The resolver and the behavior handlers never touch entity state directly.
//! Everything they want to happen to the world goes through an
//! [`EffectSink`]; the host engine turns the calls into real damage, sound
//! playback, and particles.  Tests use [`RecordingSink`].

use std::ops::BitOr;

use ph_core::{Angles, EffectHandle, EntityId, Vec3};

// ── DamageKind ────────────────────────────────────────────────────────────────

/// Bit set of damage type flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageKind(pub u32);

impl DamageKind {
    pub const NONE:       DamageKind = DamageKind(0);
    pub const SONIC:      DamageKind = DamageKind(1 << 0);
    /// Gib the corpse regardless of the killing blow's size.
    pub const ALWAYS_GIB: DamageKind = DamageKind(1 << 1);

    #[inline]
    pub fn contains(self, other: DamageKind) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DamageKind {
    type Output = DamageKind;

    fn bitor(self, rhs: DamageKind) -> DamageKind {
        DamageKind(self.0 | rhs.0)
    }
}

/// One damage application.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    pub attacker: EntityId,
    pub amount:   f32,
    pub kind:     DamageKind,
    /// Impulse handed to ragdolls and physics bodies on death.
    pub force:    Vec3,
}

// ── Cues ──────────────────────────────────────────────────────────────────────

/// Named sound cues.  Playback is the host's job.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundCue {
    Idle,
    Alert,
    Pain,
    Die,
    Retreat,
    Warn,
    WarmUp,
    SonicAttack,
    Anger1,
    Anger2,
    GroupAttack,
    GroupFollow,
    /// Throttled squad chatter line.
    Sentence,
}

impl SoundCue {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::Idle        => "idle",
            SoundCue::Alert       => "alert",
            SoundCue::Pain        => "pain",
            SoundCue::Die         => "die",
            SoundCue::Retreat     => "retreat",
            SoundCue::Warn        => "warn",
            SoundCue::WarmUp      => "warm_up",
            SoundCue::SonicAttack => "sonic_attack",
            SoundCue::Anger1      => "anger1",
            SoundCue::Anger2      => "anger2",
            SoundCue::GroupAttack => "group_attack",
            SoundCue::GroupFollow => "group_follow",
            SoundCue::Sentence    => "sentence",
        }
    }

    /// Squad coordination calls.
    #[inline]
    pub fn is_squad_call(self) -> bool {
        matches!(self, SoundCue::GroupAttack | SoundCue::GroupFollow)
    }
}

impl std::fmt::Display for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParticleEffect {
    /// Expanding ring of the sonic blast.
    Shockwave,
}

// ── EffectSink ────────────────────────────────────────────────────────────────

/// Receiver of every world-visible side effect.
pub trait EffectSink {
    fn apply_damage(&mut self, target: EntityId, info: DamageInfo);

    /// Replace `target`'s velocity.
    fn set_velocity(&mut self, target: EntityId, velocity: Vec3);

    fn view_punch(&mut self, target: EntityId, punch: Angles);

    fn apply_force(&mut self, target: EntityId, force: Vec3);

    fn apply_torque(&mut self, target: EntityId, torque: Vec3);

    fn emit_sound(&mut self, source: EntityId, cue: SoundCue);

    fn dispatch_particles(&mut self, effect: ParticleEffect, origin: Vec3, scale: f32);

    /// Tear down a persistent effect such as the energy wave.
    fn remove_effect(&mut self, _handle: EffectHandle) {}
}

/// Sink that drops everything.
pub struct NullSink;

impl EffectSink for NullSink {
    fn apply_damage(&mut self, _: EntityId, _: DamageInfo) {}
    fn set_velocity(&mut self, _: EntityId, _: Vec3) {}
    fn view_punch(&mut self, _: EntityId, _: Angles) {}
    fn apply_force(&mut self, _: EntityId, _: Vec3) {}
    fn apply_torque(&mut self, _: EntityId, _: Vec3) {}
    fn emit_sound(&mut self, _: EntityId, _: SoundCue) {}
    fn dispatch_particles(&mut self, _: ParticleEffect, _: Vec3, _: f32) {}
}

// ── RecordingSink ─────────────────────────────────────────────────────────────

/// One recorded [`EffectSink`] call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedEffect {
    Damage    { target: EntityId, info: DamageInfo },
    Velocity  { target: EntityId, velocity: Vec3 },
    ViewPunch { target: EntityId, punch: Angles },
    Force     { target: EntityId, force: Vec3 },
    Torque    { target: EntityId, torque: Vec3 },
    Sound     { source: EntityId, cue: SoundCue },
    Particles { effect: ParticleEffect, origin: Vec3, scale: f32 },
    Removed   { handle: EffectHandle },
}

/// Sink that records every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub effects: Vec<AppliedEffect>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Every damage event aimed at `target`.
    pub fn damage_to(&self, target: EntityId) -> Vec<DamageInfo> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                AppliedEffect::Damage { target: t, info } if *t == target => Some(*info),
                _ => None,
            })
            .collect()
    }

    /// Sound cues in emission order.
    pub fn sounds(&self) -> Vec<SoundCue> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                AppliedEffect::Sound { cue, .. } => Some(*cue),
                _ => None,
            })
            .collect()
    }

    pub fn count_sound(&self, cue: SoundCue) -> usize {
        self.sounds().into_iter().filter(|&c| c == cue).count()
    }
}

impl EffectSink for RecordingSink {
    fn apply_damage(&mut self, target: EntityId, info: DamageInfo) {
        self.effects.push(AppliedEffect::Damage { target, info });
    }

    fn set_velocity(&mut self, target: EntityId, velocity: Vec3) {
        self.effects.push(AppliedEffect::Velocity { target, velocity });
    }

    fn view_punch(&mut self, target: EntityId, punch: Angles) {
        self.effects.push(AppliedEffect::ViewPunch { target, punch });
    }

    fn apply_force(&mut self, target: EntityId, force: Vec3) {
        self.effects.push(AppliedEffect::Force { target, force });
    }

    fn apply_torque(&mut self, target: EntityId, torque: Vec3) {
        self.effects.push(AppliedEffect::Torque { target, torque });
    }

    fn emit_sound(&mut self, source: EntityId, cue: SoundCue) {
        self.effects.push(AppliedEffect::Sound { source, cue });
    }

    fn dispatch_particles(&mut self, effect: ParticleEffect, origin: Vec3, scale: f32) {
        self.effects.push(AppliedEffect::Particles { effect, origin, scale });
    }

    fn remove_effect(&mut self, handle: EffectHandle) {
        self.effects.push(AppliedEffect::Removed { handle });
    }
}
