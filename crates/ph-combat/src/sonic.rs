//! Sonic blast resolution.
//!
//! [`SonicAttack::resolve`] visits every entity in the blast sphere once, in
//! ascending `EntityId` order, computes a single adjuster per target with
//! [`SonicAttack::adjust`], and pushes damage, knock-back, and physics
//! impulses into an [`EffectSink`].  Nothing here fails at runtime: targets
//! that do not qualify are listed in [`SonicReport::skipped`] with a reason.

use ph_core::{Angles, EntityId, RandomSource, Vec3};
use ph_spatial::{WorldEntity, WorldQuery};
use tracing::{debug, trace};

use crate::{
    CombatError, CombatResult, DamageInfo, DamageKind, EffectSink, ParticleEffect, SoundCue,
};

// ── Config ────────────────────────────────────────────────────────────────────

/// Tunables of the sonic blast.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SonicAttack {
    /// Blast radius; damage falls off linearly to zero at this distance.
    pub max_radius:  f32,
    pub base_damage: f32,
    /// Forward knock-back speed applied to players at adjuster 1.
    pub player_push: f32,
    /// Vertical speed players are set to at adjuster 1.
    pub player_lift: f32,
    /// Force and torque magnitude on physics bodies at adjuster 1.
    pub physics_force: f32,
    /// Upward bias added to the push direction of physics bodies.
    pub physics_lift:  f32,
    /// Multiplier for players the blast reaches without line of sight.
    pub occluded_player_scale: f32,
    /// Per-extra-member bonus: `1 + (n - 1) × squad_bonus`.
    pub squad_bonus: f32,
    /// View punch pitch and roll are drawn from `[-view_punch, view_punch]`.
    pub view_punch: i32,
    /// Explosive force per point of damage before clamping.
    pub force_per_damage: f32,
    pub force_clamp:      f32,
}

impl Default for SonicAttack {
    fn default() -> Self {
        Self {
            max_radius:  500.0,
            base_damage: 20.0,
            player_push: 150.0,
            player_lift: 50.0,
            physics_force: 8000.0,
            physics_lift:  0.2,
            occluded_player_scale: 0.5,
            squad_bonus: 0.25,
            view_punch:  20,
            // A 75 kg reference mass pushed at 4 u/s per damage point, capped at 400 u/s.
            force_per_damage: 300.0,
            force_clamp:      30_000.0,
        }
    }
}

// ── Attacker / results ───────────────────────────────────────────────────────

/// Everything the resolver needs to know about the creature firing the blast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attacker {
    pub entity: EntityId,
    /// Feet position; the blast is centred here.
    pub origin: Vec3,
    pub angles: Angles,
    /// Line-of-sight checks start here.
    pub eye:    Vec3,
    /// Member count of the attacker's squad, `None` when solo.
    pub squad_size: Option<usize>,
}

impl Attacker {
    /// Attacker mirroring a world entity.
    pub fn from_entity(e: &WorldEntity, angles: Angles, squad_size: Option<usize>) -> Self {
        Self {
            entity: e.id,
            origin: e.origin,
            angles,
            eye: e.eye_position(),
            squad_size,
        }
    }
}

/// Why a target inside the sphere received nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// Another hound, or the attacker itself.
    SameSpecies,
    NoTarget,
    /// Neither damageable nor physics-simulated.
    NotEligible,
    /// Center at or beyond the blast radius, though the hull reaches in.
    OutOfRange,
    /// Behind the attacker.
    OutOfArc,
    /// Blocked from view and not a class that takes damage through cover.
    Occluded,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::SameSpecies => "same_species",
            SkipReason::NoTarget    => "no_target",
            SkipReason::NotEligible => "not_eligible",
            SkipReason::OutOfRange  => "out_of_range",
            SkipReason::OutOfArc    => "out_of_arc",
            SkipReason::Occluded    => "occluded",
        }
    }
}

/// Outcome of [`SonicAttack::adjust`] for one target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Adjustment {
    Apply(f32),
    Skip(SkipReason),
}

/// One target that received blast effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SonicHit {
    pub target:   EntityId,
    pub adjuster: f32,
    /// Damage dealt, `None` for physics-only targets.
    pub damage:   Option<f32>,
    pub visible:  bool,
    pub physics:  bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SonicReport {
    pub hits:    Vec<SonicHit>,
    pub skipped: Vec<(EntityId, SkipReason)>,
}

impl SonicReport {
    pub fn hit(&self, target: EntityId) -> Option<&SonicHit> {
        self.hits.iter().find(|h| h.target == target)
    }

    pub fn skip_reason(&self, target: EntityId) -> Option<SkipReason> {
        self.skipped.iter().find(|(e, _)| *e == target).map(|&(_, r)| r)
    }

    pub fn total_damage(&self) -> f32 {
        self.hits.iter().filter_map(|h| h.damage).sum()
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

impl SonicAttack {
    /// Reject configs that would produce NaN or inverted falloff.
    pub fn validate(&self) -> CombatResult<()> {
        if self.max_radius.is_nan() || self.max_radius <= 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "max_radius must be positive, got {}",
                self.max_radius
            )));
        }
        if self.base_damage < 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "base_damage must be non-negative, got {}",
                self.base_damage
            )));
        }
        if self.view_punch < 0 {
            return Err(CombatError::InvalidConfig(format!(
                "view_punch must be non-negative, got {}",
                self.view_punch
            )));
        }
        Ok(())
    }

    /// `1 + (n - 1) × squad_bonus` for a squad of `n`, `1` when solo.
    pub fn squad_multiplier(&self, squad_size: Option<usize>) -> f32 {
        match squad_size {
            Some(n) => 1.0 + (n as f32 - 1.0) * self.squad_bonus,
            None    => 1.0,
        }
    }

    /// Blast multiplier for one target, with `visible` precomputed by the
    /// caller.
    pub fn adjust(&self, attacker: &Attacker, target: &WorldEntity, visible: bool) -> Adjustment {
        if target.id == attacker.entity || target.class.is_hound_kin() {
            return Adjustment::Skip(SkipReason::SameSpecies);
        }
        if target.no_target {
            return Adjustment::Skip(SkipReason::NoTarget);
        }
        if !target.takes_damage && !target.has_physics {
            return Adjustment::Skip(SkipReason::NotEligible);
        }

        // The sphere query matches hulls, so centers can lie past the edge.
        // Checked before the facing dot: two negative factors would multiply
        // back to a positive adjuster.
        let dist = target.center().distance(attacker.origin);
        if dist >= self.max_radius {
            return Adjustment::Skip(SkipReason::OutOfRange);
        }
        let mut adj = 1.0 - dist / self.max_radius;

        let dir = (target.origin - attacker.origin).normalized();
        adj *= attacker.angles.forward().dot(dir);
        if adj < 0.0 {
            return Adjustment::Skip(SkipReason::OutOfArc);
        }

        if !visible {
            if target.is_player() {
                adj *= self.occluded_player_scale;
            } else if !target.class.ignores_cover() {
                return Adjustment::Skip(SkipReason::Occluded);
            }
        }

        Adjustment::Apply(adj * self.squad_multiplier(attacker.squad_size))
    }

    /// Fire the blast: [`announce`](Self::announce) then
    /// [`blast`](Self::blast).
    pub fn resolve(
        &self,
        attacker: &Attacker,
        world:    &dyn WorldQuery,
        rng:      &mut dyn RandomSource,
        sink:     &mut dyn EffectSink,
    ) -> SonicReport {
        self.announce(attacker, sink);
        self.blast(attacker, world, rng, sink)
    }

    /// The attack sound, once per blast.
    pub fn announce(&self, attacker: &Attacker, sink: &mut dyn EffectSink) {
        sink.emit_sound(attacker.entity, SoundCue::SonicAttack);
    }

    /// Shockwave particles, scaled by squad size (0 when solo), then the
    /// per-target effects.  Emits no sound.
    ///
    /// `rng` is drawn only for player view punch, pitch then roll.
    pub fn blast(
        &self,
        attacker: &Attacker,
        world:    &dyn WorldQuery,
        rng:      &mut dyn RandomSource,
        sink:     &mut dyn EffectSink,
    ) -> SonicReport {
        let scale = attacker.squad_size.unwrap_or(0) as f32;
        sink.dispatch_particles(ParticleEffect::Shockwave, attacker.origin, scale);

        let mut report = SonicReport::default();
        let forward = attacker.angles.forward();

        for id in world.entities_in_sphere(attacker.origin, self.max_radius) {
            let Some(target) = world.entity(id) else {
                continue;
            };
            let visible = world.is_visible(attacker.eye, target.eye_position());
            let adj = match self.adjust(attacker, target, visible) {
                Adjustment::Apply(a) => a,
                Adjustment::Skip(reason) => {
                    trace!(target = %id, reason = reason.as_str(), "sonic blast skipped");
                    report.skipped.push((id, reason));
                    continue;
                }
            };

            let dir = (target.origin - attacker.origin).normalized();
            let mut damage = None;

            if target.takes_damage {
                let amount = adj * self.base_damage;
                let force = dir * (amount * self.force_per_damage).min(self.force_clamp);
                sink.apply_damage(
                    id,
                    DamageInfo {
                        attacker: attacker.entity,
                        amount,
                        kind: DamageKind::SONIC | DamageKind::ALWAYS_GIB,
                        force,
                    },
                );
                damage = Some(amount);

                if target.is_player() {
                    let mut velocity = target.velocity + forward * (self.player_push * adj);
                    velocity.z = self.player_lift * adj;
                    sink.set_velocity(id, velocity);

                    let pitch = rng.random_int(-self.view_punch, self.view_punch);
                    let roll = rng.random_int(-self.view_punch, self.view_punch);
                    sink.view_punch(id, Angles::new(pitch as f32, 0.0, roll as f32));
                }
            }

            if target.has_physics {
                let push = self.physics_force * adj;
                sink.apply_force(id, (dir + Vec3::new(0.0, 0.0, self.physics_lift)) * push);
                sink.apply_torque(id, dir * push);
            }

            report.hits.push(SonicHit {
                target: id,
                adjuster: adj,
                damage,
                visible,
                physics: target.has_physics,
            });
        }

        debug!(
            attacker = %attacker.entity,
            hits = report.hits.len(),
            skipped = report.skipped.len(),
            "sonic blast resolved"
        );
        report
    }
}
