//! Unit tests for ph-combat.

#[cfg(test)]
mod helpers {
    use ph_core::{Aabb, Angles, EntityClass, EntityId, Vec3};
    use ph_spatial::{EntityIndex, EntityIndexBuilder, WorldEntity};

    use crate::Attacker;

    /// Wall between x=200 and x=220 across the +X axis.
    pub fn wall() -> Aabb {
        Aabb::new(Vec3::new(200.0, -50.0, -10.0), Vec3::new(220.0, 50.0, 200.0))
    }

    /// A world containing the attacker (entity 0, at origin) plus `others`.
    pub fn world_with(
        others: &[(EntityClass, Vec3)],
        walled: bool,
    ) -> (EntityIndex, EntityId, Vec<EntityId>) {
        let mut b = EntityIndexBuilder::new();
        let alpha = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let ids = others
            .iter()
            .map(|&(class, pos)| b.add(|id| WorldEntity::new(id, class, pos)))
            .collect();
        if walled {
            b.add_occluder(wall());
        }
        (b.build(), alpha, ids)
    }

    /// Attacker at the origin facing +X.
    pub fn attacker(entity: EntityId, squad_size: Option<usize>) -> Attacker {
        Attacker {
            entity,
            origin: Vec3::ZERO,
            angles: Angles::from_yaw(0.0),
            eye: Vec3::new(0.0, 0.0, 48.0),
            squad_size,
        }
    }

    /// Expected falloff for a default-hull entity standing at `pos`.
    pub fn falloff(pos: Vec3) -> f32 {
        1.0 - (pos + Vec3::new(0.0, 0.0, 32.0)).length() / 500.0
    }

    pub fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }
}

// ── Adjuster ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod adjust {
    use ph_core::{EntityClass, ScriptedRng, Vec3};
    use ph_spatial::WorldQuery;

    use super::helpers::{attacker, close, falloff, world_with};
    use crate::{RecordingSink, SkipReason, SonicAttack};

    #[test]
    fn distance_falloff_in_front() {
        let pos = Vec3::new(100.0, 0.0, 0.0);
        let (world, alpha, ids) = world_with(&[(EntityClass::Player, pos)], false);
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut RecordingSink::new(),
        );
        let hit = report.hit(ids[0]).unwrap();
        assert!(close(hit.adjuster, falloff(pos)));
        assert!(close(hit.damage.unwrap(), falloff(pos) * 20.0));
        assert!(hit.visible);
    }

    #[test]
    fn centered_hull_fifty_units_ahead() {
        use ph_core::Aabb;
        use ph_spatial::{EntityIndexBuilder, WorldEntity};

        let mut b = EntityIndexBuilder::new();
        let alpha = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let hull = Aabb::new(Vec3::new(-16.0, -16.0, -16.0), Vec3::new(16.0, 16.0, 16.0));
        let target = b.add(|id| {
            WorldEntity::new(id, EntityClass::Npc, Vec3::new(50.0, 0.0, 0.0)).with_hull(hull)
        });
        let world = b.build();
        for (squad, adjuster, damage) in [(None, 0.9, 18.0), (Some(3), 1.35, 27.0)] {
            let report = SonicAttack::default().resolve(
                &attacker(alpha, squad),
                &world,
                &mut ScriptedRng::new(),
                &mut RecordingSink::new(),
            );
            let hit = report.hit(target).unwrap();
            assert!(close(hit.adjuster, adjuster), "{squad:?}");
            assert!(close(hit.damage.unwrap(), damage), "{squad:?}");
        }
    }

    #[test]
    fn facing_scales_by_dot() {
        // 45° off-axis: adjuster picks up cos(45°).
        let pos = Vec3::new(100.0, 100.0, 0.0);
        let (world, alpha, ids) = world_with(&[(EntityClass::Npc, pos)], false);
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut RecordingSink::new(),
        );
        let expected = falloff(pos) * std::f32::consts::FRAC_1_SQRT_2;
        assert!(close(report.hit(ids[0]).unwrap().adjuster, expected));
    }

    #[test]
    fn behind_is_out_of_arc() {
        let (world, alpha, ids) =
            world_with(&[(EntityClass::Player, Vec3::new(-100.0, 0.0, 0.0))], false);
        let mut sink = RecordingSink::new();
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut sink,
        );
        assert_eq!(report.skip_reason(ids[0]), Some(SkipReason::OutOfArc));
        assert!(sink.damage_to(ids[0]).is_empty());
    }

    #[test]
    fn centers_at_or_past_radius_get_nothing() {
        use crate::AppliedEffect;

        // Default hulls stand 64 tall, so the center sits 32 above the origin.
        // Every hull still reaches inside the 500-unit sphere.
        let cases = [
            ("edge", Vec3::new(500.0, 0.0, -32.0)),
            ("past", Vec3::new(505.0, 0.0, -32.0)),
            ("behind", Vec3::new(-510.0, 0.0, 0.0)),
        ];
        for (name, pos) in cases {
            let (world, alpha, ids) = world_with(&[(EntityClass::Player, pos)], false);
            assert!(world.entities_in_sphere(Vec3::ZERO, 500.0).contains(&ids[0]), "{name}");

            let mut sink = RecordingSink::new();
            let report = SonicAttack::default().resolve(
                &attacker(alpha, Some(4)),
                &world,
                &mut ScriptedRng::new(),
                &mut sink,
            );
            assert!(report.hit(ids[0]).is_none(), "{name}");
            assert_eq!(report.skip_reason(ids[0]), Some(SkipReason::OutOfRange), "{name}");
            let touched = sink.effects.iter().any(|e| match e {
                AppliedEffect::Damage { target, .. }
                | AppliedEffect::Velocity { target, .. }
                | AppliedEffect::ViewPunch { target, .. }
                | AppliedEffect::Force { target, .. }
                | AppliedEffect::Torque { target, .. } => *target == ids[0],
                _ => false,
            });
            assert!(!touched, "{name}");
        }
    }

    #[test]
    fn kin_and_self_skipped() {
        let (world, alpha, ids) = world_with(
            &[
                (EntityClass::Hound, Vec3::new(100.0, 0.0, 0.0)),
                (EntityClass::AlphaHound, Vec3::new(150.0, 0.0, 0.0)),
            ],
            false,
        );
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut RecordingSink::new(),
        );
        assert!(report.hits.is_empty());
        assert_eq!(report.skip_reason(alpha), Some(SkipReason::SameSpecies));
        assert_eq!(report.skip_reason(ids[0]), Some(SkipReason::SameSpecies));
        assert_eq!(report.skip_reason(ids[1]), Some(SkipReason::SameSpecies));
    }

    #[test]
    fn untargetable_and_inert_skipped() {
        let (world, alpha, ids) = world_with(
            &[
                (EntityClass::Player, Vec3::new(100.0, 0.0, 0.0)),
                (EntityClass::Prop, Vec3::new(100.0, 50.0, 0.0)),
            ],
            false,
        );
        let cfg = SonicAttack::default();
        let atk = attacker(alpha, None);
        let ghost = world.entity(ids[0]).unwrap().clone().untargetable();
        let inert = world.entity(ids[1]).unwrap().clone().with_flags(false, false);
        assert_eq!(
            cfg.adjust(&atk, &ghost, true),
            crate::Adjustment::Skip(SkipReason::NoTarget)
        );
        assert_eq!(
            cfg.adjust(&atk, &inert, true),
            crate::Adjustment::Skip(SkipReason::NotEligible)
        );
    }

    #[test]
    fn squad_bonus() {
        let cfg = SonicAttack::default();
        assert_eq!(cfg.squad_multiplier(None), 1.0);
        assert_eq!(cfg.squad_multiplier(Some(1)), 1.0);
        assert_eq!(cfg.squad_multiplier(Some(3)), 1.5);

        let pos = Vec3::new(100.0, 0.0, 0.0);
        let (world, alpha, ids) = world_with(&[(EntityClass::Npc, pos)], false);
        let report = cfg.resolve(
            &attacker(alpha, Some(3)),
            &world,
            &mut ScriptedRng::new(),
            &mut RecordingSink::new(),
        );
        assert!(close(report.hit(ids[0]).unwrap().adjuster, falloff(pos) * 1.5));
    }
}

// ── Cover ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cover {
    use ph_core::{EntityClass, ScriptedRng, Vec3};

    use super::helpers::{attacker, close, falloff, world_with};
    use crate::{RecordingSink, SkipReason, SonicAttack};

    #[test]
    fn occluded_player_takes_half() {
        let pos = Vec3::new(300.0, 0.0, 0.0);
        let (world, alpha, ids) = world_with(&[(EntityClass::Player, pos)], true);
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut RecordingSink::new(),
        );
        let hit = report.hit(ids[0]).unwrap();
        assert!(!hit.visible);
        assert!(close(hit.adjuster, falloff(pos) * 0.5));
    }

    #[test]
    fn breakables_hit_through_walls() {
        let (world, alpha, ids) = world_with(
            &[
                (EntityClass::Breakable, Vec3::new(300.0, 0.0, 0.0)),
                (EntityClass::Pushable, Vec3::new(300.0, 20.0, 0.0)),
            ],
            true,
        );
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut RecordingSink::new(),
        );
        // No half-damage for brushes: full adjuster.
        let pos = Vec3::new(300.0, 0.0, 0.0);
        assert!(close(report.hit(ids[0]).unwrap().adjuster, falloff(pos)));
        assert!(report.hit(ids[1]).is_some());
    }

    #[test]
    fn occluded_creature_skipped() {
        let (world, alpha, ids) = world_with(
            &[
                (EntityClass::Npc, Vec3::new(300.0, 0.0, 0.0)),
                (EntityClass::Prop, Vec3::new(300.0, 10.0, 0.0)),
            ],
            true,
        );
        let mut sink = RecordingSink::new();
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut sink,
        );
        assert_eq!(report.skip_reason(ids[0]), Some(SkipReason::Occluded));
        assert_eq!(report.skip_reason(ids[1]), Some(SkipReason::Occluded));
        assert!(sink.damage_to(ids[0]).is_empty());
    }
}

// ── Effects ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod effects {
    use ph_core::{Angles, EntityClass, ScriptedRng, Vec3};
    use ph_spatial::{EntityIndexBuilder, WorldEntity};

    use super::helpers::{attacker, close, falloff, world_with};
    use crate::{AppliedEffect, DamageKind, ParticleEffect, RecordingSink, SonicAttack, SoundCue};

    #[test]
    fn sound_and_particles_first_once() {
        let (world, alpha, _) = world_with(
            &[
                (EntityClass::Player, Vec3::new(100.0, 0.0, 0.0)),
                (EntityClass::Npc, Vec3::new(120.0, 30.0, 0.0)),
            ],
            false,
        );
        let mut sink = RecordingSink::new();
        SonicAttack::default().resolve(
            &attacker(alpha, Some(3)),
            &world,
            &mut ScriptedRng::new(),
            &mut sink,
        );
        assert_eq!(sink.effects[0], AppliedEffect::Sound { source: alpha, cue: SoundCue::SonicAttack });
        assert_eq!(
            sink.effects[1],
            AppliedEffect::Particles { effect: ParticleEffect::Shockwave, origin: Vec3::ZERO, scale: 3.0 }
        );
        assert_eq!(sink.count_sound(SoundCue::SonicAttack), 1);
        let particles = sink
            .effects
            .iter()
            .filter(|e| matches!(e, AppliedEffect::Particles { .. }))
            .count();
        assert_eq!(particles, 1);
    }

    #[test]
    fn solo_particle_scale_zero_even_with_no_targets() {
        let (world, alpha, _) = world_with(&[], false);
        let mut sink = RecordingSink::new();
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut sink,
        );
        assert!(report.hits.is_empty());
        assert!(matches!(sink.effects[1], AppliedEffect::Particles { scale, .. } if scale == 0.0));
    }

    #[test]
    fn damage_kind_and_force() {
        let pos = Vec3::new(100.0, 0.0, 0.0);
        let (world, alpha, ids) = world_with(&[(EntityClass::Npc, pos)], false);
        let mut sink = RecordingSink::new();
        SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut sink,
        );
        let dmg = sink.damage_to(ids[0]);
        assert_eq!(dmg.len(), 1);
        assert_eq!(dmg[0].attacker, alpha);
        assert!(dmg[0].kind.contains(DamageKind::SONIC));
        assert!(dmg[0].kind.contains(DamageKind::ALWAYS_GIB));
        assert!(close(dmg[0].force.x, dmg[0].amount * 300.0));
        assert!(close(dmg[0].force.y, 0.0));
    }

    #[test]
    fn explosive_force_clamped() {
        let cfg = SonicAttack { force_clamp: 100.0, ..SonicAttack::default() };
        let (world, alpha, ids) = world_with(&[(EntityClass::Npc, Vec3::new(50.0, 0.0, 0.0))], false);
        let mut sink = RecordingSink::new();
        cfg.resolve(&attacker(alpha, None), &world, &mut ScriptedRng::new(), &mut sink);
        assert!(close(sink.damage_to(ids[0])[0].force.length(), 100.0));
    }

    #[test]
    fn player_thrown_and_punched() {
        let pos = Vec3::new(100.0, 0.0, 0.0);
        let mut b = EntityIndexBuilder::new();
        let alpha = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let player = b.add(|id| {
            let mut e = WorldEntity::new(id, EntityClass::Player, pos);
            e.velocity = Vec3::new(10.0, 20.0, -300.0);
            e
        });
        let world = b.build();

        let mut rng = ScriptedRng::new().with_ints([7, -20]);
        let mut sink = RecordingSink::new();
        SonicAttack::default().resolve(&attacker(alpha, None), &world, &mut rng, &mut sink);

        let adj = falloff(pos);
        let velocity = sink.effects.iter().find_map(|e| match e {
            AppliedEffect::Velocity { target, velocity } if *target == player => Some(*velocity),
            _ => None,
        });
        let v = velocity.unwrap();
        assert!(close(v.x, 10.0 + 150.0 * adj));
        assert!(close(v.y, 20.0));
        // Vertical speed is overwritten, not added.
        assert!(close(v.z, 50.0 * adj));

        let punch = sink.effects.iter().find_map(|e| match e {
            AppliedEffect::ViewPunch { punch, .. } => Some(*punch),
            _ => None,
        });
        assert_eq!(punch, Some(Angles::new(7.0, 0.0, -20.0)));
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn punch_only_for_players() {
        let (world, alpha, _) = world_with(&[(EntityClass::Npc, Vec3::new(100.0, 0.0, 0.0))], false);
        let mut rng = ScriptedRng::new();
        let mut sink = RecordingSink::new();
        SonicAttack::default().resolve(&attacker(alpha, None), &world, &mut rng, &mut sink);
        assert_eq!(rng.draws(), 0);
        assert!(!sink.effects.iter().any(|e| matches!(e, AppliedEffect::ViewPunch { .. })));
    }

    #[test]
    fn physics_props_pushed_without_damage() {
        let pos = Vec3::new(100.0, 0.0, 0.0);
        let mut b = EntityIndexBuilder::new();
        let alpha = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let prop = b.add(|id| WorldEntity::new(id, EntityClass::Prop, pos).with_flags(false, true));
        let world = b.build();

        let mut sink = RecordingSink::new();
        let report = SonicAttack::default().resolve(
            &attacker(alpha, None),
            &world,
            &mut ScriptedRng::new(),
            &mut sink,
        );
        let adj = falloff(pos);
        let hit = report.hit(prop).unwrap();
        assert!(hit.physics);
        assert!(hit.damage.is_none());
        assert!(sink.damage_to(prop).is_empty());

        let force = sink.effects.iter().find_map(|e| match e {
            AppliedEffect::Force { force, .. } => Some(*force),
            _ => None,
        });
        let torque = sink.effects.iter().find_map(|e| match e {
            AppliedEffect::Torque { torque, .. } => Some(*torque),
            _ => None,
        });
        let (f, t) = (force.unwrap(), torque.unwrap());
        assert!(close(f.x, adj * 8000.0));
        assert!(close(f.z, 0.2 * adj * 8000.0));
        assert!(close(t.x, adj * 8000.0));
        assert!(close(t.z, 0.0));
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{CombatError, SonicAttack};

    #[test]
    fn default_is_valid() {
        assert!(SonicAttack::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_radius() {
        for r in [0.0, -5.0, f32::NAN] {
            let cfg = SonicAttack { max_radius: r, ..SonicAttack::default() };
            assert!(matches!(cfg.validate(), Err(CombatError::InvalidConfig(_))));
        }
    }

    #[test]
    fn rejects_negative_punch() {
        let cfg = SonicAttack { view_punch: -1, ..SonicAttack::default() };
        assert!(cfg.validate().is_err());
    }
}

// ── Leap kinematics ──────────────────────────────────────────────────────────

#[cfg(test)]
mod leap {
    use ph_core::{Angles, Vec3};

    use super::helpers::close;
    use crate::{hop_back_velocity, leap_velocity};

    #[test]
    fn hop_back() {
        let v = hop_back_velocity(Angles::from_yaw(0.0), 600.0);
        assert!(close(v.x, -200.0));
        assert!(close(v.y, 0.0));
        assert!(close(v.z, (2.0f32 * 600.0 * 36.0).sqrt()));
    }

    #[test]
    fn leap_reaches_enemy_eyes() {
        let eye = Vec3::new(200.0, 0.0, 64.0);
        let v = leap_velocity(Vec3::ZERO, Angles::from_yaw(0.0), Some(eye), 600.0);
        let speed = (2.0f32 * 600.0 * 64.0).sqrt();
        let time = speed / 600.0;
        assert!(close(v.z, speed));
        assert!(close(v.x, 200.0 / time));
    }

    #[test]
    fn leap_height_clamped() {
        let low = leap_velocity(Vec3::ZERO, Angles::default(), Some(Vec3::new(50.0, 0.0, -40.0)), 600.0);
        assert!(close(low.z, (2.0f32 * 600.0 * 16.0).sqrt()));
        let high = leap_velocity(Vec3::ZERO, Angles::default(), Some(Vec3::new(10.0, 0.0, 400.0)), 600.0);
        assert!(close(high.z, (2.0f32 * 600.0 * 120.0).sqrt()));
    }

    #[test]
    fn leap_speed_capped() {
        let v = leap_velocity(Vec3::ZERO, Angles::default(), Some(Vec3::new(2_000.0, 0.0, 64.0)), 600.0);
        assert!(close(v.length(), 650.0));
    }

    #[test]
    fn blind_hop_without_enemy() {
        let v = leap_velocity(Vec3::ZERO, Angles::from_yaw(90.0), None, 600.0);
        assert!(close(v.x, 0.0));
        assert!(close(v.y, 350.0));
        assert!(close(v.z, 350.0));
    }

    #[test]
    fn zero_gravity_floored() {
        let v = leap_velocity(Vec3::ZERO, Angles::default(), Some(Vec3::new(100.0, 0.0, 64.0)), 0.0);
        assert!(v.x.is_finite() && v.z.is_finite());
        assert!(close(v.z, 128.0f32.sqrt()));
    }
}
