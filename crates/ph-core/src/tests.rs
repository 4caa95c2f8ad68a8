//! Unit tests for ph-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, EntityId, SquadHandle};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(EntityId::default(), EntityId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(SquadHandle::new(3, 1).to_string(), "SquadHandle(3v1)");
    }

    #[test]
    fn handles_differ_by_generation() {
        assert_ne!(SquadHandle::new(0, 0), SquadHandle::new(0, 1));
        assert_eq!(SquadHandle::new(5, 2).index(), 5);
    }
}

#[cfg(test)]
mod math {
    use crate::{Aabb, Angles, Vec3};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn zero_angles_face_positive_x() {
        let (f, r, u) = Angles::default().basis();
        assert!(close(f, Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(r, Vec3::new(0.0, -1.0, 0.0)));
        assert!(close(u, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn yaw_ninety_faces_positive_y() {
        assert!(close(Angles::from_yaw(90.0).forward(), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn positive_pitch_looks_down() {
        let f = Angles::new(90.0, 0.0, 0.0).forward();
        assert!(close(f, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        assert!(close(Vec3::new(3.0, 4.0, 0.0).normalized(), Vec3::new(0.6, 0.8, 0.0)));
    }

    #[test]
    fn aabb_intersection_excludes_touching() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let c = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn segment_through_box() {
        let wall = Aabb::new(Vec3::new(10.0, -50.0, -50.0), Vec3::new(12.0, 50.0, 50.0));
        assert!(wall.segment_hits(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)));
        assert!(!wall.segment_hits(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)));
        assert!(!wall.segment_hits(Vec3::new(0.0, 60.0, 0.0), Vec3::new(20.0, 60.0, 0.0)));
    }

    #[test]
    fn translated_box_moves_center() {
        let hull = Aabb::new(Vec3::new(-16.0, -16.0, 0.0), Vec3::new(16.0, 16.0, 36.0));
        let world = hull.translated(Vec3::new(100.0, 0.0, 0.0));
        assert!(close(world.center(), Vec3::new(100.0, 0.0, 18.0)));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, SimTime, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_now_tracks_ticks() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.now(), SimTime(0.0));
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), SimTime(1.0));
    }

    #[test]
    fn deadlines_compare_inclusively() {
        let now = SimTime(3.0);
        assert!(now.reached(SimTime(3.0)));
        assert!(now.reached(SimTime(2.5)));
        assert!(!now.reached(now + 0.1));
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.1);
        assert_eq!(clock.ticks_for_secs(1.0), 10);
        assert_eq!(clock.ticks_for_secs(0.05), 1);
    }

    #[test]
    fn default_config_end_tick() {
        let cfg = SimConfig { total_ticks: 50, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(50));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, RandomSource, ScriptedRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.random_int(0, 1000), r2.random_int(0, 1000));
        }
    }

    #[test]
    fn random_int_is_inclusive() {
        let mut rng = AgentRng::new(7, AgentId(3));
        let mut seen = [false; 5];
        for _ in 0..2000 {
            let v = rng.random_int(0, 4);
            assert!((0..=4).contains(&v));
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every face drawn at least once");
    }

    #[test]
    fn random_float_half_open() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v = rng.random_float(5.0, 8.0);
            assert!((5.0..8.0).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_returns_lo() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(rng.random_int(3, 3), 3);
        assert_eq!(rng.random_float(2.0, 2.0), 2.0);
    }

    #[test]
    fn scripted_replays_and_counts() {
        let mut rng = ScriptedRng::new().with_ints([4, 99]).with_floats([6.5]);
        assert_eq!(rng.random_int(0, 5), 4);
        assert_eq!(rng.random_int(0, 5), 5, "clamped into range");
        assert_eq!(rng.random_int(-2, 5), -2, "exhausted queue yields lo");
        assert_eq!(rng.random_float(5.0, 8.0), 6.5);
        assert_eq!(rng.draws(), 4);
    }
}

#[cfg(test)]
mod condition {
    use crate::{Condition, ConditionSet};

    #[test]
    fn insert_remove_contains() {
        let mut set = ConditionSet::new();
        set.insert(Condition::HeavyDamage);
        set.insert(Condition::GroupAttack);
        assert!(set.contains(Condition::HeavyDamage));
        assert_eq!(set.len(), 2);
        set.remove(Condition::HeavyDamage);
        assert!(!set.contains(Condition::HeavyDamage));
    }

    #[test]
    fn retain_drops_perceptual_only() {
        let mut set: ConditionSet =
            [Condition::CanRangeAttack1, Condition::GroupRally, Condition::LightDamage]
                .into_iter()
                .collect();
        set.retain(Condition::is_squad_signal);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Condition::GroupRally]);
    }

    #[test]
    fn names_round_trip() {
        for c in Condition::ALL {
            assert_eq!(Condition::parse(c.as_str()), Some(c));
        }
        assert_eq!(Condition::parse("bogus"), None);
    }

    #[test]
    fn intersects() {
        let a = ConditionSet::new().with(Condition::NewEnemy);
        let b = ConditionSet::new().with(Condition::NewEnemy).with(Condition::EnemyDead);
        assert!(a.intersects(b));
        assert!(!a.intersects(ConditionSet::EMPTY));
    }
}

#[cfg(test)]
mod class {
    use crate::EntityClass;

    #[test]
    fn kinship() {
        assert!(EntityClass::Hound.is_hound_kin());
        assert!(EntityClass::AlphaHound.is_hound_kin());
        assert!(!EntityClass::Player.is_hound_kin());
    }

    #[test]
    fn cover_exemption() {
        assert!(EntityClass::Breakable.ignores_cover());
        assert!(EntityClass::Pushable.ignores_cover());
        assert!(!EntityClass::Prop.ignores_cover());
    }
}
