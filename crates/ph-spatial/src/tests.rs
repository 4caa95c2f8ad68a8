//! Unit tests for ph-spatial.
//!
//! All tests use a hand-built world so they run without a host engine.

#[cfg(test)]
mod helpers {
    use ph_core::{Aabb, EntityClass, EntityId, Vec3};
    use crate::{EntityIndex, EntityIndexBuilder, WorldEntity};

    /// Entities along +X:
    ///   0: alpha hound at origin
    ///   1: player at x=100
    ///   2: hound at x=490  (hull edge at 474, inside a 500 sphere)
    ///   3: prop at x=600   (hull edge at 584, outside)
    ///
    /// One wall between x=200 and x=220 spanning y ∈ [-50, 50].
    pub fn line_world() -> (EntityIndex, [EntityId; 4]) {
        let mut b = EntityIndexBuilder::new();
        let a = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let p = b.add(|id| WorldEntity::new(id, EntityClass::Player, Vec3::new(100.0, 0.0, 0.0)));
        let h = b.add(|id| WorldEntity::new(id, EntityClass::Hound, Vec3::new(490.0, 0.0, 0.0)));
        let c = b.add(|id| WorldEntity::new(id, EntityClass::Prop, Vec3::new(600.0, 0.0, 0.0)));
        b.add_occluder(Aabb::new(Vec3::new(200.0, -50.0, -10.0), Vec3::new(220.0, 50.0, 200.0)));
        (b.build(), [a, p, h, c])
    }
}

// ── Index queries ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use ph_core::{Aabb, EntityClass, EntityId, Vec3};
    use crate::{EntityIndexBuilder, SpatialError, WorldEntity, WorldQuery};

    #[test]
    fn empty_index() {
        let world = crate::EntityIndex::empty();
        assert!(world.is_empty());
        assert!(world.entities_in_sphere(Vec3::ZERO, 1_000.0).is_empty());
        assert!(world.is_visible(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)));
    }

    #[test]
    fn sphere_query_uses_hull_distance() {
        let (world, [a, p, h, _]) = super::helpers::line_world();
        assert_eq!(world.entities_in_sphere(Vec3::ZERO, 500.0), vec![a, p, h]);
    }

    #[test]
    fn sphere_results_sorted() {
        let (world, ids) = super::helpers::line_world();
        let found = world.entities_in_sphere(Vec3::new(300.0, 0.0, 0.0), 1_000.0);
        assert_eq!(found, ids.to_vec());
    }

    #[test]
    fn box_query_is_strict() {
        let (world, [a, ..]) = super::helpers::line_world();
        // Alpha hull spans x ∈ [-16, 16]; a box starting at 16 only touches.
        let touching = Aabb::new(Vec3::new(16.0, -1.0, 0.0), Vec3::new(20.0, 1.0, 10.0));
        assert!(world.entities_in_box(touching).is_empty());
        let overlapping = Aabb::new(Vec3::new(10.0, -1.0, 0.0), Vec3::new(20.0, 1.0, 10.0));
        assert_eq!(world.entities_in_box(overlapping), vec![a]);
    }

    #[test]
    fn overlaps_class_treats_hounds_as_kin() {
        let mut b = EntityIndexBuilder::new();
        let me = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let mate = b.add(|id| WorldEntity::new(id, EntityClass::Hound, Vec3::new(10.0, 0.0, 0.0)));
        let world = b.build();
        let hull = world.entity(me).unwrap().abs_bounds();
        assert_eq!(world.overlaps_class(hull, EntityClass::AlphaHound, me), Some(mate));
        assert_eq!(world.overlaps_class(hull, EntityClass::Player, me), None);
    }

    #[test]
    fn overlaps_class_ignores_self() {
        let mut b = EntityIndexBuilder::new();
        let me = b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, Vec3::ZERO));
        let world = b.build();
        let hull = world.entity(me).unwrap().abs_bounds();
        assert_eq!(world.overlaps_class(hull, EntityClass::AlphaHound, me), None);
    }

    #[test]
    fn wall_blocks_sight() {
        let (world, _) = super::helpers::line_world();
        assert!(world.is_visible(Vec3::new(0.0, 0.0, 20.0), Vec3::new(150.0, 0.0, 20.0)));
        assert!(!world.is_visible(Vec3::new(0.0, 0.0, 20.0), Vec3::new(300.0, 0.0, 20.0)));
        // Passing beside the wall.
        assert!(world.is_visible(Vec3::new(0.0, 100.0, 20.0), Vec3::new(300.0, 100.0, 20.0)));
    }

    #[test]
    fn set_origin_reindexes() {
        let (mut world, [_, p, ..]) = super::helpers::line_world();
        world.set_origin(p, Vec3::new(2_000.0, 0.0, 0.0)).unwrap();
        assert!(!world.entities_in_sphere(Vec3::ZERO, 500.0).contains(&p));
        assert!(world.entities_in_sphere(Vec3::new(2_000.0, 0.0, 0.0), 1.0).contains(&p));
        assert_eq!(world.entity(p).unwrap().origin.x, 2_000.0);
    }

    #[test]
    fn set_origin_unknown_entity() {
        let (mut world, _) = super::helpers::line_world();
        let err = world.set_origin(EntityId(99), Vec3::ZERO).unwrap_err();
        assert!(matches!(err, SpatialError::EntityNotFound(EntityId(99))));
    }

    #[test]
    fn inverted_hull_rejected() {
        let mut b = EntityIndexBuilder::new();
        let bad = WorldEntity::new(EntityId(0), EntityClass::Prop, Vec3::ZERO)
            .with_hull(Aabb::new(Vec3::splat(1.0), Vec3::splat(-1.0)));
        assert!(matches!(b.add_entity(bad), Err(SpatialError::InvalidBounds { .. })));
        assert_eq!(b.entity_count(), 0);
    }

    #[test]
    fn entity_helpers() {
        let e = WorldEntity::new(EntityId(0), EntityClass::Player, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(e.center(), Vec3::new(10.0, 0.0, 32.0));
        assert_eq!(e.eye_position(), Vec3::new(10.0, 0.0, 48.0));
        assert!(e.is_player());
    }
}

// ── Navigation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod nav {
    use ph_core::{Aabb, Vec3};
    use crate::{
        EntityIndex, EntityIndexBuilder, Navigator, RadialGoal, RingLosFinder,
        StraightLineNavigator, Tactical,
    };

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-2
    }

    fn arc(clockwise: bool) -> RadialGoal {
        RadialGoal {
            destination: Vec3::ZERO,
            center: Vec3::ZERO,
            radius: 200.0,
            arc_degrees: 90.0,
            step: 175.0,
            clockwise,
        }
    }

    #[test]
    fn radial_arc_counter_clockwise() {
        let world = EntityIndex::empty();
        let path = StraightLineNavigator
            .set_radial_goal(Vec3::new(200.0, 0.0, 0.0), &arc(false), &world)
            .unwrap();
        assert_eq!(path.waypoints.len(), 2, "175-unit steps over a 90° arc of r=200");
        assert!(close(path.last().unwrap(), Vec3::new(0.0, 200.0, 0.0)));
    }

    #[test]
    fn radial_arc_clockwise() {
        let world = EntityIndex::empty();
        let path = StraightLineNavigator
            .set_radial_goal(Vec3::new(200.0, 0.0, 0.0), &arc(true), &world)
            .unwrap();
        assert!(close(path.last().unwrap(), Vec3::new(0.0, -200.0, 0.0)));
    }

    #[test]
    fn radial_arc_blocked() {
        let mut b = EntityIndexBuilder::new();
        b.add_occluder(Aabb::new(Vec3::new(100.0, 50.0, -10.0), Vec3::new(250.0, 80.0, 10.0)));
        let world = b.build();
        assert!(StraightLineNavigator
            .set_radial_goal(Vec3::new(200.0, 0.0, 0.0), &arc(false), &world)
            .is_none());
    }

    #[test]
    fn zero_radius_has_no_route() {
        let world = EntityIndex::empty();
        let goal = RadialGoal { radius: 0.0, ..arc(false) };
        assert!(StraightLineNavigator.set_radial_goal(Vec3::ZERO, &goal, &world).is_none());
    }

    #[test]
    fn point_goal_within_tolerance() {
        let world = EntityIndex::empty();
        let path = StraightLineNavigator
            .set_goal(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0), 30.0, &world)
            .unwrap();
        assert!(path.waypoints.is_empty());
    }

    #[test]
    fn path_length() {
        let world = EntityIndex::empty();
        let path = StraightLineNavigator
            .set_goal(Vec3::ZERO, Vec3::new(300.0, 400.0, 0.0), 1.0, &world)
            .unwrap();
        assert!((path.length_from(Vec3::ZERO) - 500.0).abs() < 1e-3);
    }

    #[test]
    fn los_prefers_nearest_ring_point() {
        let world = EntityIndex::empty();
        let spot = RingLosFinder::default()
            .find_los(Vec3::new(300.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 0.0, 48.0), 100.0, 450.0, &world)
            .unwrap();
        assert!(close(spot, Vec3::new(275.0, 0.0, 0.0)), "got {spot}");
    }

    #[test]
    fn los_none_when_threat_boxed_in() {
        let mut b = EntityIndexBuilder::new();
        b.add_occluder(Aabb::around(Vec3::new(0.0, 0.0, 48.0), 50.0));
        let world = b.build();
        let spot = RingLosFinder::default().find_los(
            Vec3::new(300.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 48.0),
            100.0,
            450.0,
            &world,
        );
        assert!(spot.is_none());
    }
}
