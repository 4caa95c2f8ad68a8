//! World entities and the read-only query surface the creature AI uses.
//!
//! Creatures never own the world.  Every policy, task, and attack reaches
//! other entities through a `&dyn WorldQuery`, so a host engine can back it
//! with its own collision system while tests use [`EntityIndex`].
//!
//! [`EntityIndex`]: crate::EntityIndex

use ph_core::{Aabb, EntityClass, EntityId, Vec3};

// ── WorldEntity ───────────────────────────────────────────────────────────────

/// Snapshot of one world entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldEntity {
    pub id:     EntityId,
    pub class:  EntityClass,
    /// Feet position.
    pub origin: Vec3,
    /// Collision hull relative to `origin`.
    pub hull:   Aabb,
    /// Eye height above `origin`.
    pub eye_height: f32,
    pub velocity:   Vec3,
    pub health:     f32,
    /// Accepts damage events.
    pub takes_damage: bool,
    /// Has a simulated physics body that accepts forces.
    pub has_physics: bool,
    /// Flagged as "not a target"; area attacks ignore it.
    pub no_target: bool,
}

impl WorldEntity {
    /// A damageable entity with a default 32×32×64 hull.
    pub fn new(id: EntityId, class: EntityClass, origin: Vec3) -> Self {
        Self {
            id,
            class,
            origin,
            hull: Aabb::new(Vec3::new(-16.0, -16.0, 0.0), Vec3::new(16.0, 16.0, 64.0)),
            eye_height: 48.0,
            velocity: Vec3::ZERO,
            health: 100.0,
            takes_damage: true,
            has_physics: false,
            no_target: false,
        }
    }

    pub fn with_hull(mut self, hull: Aabb) -> Self {
        self.hull = hull;
        self
    }

    pub fn with_eye_height(mut self, h: f32) -> Self {
        self.eye_height = h;
        self
    }

    /// Toggle damage acceptance and physics-body presence.
    pub fn with_flags(mut self, takes_damage: bool, has_physics: bool) -> Self {
        self.takes_damage = takes_damage;
        self.has_physics = has_physics;
        self
    }

    pub fn untargetable(mut self) -> Self {
        self.no_target = true;
        self
    }

    /// Hull in world space.
    #[inline]
    pub fn abs_bounds(&self) -> Aabb {
        self.hull.translated(self.origin)
    }

    /// Center of the world-space hull.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.abs_bounds().center()
    }

    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.origin + Vec3::new(0.0, 0.0, self.eye_height)
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.class.is_player()
    }
}

// ── WorldQuery ────────────────────────────────────────────────────────────────

/// Read-only world access.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one world snapshot can be shared
/// across Rayon workers during the parallel selection phase.
pub trait WorldQuery: Send + Sync {
    fn entity(&self, id: EntityId) -> Option<&WorldEntity>;

    /// Entities whose world hull comes within `radius` of `center`, in
    /// ascending `EntityId` order.
    fn entities_in_sphere(&self, center: Vec3, radius: f32) -> Vec<EntityId>;

    /// Entities whose world hull strictly overlaps `bounds`, in ascending
    /// `EntityId` order.
    fn entities_in_box(&self, bounds: Aabb) -> Vec<EntityId>;

    /// Unobstructed line of sight from `from` to `to`.
    fn is_visible(&self, from: Vec3, to: Vec3) -> bool;

    /// First entity (other than `ignore`) of `class` whose hull overlaps
    /// `hull`.  Hound classes match each other.
    fn overlaps_class(&self, hull: Aabb, class: EntityClass, ignore: EntityId) -> Option<EntityId> {
        self.entities_in_box(hull).into_iter().find(|&id| {
            id != ignore
                && self.entity(id).is_some_and(|e| {
                    e.class == class || (class.is_hound_kin() && e.class.is_hound_kin())
                })
        })
    }
}
