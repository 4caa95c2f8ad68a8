//! In-memory world index.
//!
//! # Data layout
//!
//! Entities live in a dense `Vec<WorldEntity>` indexed by `EntityId`.  Two
//! R-trees (via `rstar`) sit beside it:
//!
//! - **entity tree**: world-space hull of every entity, used by sphere and
//!   box queries.  Moving an entity replaces its tree entry.
//! - **occluder tree**: static axis-aligned wall boxes, used by line-of-sight
//!   tests.  A sight line is blocked when it passes through any occluder.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ph_core::{Aabb, EntityId, Vec3};

use crate::error::{SpatialError, SpatialResult};
use crate::world::{WorldEntity, WorldQuery};

// ── R-tree entries ────────────────────────────────────────────────────────────

/// Squared distance from `p` to the closest point of `b`.
fn box_distance_2(b: &Aabb, p: &[f32; 3]) -> f32 {
    let mut d2 = 0.0;
    for (v, lo, hi) in [
        (p[0], b.mins.x, b.maxs.x),
        (p[1], b.mins.y, b.maxs.y),
        (p[2], b.mins.z, b.maxs.z),
    ] {
        let d = if v < lo { lo - v } else if v > hi { v - hi } else { 0.0 };
        d2 += d * d;
    }
    d2
}

#[derive(Clone, PartialEq)]
struct EntityEntry {
    bounds: Aabb,
    id:     EntityId,
}

impl RTreeObject for EntityEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bounds.mins.to_array(), self.bounds.maxs.to_array())
    }
}

impl PointDistance for EntityEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        box_distance_2(&self.bounds, point)
    }
}

#[derive(Clone, PartialEq)]
struct Occluder(Aabb);

impl RTreeObject for Occluder {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.0.mins.to_array(), self.0.maxs.to_array())
    }
}

impl PointDistance for Occluder {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        box_distance_2(&self.0, point)
    }
}

// ── EntityIndex ───────────────────────────────────────────────────────────────

/// World snapshot implementing [`WorldQuery`].
///
/// Do not construct directly; use [`EntityIndexBuilder`].
pub struct EntityIndex {
    entities:  Vec<WorldEntity>,
    tree:      RTree<EntityEntry>,
    occluders: RTree<Occluder>,
}

impl EntityIndex {
    /// An index with no entities and no walls.
    pub fn empty() -> Self {
        EntityIndexBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn occluder_count(&self) -> usize {
        self.occluders.size()
    }

    /// All entities in `EntityId` order.
    pub fn iter(&self) -> impl Iterator<Item = &WorldEntity> {
        self.entities.iter()
    }

    /// Move an entity and re-index its hull.
    pub fn set_origin(&mut self, id: EntityId, origin: Vec3) -> SpatialResult<()> {
        let entity = self
            .entities
            .get_mut(id.index())
            .ok_or(SpatialError::EntityNotFound(id))?;
        let old = EntityEntry { bounds: entity.abs_bounds(), id };
        entity.origin = origin;
        let new = EntityEntry { bounds: entity.abs_bounds(), id };
        self.tree.remove(&old);
        self.tree.insert(new);
        Ok(())
    }

    /// Mutable access to non-positional fields (velocity, health, flags).
    ///
    /// Use [`set_origin`](Self::set_origin) to move an entity; writing
    /// `origin` through this reference leaves the tree stale.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut WorldEntity> {
        self.entities.get_mut(id.index())
    }
}

impl WorldQuery for EntityIndex {
    fn entity(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.get(id.index())
    }

    fn entities_in_sphere(&self, center: Vec3, radius: f32) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn entities_in_box(&self, bounds: Aabb) -> Vec<EntityId> {
        // Every overlapping hull is within the box's circumradius of its center.
        let half = (bounds.maxs - bounds.mins) * 0.5;
        let mut ids: Vec<EntityId> = self
            .tree
            .locate_within_distance(bounds.center().to_array(), half.length_squared())
            .filter(|e| e.bounds.intersects(&bounds))
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn is_visible(&self, from: Vec3, to: Vec3) -> bool {
        let mid = (from + to) * 0.5;
        let reach = (to - from) * 0.5;
        !self
            .occluders
            .locate_within_distance(mid.to_array(), reach.length_squared())
            .any(|o| o.0.segment_hits(from, to))
    }
}

// ── EntityIndexBuilder ────────────────────────────────────────────────────────

/// Construct an [`EntityIndex`] incrementally, then call [`build`](Self::build).
///
/// Entity IDs are assigned sequentially from 0 in insertion order.
///
/// # Example
///
/// ```
/// use ph_core::{EntityClass, Vec3};
/// use ph_spatial::{EntityIndexBuilder, WorldEntity, WorldQuery};
///
/// let mut b = EntityIndexBuilder::new();
/// let p = b.add(|id| WorldEntity::new(id, EntityClass::Player, Vec3::new(100.0, 0.0, 0.0)));
/// let world = b.build();
/// assert_eq!(world.entities_in_sphere(Vec3::ZERO, 500.0), vec![p]);
/// ```
pub struct EntityIndexBuilder {
    entities:  Vec<WorldEntity>,
    occluders: Vec<Aabb>,
}

impl EntityIndexBuilder {
    pub fn new() -> Self {
        Self { entities: Vec::new(), occluders: Vec::new() }
    }

    /// Add an entity built from its freshly assigned ID.
    pub fn add(&mut self, make: impl FnOnce(EntityId) -> WorldEntity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        let mut entity = make(id);
        entity.id = id;
        self.entities.push(entity);
        id
    }

    /// Add a pre-built entity, checking its hull.  The entity's `id` is
    /// overwritten with the assigned one.
    pub fn add_entity(&mut self, mut entity: WorldEntity) -> SpatialResult<EntityId> {
        let id = EntityId(self.entities.len() as u32);
        if !entity.hull.is_valid() {
            return Err(SpatialError::InvalidBounds { id });
        }
        entity.id = id;
        self.entities.push(entity);
        Ok(id)
    }

    /// Add a static wall box that blocks line of sight.
    pub fn add_occluder(&mut self, wall: Aabb) {
        self.occluders.push(wall);
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Bulk-load both trees and produce the index.
    pub fn build(self) -> EntityIndex {
        let entries: Vec<EntityEntry> = self
            .entities
            .iter()
            .map(|e| EntityEntry { bounds: e.abs_bounds(), id: e.id })
            .collect();
        let walls: Vec<Occluder> = self.occluders.into_iter().map(Occluder).collect();
        EntityIndex {
            entities:  self.entities,
            tree:      RTree::bulk_load(entries),
            occluders: RTree::bulk_load(walls),
        }
    }
}

impl Default for EntityIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}
