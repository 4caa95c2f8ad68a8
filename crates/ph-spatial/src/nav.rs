//! Navigation collaborators used by movement tasks.
//!
//! Path planning proper belongs to the host.  The creature only needs two
//! questions answered:
//!
//! - [`Navigator`]: "can I build a path to this goal?"  (plain point goal or
//!   a radial arc around a threat).
//! - [`Tactical`]: "where can I stand to see this threat?"
//!
//! The default implementations plan against the occluder boxes of any
//! [`WorldQuery`]: a leg is walkable when the straight line between its
//! endpoints is unobstructed.

use ph_core::Vec3;

use crate::world::WorldQuery;

// ── Goals and paths ───────────────────────────────────────────────────────────

/// Strafe goal: move along a circle around `center` toward `destination`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialGoal {
    /// Where the strafe is heading (the threat's last known position,
    /// dropped to the floor).
    pub destination: Vec3,
    /// Circle center (the threat's world-space center).
    pub center: Vec3,
    pub radius: f32,
    /// Total sweep in degrees.
    pub arc_degrees: f32,
    /// Distance between consecutive waypoints along the arc.
    pub step: f32,
    pub clockwise: bool,
}

/// A planned path as a list of waypoints, excluding the start.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPath {
    pub waypoints: Vec<Vec3>,
}

impl NavPath {
    /// Total polyline length starting at `from`.
    pub fn length_from(&self, from: Vec3) -> f32 {
        let mut prev = from;
        let mut total = 0.0;
        for &w in &self.waypoints {
            total += prev.distance(w);
            prev = w;
        }
        total
    }

    pub fn last(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// Path-building service.
///
/// Implementations must be `Send + Sync`; a single navigator is shared by
/// every agent in a simulation.
pub trait Navigator: Send + Sync {
    /// Plan a strafe arc.  `None` means no route.
    fn set_radial_goal(&self, from: Vec3, goal: &RadialGoal, world: &dyn WorldQuery) -> Option<NavPath>;

    /// Plan to a point, stopping within `tolerance`.  `None` means no route.
    fn set_goal(&self, from: Vec3, goal: Vec3, tolerance: f32, world: &dyn WorldQuery) -> Option<NavPath>;
}

/// Tactical position search.
pub trait Tactical: Send + Sync {
    /// A standing position between `min_range` and `max_range` of
    /// `threat_pos` from which `threat_eye` is visible.  Candidates nearer to
    /// `from` are preferred.
    fn find_los(
        &self,
        from: Vec3,
        threat_pos: Vec3,
        threat_eye: Vec3,
        min_range: f32,
        max_range: f32,
        world: &dyn WorldQuery,
    ) -> Option<Vec3>;
}

// ── StraightLineNavigator ─────────────────────────────────────────────────────

/// Plans straight legs between waypoints and accepts a path only when every
/// leg has clear line of sight.
pub struct StraightLineNavigator;

fn legs_clear(from: Vec3, waypoints: &[Vec3], world: &dyn WorldQuery) -> bool {
    let mut prev = from;
    for &w in waypoints {
        if !world.is_visible(prev, w) {
            return false;
        }
        prev = w;
    }
    true
}

impl Navigator for StraightLineNavigator {
    fn set_radial_goal(&self, from: Vec3, goal: &RadialGoal, world: &dyn WorldQuery) -> Option<NavPath> {
        if goal.radius <= 0.0 || goal.step <= 0.0 {
            return None;
        }
        let offset = from - goal.center;
        let start = offset.y.atan2(offset.x);
        let step_rad = goal.step / goal.radius;
        let sweep = goal.arc_degrees.to_radians();
        let sign = if goal.clockwise { -1.0 } else { 1.0 };

        let mut waypoints = Vec::new();
        let mut swept = 0.0_f32;
        while swept < sweep {
            swept = (swept + step_rad).min(sweep);
            let a = start + sign * swept;
            waypoints.push(Vec3::new(
                goal.center.x + goal.radius * a.cos(),
                goal.center.y + goal.radius * a.sin(),
                goal.destination.z,
            ));
        }

        legs_clear(from, &waypoints, world).then_some(NavPath { waypoints })
    }

    fn set_goal(&self, from: Vec3, goal: Vec3, tolerance: f32, world: &dyn WorldQuery) -> Option<NavPath> {
        if from.distance(goal) <= tolerance {
            return Some(NavPath::default());
        }
        world.is_visible(from, goal).then(|| NavPath { waypoints: vec![goal] })
    }
}

// ── RingLosFinder ─────────────────────────────────────────────────────────────

/// Samples rings of candidate positions around the threat.
pub struct RingLosFinder {
    /// Candidates per ring.
    pub samples: u32,
    /// Rings between `min_range` and `max_range` (inclusive of both).
    pub rings: u32,
    /// Eye height used for the visibility test from a candidate.
    pub eye_height: f32,
}

impl Default for RingLosFinder {
    fn default() -> Self {
        Self { samples: 16, rings: 3, eye_height: 24.0 }
    }
}

impl Tactical for RingLosFinder {
    fn find_los(
        &self,
        from: Vec3,
        threat_pos: Vec3,
        threat_eye: Vec3,
        min_range: f32,
        max_range: f32,
        world: &dyn WorldQuery,
    ) -> Option<Vec3> {
        if max_range < min_range || self.samples == 0 {
            return None;
        }
        let rings = self.rings.max(1);
        let eye = Vec3::new(0.0, 0.0, self.eye_height);

        let mut candidates = Vec::with_capacity((self.samples * rings) as usize);
        for r in 0..rings {
            let range = if rings == 1 {
                min_range
            } else {
                min_range + (max_range - min_range) * r as f32 / (rings - 1) as f32
            };
            for s in 0..self.samples {
                let a = std::f32::consts::TAU * s as f32 / self.samples as f32;
                candidates.push(Vec3::new(
                    threat_pos.x + range * a.cos(),
                    threat_pos.y + range * a.sin(),
                    threat_pos.z,
                ));
            }
        }
        candidates.sort_by(|a, b| from.distance(*a).total_cmp(&from.distance(*b)));

        candidates
            .into_iter()
            .find(|&c| world.is_visible(c + eye, threat_eye))
    }
}
