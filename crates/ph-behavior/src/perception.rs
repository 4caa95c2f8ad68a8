//! Sight-based perception for the alpha hound.
//!
//! The current enemy is kept while it lives and stays within sight range,
//! visible or not.  A new enemy must be visible, inside the view cone, and
//! is the nearest such player or creature.

use ph_agent::NpcState;
use ph_core::{AgentId, Angles, Condition, ConditionSet, EntityClass, Vec3};
use ph_spatial::WorldEntity;

use crate::think::range_attack_condition;
use crate::{AlphaHound, BasePolicy, Percept, Perception, SelectContext};

const DEFAULT_EYE_HEIGHT: f32 = 48.0;

fn is_hostile(class: EntityClass) -> bool {
    matches!(class, EntityClass::Player | EntityClass::Npc)
}

/// Yaw-only unit direction from `from` to `to`; zero when stacked.
fn flat_dir(from: Vec3, to: Vec3) -> Vec3 {
    let d = to - from;
    Vec3::new(d.x, d.y, 0.0).normalized()
}

impl<B: BasePolicy> AlphaHound<B> {
    fn acquire_enemy<'w>(
        &self,
        pos:     Vec3,
        eye:     Vec3,
        forward: Vec3,
        ctx:     &SelectContext<'w>,
    ) -> Option<&'w WorldEntity> {
        let world = ctx.world;
        world
            .entities_in_sphere(pos, self.config.sight_range)
            .into_iter()
            .filter_map(|id| world.entity(id))
            .filter(|e| is_hostile(e.class) && !e.no_target && e.health > 0.0)
            .filter(|e| forward.dot(flat_dir(pos, e.origin)) >= self.config.field_of_view)
            .filter(|e| world.is_visible(eye, e.eye_position()))
            .min_by(|a, b| {
                a.origin
                    .distance(pos)
                    .total_cmp(&b.origin.distance(pos))
                    .then(a.id.cmp(&b.id))
            })
    }
}

impl<B: BasePolicy> Perception for AlphaHound<B> {
    fn perceive(&self, agent: AgentId, ctx: &SelectContext<'_>) -> Percept {
        let i = agent.index();
        let agents = ctx.agents;
        if agents.state[i] == NpcState::Dead || agents.health[i] <= 0.0 {
            return Percept { state: NpcState::Dead, enemy: None, conditions: ConditionSet::EMPTY };
        }

        let pos = agents.position[i];
        let eye = pos + Vec3::new(0.0, 0.0, ctx.body(agent).map_or(DEFAULT_EYE_HEIGHT, |b| b.eye_height));
        let forward = Angles::from_yaw(agents.angles[i].yaw).forward();
        let previous = agents.enemy[i];
        let mut conditions = ConditionSet::new();

        let mut enemy = None;
        if let Some(prev) = previous {
            match ctx.world.entity(prev) {
                Some(e) if e.health <= 0.0 => conditions.insert(Condition::EnemyDead),
                Some(e) if e.origin.distance(pos) <= self.config.sight_range => enemy = Some(e),
                _ => {}
            }
        }
        if enemy.is_none() && !conditions.contains(Condition::EnemyDead) {
            enemy = self.acquire_enemy(pos, eye, forward, ctx);
        }

        if let Some(e) = enemy {
            if previous != Some(e.id) {
                conditions.insert(Condition::NewEnemy);
            }
            if ctx.world.is_visible(eye, e.eye_position()) {
                conditions.insert(Condition::SeeEnemy);
                let dot = forward.dot(flat_dir(pos, e.origin));
                let dist = e.origin.distance(pos);
                let inside_kin = self.overlapping_kin(agent, agents, ctx.world).is_some();
                if let Some(c) = range_attack_condition(
                    &self.config,
                    dot,
                    dist,
                    ctx.now,
                    agents.next_attack[i],
                    inside_kin,
                ) {
                    conditions.insert(c);
                }
            } else {
                conditions.insert(Condition::WeaponSightOccluded);
            }
        }

        let state = if enemy.is_some() || conditions.contains(Condition::EnemyDead) {
            NpcState::Combat
        } else {
            match agents.state[i] {
                NpcState::Combat => NpcState::Alert,
                NpcState::None   => NpcState::Idle,
                s                => s,
            }
        };

        Percept { state, enemy: enemy.map(|e| e.id), conditions }
    }
}
