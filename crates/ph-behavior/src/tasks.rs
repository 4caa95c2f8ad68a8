//! Alpha hound task overrides.

use ph_core::AgentId;
use ph_schedule::{Activity, Task};
use ph_spatial::RadialGoal;
use tracing::debug;

use crate::{ActionContext, AlphaHound, BasePolicy, TaskFailure, TaskHandler};

/// Result of starting or running one task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    Complete,
    /// Keep running next tick.
    Running,
    Failed(TaskFailure),
    /// Not a task this creature overrides.
    NotHandled,
}

impl<B: BasePolicy> AlphaHound<B> {
    /// Plan a strafe arc around the enemy.
    fn path_to_circle(&self, agent: AgentId, ctx: &mut ActionContext<'_>) -> TaskOutcome {
        let Some(enemy) = ctx.enemy(agent) else {
            return TaskOutcome::Failed(TaskFailure::NoEnemy);
        };
        let i = agent.index();
        let radius = ctx.rng.random_int(self.config.strafe_radius_min, self.config.strafe_radius_max);
        let goal = RadialGoal {
            destination: enemy.origin,
            center:      enemy.center(),
            radius:      radius as f32,
            arc_degrees: self.config.strafe_arc_degrees,
            step:        self.config.strafe_step,
            clockwise:   ctx.agents.loop_clockwise[i],
        };
        match ctx.nav.set_radial_goal(ctx.agents.position[i], &goal, ctx.world) {
            Some(path) => {
                ctx.agents.path[i] = path.waypoints.into();
                TaskOutcome::Complete
            }
            None => {
                debug!(%agent, radius, clockwise = goal.clockwise, "no strafe route");
                TaskOutcome::Failed(TaskFailure::NoRoute)
            }
        }
    }

    /// Find a spot with a clear line of sight to the enemy and head there.
    fn path_to_enemy_los(&self, agent: AgentId, ctx: &mut ActionContext<'_>) -> TaskOutcome {
        let Some(enemy) = ctx.enemy(agent) else {
            return TaskOutcome::Failed(TaskFailure::NoTarget);
        };
        let i = agent.index();
        let from = ctx.agents.position[i];
        let max_range = self.config.max_attack_radius() * self.config.los_range_scale;
        let Some(spot) = ctx.tactical.find_los(
            from,
            enemy.origin,
            enemy.eye_position(),
            self.config.min_attack_radius,
            max_range,
            ctx.world,
        ) else {
            return TaskOutcome::Failed(TaskFailure::NoShoot);
        };
        match ctx.nav.set_goal(from, spot, ctx.agents.tolerance[i], ctx.world) {
            Some(path) => {
                ctx.agents.path[i] = path.waypoints.into();
                TaskOutcome::Complete
            }
            None => TaskOutcome::Failed(TaskFailure::NoRoute),
        }
    }
}

impl<B: BasePolicy> TaskHandler for AlphaHound<B> {
    fn start_task(&self, agent: AgentId, task: &Task, ctx: &mut ActionContext<'_>) -> TaskOutcome {
        let i = agent.index();
        match *task {
            Task::GetPathToCircle => self.path_to_circle(agent, ctx),
            Task::ReverseStrafeDir => {
                ctx.agents.loop_clockwise[i] = !ctx.agents.loop_clockwise[i];
                TaskOutcome::Complete
            }
            Task::GetPathToEnemyLos => self.path_to_enemy_los(agent, ctx),
            Task::FallAsleep => {
                ctx.agents.asleep[i] = true;
                TaskOutcome::Complete
            }
            Task::WakeUp => {
                ctx.agents.asleep[i] = false;
                TaskOutcome::Complete
            }
            Task::OpenEye => {
                ctx.agents.dont_blink[i] = false;
                TaskOutcome::Complete
            }
            // Holds the eye shut until the schedule moves on.
            Task::CloseEye => {
                ctx.agents.dont_blink[i] = true;
                TaskOutcome::Running
            }
            Task::ThreatDisplay => {
                ctx.agents.set_activity(agent, Activity::IdleAngry);
                TaskOutcome::Running
            }
            Task::HopBack => {
                ctx.agents.set_activity(agent, Activity::Leap);
                TaskOutcome::Running
            }
            Task::RangeAttack1 => {
                ctx.agents.set_activity(agent, Activity::RangeAttack1);
                TaskOutcome::Running
            }
            _ => TaskOutcome::NotHandled,
        }
    }

    fn run_task(&self, agent: AgentId, task: &Task, ctx: &mut ActionContext<'_>) -> TaskOutcome {
        let finished = ctx.agents.activity_finished[agent.index()];
        match *task {
            Task::ThreatDisplay => {
                if let Some(enemy) = ctx.enemy(agent) {
                    ctx.face(agent, enemy.origin);
                }
                if finished { TaskOutcome::Complete } else { TaskOutcome::Running }
            }
            Task::CloseEye => TaskOutcome::Running,
            Task::HopBack => {
                if finished { TaskOutcome::Complete } else { TaskOutcome::Running }
            }
            _ => TaskOutcome::NotHandled,
        }
    }
}
